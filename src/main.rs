use anyhow::Context;
use clap::Parser;

use stockdesk::api::ApiClient;
use stockdesk::cli::Cli;
use stockdesk::logging;
use stockdesk::session::{FileTokenStore, Session};
use stockdesk::ui;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    if let Err(err) = logging::init_tracing(&logging::log_path(), cli.log_level.as_deref()) {
        eprintln!("Warning: logging disabled: {}", err);
    }

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let session = if cli.ephemeral || cli.check {
        Session::in_memory()
    } else {
        let path = config.session.resolve_token_path();
        Session::open(FileTokenStore::new(path)).context("Failed to open session")?
    };
    let api = ApiClient::new(&config.api, session)?;

    if cli.check {
        let health = rt
            .block_on(api.health())
            .with_context(|| format!("Health check failed for {}", config.api.base_url))?;
        println!("{}: {}", config.api.base_url, health.status);
        return Ok(());
    }

    ui::runtime::run(&config, api, &rt).context("Terminal UI failed")?;
    Ok(())
}
