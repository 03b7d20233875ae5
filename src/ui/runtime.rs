use crate::api::ApiClient;
use crate::config::Config;
use crate::coordinator::RefreshCoordinator;
use crate::shutdown::{ShutdownCoordinator, ShutdownPhase};
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use crate::worker::{command_channel, ApiEventSink, ApiWorker};
use std::io;
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

const TICK_RATE: Duration = Duration::from_millis(250);
const WORKER_STOP_TIMEOUT: Duration = Duration::from_secs(2);

/// Run the TUI on the calling thread. API calls run on `rt`.
pub fn run(config: &Config, api: ApiClient, rt: &Runtime) -> io::Result<()> {
    let shutdown = ShutdownCoordinator::new();
    let (mut terminal, guard) = setup_terminal()?;
    let events = EventHandler::new(TICK_RATE, shutdown.handle());

    let base_url = api.base_url().to_string();
    let mut app = App::new(config, api.session().clone(), RefreshCoordinator::new());

    let (command_tx, command_rx) = command_channel();
    app.set_command_sender(command_tx);

    let event_tx = events.sender();
    let sink: ApiEventSink = Arc::new(move |event| {
        let _ = event_tx.send(AppEvent::Api(event));
    });
    let worker = ApiWorker::new(api, command_rx, sink);
    let worker_task = rt.spawn(worker.run(shutdown.handle()));

    // Raw mode turns Ctrl+C into a key event; this only covers signals sent
    // from outside the terminal.
    let signal_tx = events.sender();
    let signal_handle = shutdown.handle();
    rt.spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received");
            signal_handle.signal();
            let _ = signal_tx.send(AppEvent::Shutdown);
        }
    });

    tracing::info!(base_url = %base_url, "UI started");
    app.start();

    loop {
        terminal.draw(|frame| draw(frame, &app, &base_url))?;
        if app.should_quit() || shutdown.is_shutting_down() {
            break;
        }

        match events.next(TICK_RATE) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Api(event)) => app.on_api_event(event),
            Ok(AppEvent::Tick) => {
                app.sync_refresh();
            }
            // The next draw picks up the new size.
            Ok(AppEvent::Resize(..)) => {}
            Ok(AppEvent::Shutdown) => app.request_quit(),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    shutdown.signal();
    shutdown.advance(ShutdownPhase::StoppingInput);
    shutdown.advance(ShutdownPhase::StoppingWorker);
    let stopped =
        rt.block_on(async { tokio::time::timeout(WORKER_STOP_TIMEOUT, worker_task).await });
    if stopped.is_err() {
        tracing::warn!("API worker did not stop in time");
    }

    shutdown.advance(ShutdownPhase::RestoringTerminal);
    guard.restore();
    drop(terminal);
    shutdown.advance(ShutdownPhase::Complete);
    tracing::info!("UI stopped");
    Ok(())
}
