use crate::config::Config;
use crate::coordinator::{ChangeSource, RefreshCoordinator, RefreshSignal};
use crate::session::Session;
use crate::ui::auth::{AuthIntent, AuthReducer, AuthState};
use crate::ui::inventory::{
    FormKind, InventoryIntent, InventoryReducer, InventoryState, Mutation,
};
use crate::ui::movements::{MovementsIntent, MovementsReducer, MovementsState};
use crate::ui::mvi::Reducer;
use crate::worker::{ApiEvent, UiCommand, UiCommandSender};
use tokio::sync::watch;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub enum Panel {
    #[default]
    Auth,
    Inventory,
    Movements,
}

impl Panel {
    pub fn next(self) -> Self {
        match self {
            Panel::Auth => Panel::Inventory,
            Panel::Inventory => Panel::Movements,
            Panel::Movements => Panel::Auth,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Panel::Auth => Panel::Movements,
            Panel::Inventory => Panel::Auth,
            Panel::Movements => Panel::Inventory,
        }
    }
}

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

/// Root of the view tree.
///
/// Owns the three view states, issues commands to the API worker and routes
/// the results back. Mutations and logins are published through the
/// [`RefreshCoordinator`]; [`App::sync_refresh`] is the subscriber side.
pub struct App {
    should_quit: bool,
    focus: Panel,
    auth: AuthState,
    inventory: InventoryState,
    movements: MovementsState,
    session: Session,
    coordinator: RefreshCoordinator,
    refresh_rx: watch::Receiver<RefreshSignal>,
    commands: Option<UiCommandSender>,
    default_limit: u32,
    last_command_error: Option<String>,
}

impl App {
    pub fn new(config: &Config, session: Session, coordinator: RefreshCoordinator) -> Self {
        let refresh_rx = coordinator.subscribe();
        let default_limit = config.movements.default_limit;
        let mut app = Self {
            should_quit: false,
            focus: Panel::default(),
            auth: AuthState::default(),
            inventory: InventoryState::default(),
            movements: MovementsState::mounted(default_limit, coordinator.generation()),
            session,
            coordinator,
            refresh_rx,
            commands: None,
            default_limit,
            last_command_error: None,
        };

        let identifier = config.login.identifier.clone().unwrap_or_default();
        let secret = config.login.secret.clone().unwrap_or_default();
        if !identifier.is_empty() || !secret.is_empty() {
            app.dispatch_auth(AuthIntent::Prefill { identifier, secret });
        }
        app
    }

    pub fn set_command_sender(&mut self, sender: UiCommandSender) {
        self.commands = Some(sender);
    }

    /// Initial load of both data views.
    pub fn start(&mut self) {
        self.load_inventory();
        self.load_movements();
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn focus(&self) -> Panel {
        self.focus
    }

    pub fn set_focus(&mut self, panel: Panel) {
        self.focus = panel;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn inventory(&self) -> &InventoryState {
        &self.inventory
    }

    pub fn movements(&self) -> &MovementsState {
        &self.movements
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn generation(&self) -> u64 {
        self.coordinator.generation()
    }

    pub fn last_command_error(&self) -> Option<&str> {
        self.last_command_error.as_deref()
    }

    pub fn dispatch_auth(&mut self, intent: AuthIntent) {
        dispatch_mvi!(self, auth, AuthReducer, intent);
    }

    pub fn dispatch_inventory(&mut self, intent: InventoryIntent) {
        dispatch_mvi!(self, inventory, InventoryReducer, intent);
    }

    pub fn dispatch_movements(&mut self, intent: MovementsIntent) {
        dispatch_mvi!(self, movements, MovementsReducer, intent);
    }

    // ========================================================================
    // Auth
    // ========================================================================

    pub fn submit_login(&mut self) {
        self.dispatch_auth(AuthIntent::LoginRequested);
        let command = UiCommand::Login {
            identifier: self.auth.identifier.clone(),
            secret: self.auth.secret.clone(),
        };
        if let Err(message) = self.send_command(command) {
            self.dispatch_auth(AuthIntent::LoginFailed { message });
        }
    }

    pub fn submit_register(&mut self) {
        self.dispatch_auth(AuthIntent::RegisterRequested);
        let command = UiCommand::Register {
            identifier: self.auth.identifier.clone(),
            secret: self.auth.secret.clone(),
        };
        if let Err(message) = self.send_command(command) {
            self.dispatch_auth(AuthIntent::RegisterFailed { message });
        }
    }

    /// Drop the session token and let the data views reload without it.
    pub fn logout(&mut self) {
        match self.session.clear() {
            Ok(()) => {
                tracing::info!("Logged out");
                self.dispatch_auth(AuthIntent::LoggedOut);
                self.coordinator.on_logged_out();
                self.sync_refresh();
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to clear session token");
                self.dispatch_auth(AuthIntent::LogoutFailed {
                    message: err.to_string(),
                });
            }
        }
    }

    // ========================================================================
    // Inventory
    // ========================================================================

    pub fn load_inventory(&mut self) {
        self.dispatch_inventory(InventoryIntent::LoadRequested);
        let seq = self.inventory.latest_load.value();
        if let Err(message) = self.send_command(UiCommand::LoadProducts { seq }) {
            self.dispatch_inventory(InventoryIntent::LoadFailed { seq, message });
        }
    }

    pub fn open_inventory_form(&mut self, kind: FormKind) {
        self.dispatch_inventory(InventoryIntent::OpenForm(kind));
    }

    /// Validate the open form and, when valid, send the mutation.
    ///
    /// Invalid input keeps the form open with the validation message and
    /// sends nothing.
    pub fn submit_inventory_form(&mut self) -> bool {
        let Some(form) = self.inventory.form.as_ref() else {
            return false;
        };
        let mutation = match form.validate() {
            Ok(mutation) => mutation,
            Err(err) => {
                tracing::debug!(error = %err, "Rejected inventory input");
                self.dispatch_inventory(InventoryIntent::FormRejected {
                    message: err.to_string(),
                });
                return false;
            }
        };

        self.dispatch_inventory(InventoryIntent::MutationSubmitted {
            product_id: mutation.product_id(),
        });
        match self.send_command(UiCommand::Mutate { mutation }) {
            Ok(()) => true,
            Err(message) => {
                self.dispatch_inventory(InventoryIntent::MutationFailed { message });
                false
            }
        }
    }

    // ========================================================================
    // Movement history
    // ========================================================================

    pub fn load_movements(&mut self) {
        self.dispatch_movements(MovementsIntent::LoadRequested);
        let seq = self.movements.latest_load.value();
        let query = self.movements.query();
        if let Err(message) = self.send_command(UiCommand::LoadMovements { seq, query }) {
            self.dispatch_movements(MovementsIntent::LoadFailed { seq, message });
        }
    }

    /// Apply a refresh signal published since the last call.
    ///
    /// The history view is reset to a fresh mount and reloaded. The
    /// inventory reloads too unless it caused the change (it already reloads
    /// itself after a mutation).
    pub fn sync_refresh(&mut self) -> bool {
        if !self.refresh_rx.has_changed().unwrap_or(false) {
            return false;
        }
        let signal = *self.refresh_rx.borrow_and_update();

        self.dispatch_movements(MovementsIntent::Reset {
            generation: signal.generation,
            default_limit: self.default_limit,
        });
        self.load_movements();
        if signal.source != Some(ChangeSource::Inventory) {
            self.load_inventory();
        }
        true
    }

    // ========================================================================
    // Worker results
    // ========================================================================

    pub fn on_api_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::LoginFinished(Ok(())) => {
                self.dispatch_auth(AuthIntent::LoginSucceeded);
                self.coordinator.on_logged_in();
                self.sync_refresh();
            }
            ApiEvent::LoginFinished(Err(message)) => {
                self.dispatch_auth(AuthIntent::LoginFailed { message });
            }
            ApiEvent::RegisterFinished(Ok(())) => {
                self.dispatch_auth(AuthIntent::RegisterSucceeded);
            }
            ApiEvent::RegisterFinished(Err(message)) => {
                self.dispatch_auth(AuthIntent::RegisterFailed { message });
            }
            ApiEvent::ProductsLoaded { seq, result } => match result {
                Ok(products) => {
                    self.dispatch_inventory(InventoryIntent::Loaded { seq, products })
                }
                Err(message) => {
                    self.dispatch_inventory(InventoryIntent::LoadFailed { seq, message })
                }
            },
            ApiEvent::MovementsLoaded { seq, result } => match result {
                Ok(movements) => {
                    self.dispatch_movements(MovementsIntent::Loaded { seq, movements })
                }
                Err(message) => {
                    self.dispatch_movements(MovementsIntent::LoadFailed { seq, message })
                }
            },
            ApiEvent::MutationFinished { mutation, result } => match result {
                Ok(()) => {
                    self.dispatch_inventory(InventoryIntent::MutationSucceeded {
                        message: mutation_summary(&mutation),
                    });
                    self.load_inventory();
                    self.coordinator.on_changed();
                    self.sync_refresh();
                }
                Err(message) => {
                    self.dispatch_inventory(InventoryIntent::MutationFailed { message });
                }
            },
        }
    }

    fn send_command(&mut self, command: UiCommand) -> Result<(), String> {
        let Some(sender) = &self.commands else {
            return Err("API worker not running".to_string());
        };

        match sender.try_send(command) {
            Ok(()) => {
                self.last_command_error = None;
                Ok(())
            }
            Err(err) => {
                let message = format!("Command send failed: {}", err);
                tracing::error!("{}", message);
                self.last_command_error = Some(message.clone());
                Err(message)
            }
        }
    }
}

fn mutation_summary(mutation: &Mutation) -> String {
    match mutation {
        Mutation::SetStock {
            product_id,
            adjustment,
        } => format!("Stock of {} set to {}", product_id, adjustment.quantity),
        Mutation::RecordMovement(movement) => format!(
            "Movement {:+} recorded for {}",
            movement.delta, movement.product_id
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Product, StockAdjustment};
    use crate::worker::command_channel;
    use tokio::sync::mpsc;

    fn make_app() -> (App, mpsc::Receiver<UiCommand>) {
        let mut app = App::new(
            &Config::default(),
            Session::in_memory(),
            RefreshCoordinator::new(),
        );
        let (tx, rx) = command_channel();
        app.set_command_sender(tx);
        (app, rx)
    }

    fn drain(rx: &mut mpsc::Receiver<UiCommand>) -> Vec<UiCommand> {
        let mut commands = Vec::new();
        while let Ok(command) = rx.try_recv() {
            commands.push(command);
        }
        commands
    }

    fn product(id: i64, stock_qty: i64) -> Product {
        Product {
            id,
            sku: format!("SKU-{}", id),
            ean13: Some("1234567890123".into()),
            name: "Widget".into(),
            stock_qty,
            created_at: None,
            updated_at: None,
        }
    }

    fn with_products(app: &mut App, products: Vec<Product>) {
        app.load_inventory();
        let seq = app.inventory().latest_load.value();
        app.on_api_event(ApiEvent::ProductsLoaded {
            seq,
            result: Ok(products),
        });
    }

    #[test]
    fn start_loads_both_views() {
        let (mut app, mut rx) = make_app();
        app.start();
        let commands = drain(&mut rx);
        assert!(matches!(commands[0], UiCommand::LoadProducts { .. }));
        assert!(matches!(commands[1], UiCommand::LoadMovements { .. }));
        assert!(app.inventory().loading);
        assert!(app.movements().loading);
    }

    #[test]
    fn login_success_bumps_generation_once_and_resets_history() {
        let (mut app, mut rx) = make_app();
        app.dispatch_movements(MovementsIntent::Input('9'));
        app.on_api_event(ApiEvent::LoginFinished(Ok(())));

        assert_eq!(app.generation(), 1);
        assert!(app.movements().product_filter.is_empty());
        assert_eq!(app.movements().generation, 1);
        let commands = drain(&mut rx);
        assert_eq!(commands.len(), 2);
        assert!(commands
            .iter()
            .any(|c| matches!(c, UiCommand::LoadMovements { .. })));
        assert!(commands
            .iter()
            .any(|c| matches!(c, UiCommand::LoadProducts { .. })));
        // Nothing left to sync.
        assert!(!app.sync_refresh());
    }

    #[test]
    fn login_failure_does_not_bump_generation() {
        let (mut app, mut rx) = make_app();
        app.on_api_event(ApiEvent::LoginFinished(Err("bad credentials".into())));
        assert_eq!(app.generation(), 0);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn register_success_does_not_bump_generation() {
        let (mut app, _rx) = make_app();
        app.on_api_event(ApiEvent::RegisterFinished(Ok(())));
        assert_eq!(app.generation(), 0);
    }

    #[test]
    fn invalid_quantity_sends_nothing() {
        let (mut app, mut rx) = make_app();
        with_products(&mut app, vec![product(7, 10)]);
        drain(&mut rx);

        app.open_inventory_form(FormKind::SetStock);
        app.dispatch_inventory(InventoryIntent::FormBackspace);
        app.dispatch_inventory(InventoryIntent::FormBackspace);
        app.dispatch_inventory(InventoryIntent::FormInput('-'));
        app.dispatch_inventory(InventoryIntent::FormInput('1'));
        assert!(!app.submit_inventory_form());

        assert!(drain(&mut rx).is_empty());
        assert!(app.inventory().form.as_ref().unwrap().error.is_some());
    }

    #[test]
    fn cancelled_form_sends_nothing() {
        let (mut app, mut rx) = make_app();
        with_products(&mut app, vec![product(7, 10)]);
        drain(&mut rx);

        app.open_inventory_form(FormKind::RecordMovement);
        app.dispatch_inventory(InventoryIntent::CancelForm);
        assert!(!app.submit_inventory_form());
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn valid_quantity_sends_set_stock() {
        let (mut app, mut rx) = make_app();
        with_products(&mut app, vec![product(7, 10)]);
        drain(&mut rx);

        app.open_inventory_form(FormKind::SetStock);
        app.dispatch_inventory(InventoryIntent::FormBackspace);
        app.dispatch_inventory(InventoryIntent::FormBackspace);
        app.dispatch_inventory(InventoryIntent::FormInput('4'));
        assert!(app.submit_inventory_form());

        assert_eq!(
            drain(&mut rx),
            vec![UiCommand::Mutate {
                mutation: Mutation::SetStock {
                    product_id: 7,
                    adjustment: StockAdjustment {
                        quantity: 4,
                        reason: "Ajuste manual".into(),
                    },
                },
            }]
        );
        assert!(app.inventory().form.is_none());
    }

    #[test]
    fn mutation_success_reloads_and_publishes_change() {
        let (mut app, mut rx) = make_app();
        let mutation = Mutation::SetStock {
            product_id: 7,
            adjustment: StockAdjustment {
                quantity: 4,
                reason: "Ajuste manual".into(),
            },
        };
        app.on_api_event(ApiEvent::MutationFinished {
            mutation,
            result: Ok(()),
        });

        assert_eq!(app.generation(), 1);
        let commands = drain(&mut rx);
        let products = commands
            .iter()
            .filter(|c| matches!(c, UiCommand::LoadProducts { .. }))
            .count();
        let movements = commands
            .iter()
            .filter(|c| matches!(c, UiCommand::LoadMovements { .. }))
            .count();
        // Inventory reloads itself once; the refresh signal does not add another.
        assert_eq!(products, 1);
        assert_eq!(movements, 1);
    }

    #[test]
    fn mutation_failure_does_not_reload() {
        let (mut app, mut rx) = make_app();
        let mutation = Mutation::SetStock {
            product_id: 7,
            adjustment: StockAdjustment {
                quantity: 4,
                reason: "Ajuste manual".into(),
            },
        };
        app.on_api_event(ApiEvent::MutationFinished {
            mutation,
            result: Err("Producto no encontrado".into()),
        });
        assert_eq!(app.generation(), 0);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn logout_clears_session_and_publishes_refresh() {
        let (mut app, mut rx) = make_app();
        app.session
            .set_token(crate::session::SecureString::new("T"))
            .unwrap();
        app.logout();
        assert!(!app.is_authenticated());
        assert_eq!(app.generation(), 1);
        assert_eq!(drain(&mut rx).len(), 2);
    }

    #[test]
    fn loads_without_worker_fail_instead_of_hanging() {
        let mut app = App::new(
            &Config::default(),
            Session::in_memory(),
            RefreshCoordinator::new(),
        );
        app.load_inventory();
        assert!(!app.inventory().loading);
        assert!(app.inventory().error.is_some());
    }

    #[test]
    fn login_defaults_come_from_config() {
        let mut config = Config::default();
        config.login.identifier = Some("admin@example.com".into());
        let app = App::new(&config, Session::in_memory(), RefreshCoordinator::new());
        assert_eq!(app.auth().identifier, "admin@example.com");
        assert!(app.auth().secret.is_empty());
    }

    #[test]
    fn panel_focus_cycles() {
        let (mut app, _rx) = make_app();
        assert_eq!(app.focus(), Panel::Auth);
        app.focus_next();
        app.focus_next();
        assert_eq!(app.focus(), Panel::Movements);
        app.focus_next();
        assert_eq!(app.focus(), Panel::Auth);
        app.focus_previous();
        assert_eq!(app.focus(), Panel::Movements);
    }
}
