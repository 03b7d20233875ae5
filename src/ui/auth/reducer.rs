use crate::ui::auth::intent::AuthIntent;
use crate::ui::auth::state::{AuthField, AuthState, AuthStatus};
use crate::ui::mvi::Reducer;

pub struct AuthReducer;

impl Reducer for AuthReducer {
    type State = AuthState;
    type Intent = AuthIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            AuthIntent::Prefill { identifier, secret } => AuthState {
                identifier,
                secret,
                ..state
            },
            AuthIntent::FocusNext => AuthState {
                focused: match state.focused {
                    AuthField::Identifier => AuthField::Secret,
                    AuthField::Secret => AuthField::Identifier,
                },
                ..state
            },
            AuthIntent::Input(ch) => {
                let mut state = state;
                match state.focused {
                    AuthField::Identifier => state.identifier.push(ch),
                    AuthField::Secret => state.secret.push(ch),
                }
                state
            }
            AuthIntent::Backspace => {
                let mut state = state;
                match state.focused {
                    AuthField::Identifier => state.identifier.pop(),
                    AuthField::Secret => state.secret.pop(),
                };
                state
            }
            AuthIntent::LoginRequested => {
                with_status(state, AuthStatus::Pending("Signing in...".into()))
            }
            AuthIntent::LoginSucceeded => {
                with_status(state, AuthStatus::Success("Login successful".into()))
            }
            AuthIntent::LoginFailed { message } => {
                with_status(state, AuthStatus::Error(format!("Login failed: {}", message)))
            }
            AuthIntent::RegisterRequested => {
                with_status(state, AuthStatus::Pending("Registering...".into()))
            }
            AuthIntent::RegisterSucceeded => with_status(
                state,
                AuthStatus::Success("Registered. You can now log in.".into()),
            ),
            AuthIntent::RegisterFailed { message } => with_status(
                state,
                AuthStatus::Error(format!("Registration failed: {}", message)),
            ),
            AuthIntent::LoggedOut => with_status(state, AuthStatus::Success("Logged out".into())),
            AuthIntent::LogoutFailed { message } => {
                with_status(state, AuthStatus::Error(format!("Logout failed: {}", message)))
            }
        }
    }
}

fn with_status(state: AuthState, status: AuthStatus) -> AuthState {
    AuthState {
        status: Some(status),
        ..state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce_all(intents: Vec<AuthIntent>) -> AuthState {
        intents
            .into_iter()
            .fold(AuthState::default(), AuthReducer::reduce)
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let state = reduce_all(vec![
            AuthIntent::Input('a'),
            AuthIntent::FocusNext,
            AuthIntent::Input('x'),
            AuthIntent::Input('y'),
            AuthIntent::Backspace,
        ]);
        assert_eq!(state.identifier, "a");
        assert_eq!(state.secret, "x");
        assert_eq!(state.masked_secret(), "•");
    }

    #[test]
    fn backspace_on_empty_field_is_noop() {
        let state = reduce_all(vec![AuthIntent::Backspace]);
        assert!(state.identifier.is_empty());
    }

    #[test]
    fn login_failure_message_includes_error_text() {
        let state = reduce_all(vec![
            AuthIntent::LoginRequested,
            AuthIntent::LoginFailed {
                message: "Incorrect email or password".into(),
            },
        ]);
        assert_eq!(
            state.status,
            Some(AuthStatus::Error(
                "Login failed: Incorrect email or password".into()
            ))
        );
    }

    #[test]
    fn status_changes_keep_fields() {
        let state = reduce_all(vec![
            AuthIntent::Prefill {
                identifier: "admin@example.com".into(),
                secret: "admin123".into(),
            },
            AuthIntent::LoggedOut,
        ]);
        assert_eq!(state.identifier, "admin@example.com");
        assert_eq!(state.secret, "admin123");
        assert_eq!(state.status.as_ref().map(AuthStatus::text), Some("Logged out"));
    }
}
