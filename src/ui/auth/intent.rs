use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum AuthIntent {
    /// Fill both fields, e.g. from `[login]` config defaults.
    Prefill { identifier: String, secret: String },
    FocusNext,
    Input(char),
    Backspace,
    LoginRequested,
    LoginSucceeded,
    LoginFailed { message: String },
    RegisterRequested,
    RegisterSucceeded,
    RegisterFailed { message: String },
    LoggedOut,
    LogoutFailed { message: String },
}

impl Intent for AuthIntent {}
