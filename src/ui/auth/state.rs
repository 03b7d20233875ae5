use crate::ui::mvi::UiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthField {
    #[default]
    Identifier,
    Secret,
}

/// Last status line shown under the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    Pending(String),
    Success(String),
    Error(String),
}

impl AuthStatus {
    pub fn text(&self) -> &str {
        match self {
            AuthStatus::Pending(text) | AuthStatus::Success(text) | AuthStatus::Error(text) => {
                text
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthState {
    pub identifier: String,
    pub secret: String,
    pub focused: AuthField,
    pub status: Option<AuthStatus>,
}

impl UiState for AuthState {}

impl AuthState {
    /// Secret rendered as bullets.
    pub fn masked_secret(&self) -> String {
        "•".repeat(self.secret.chars().count())
    }
}
