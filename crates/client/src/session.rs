use gemflow_core::UserSession;

/// Authentication lifecycle, reduced from explicit events. Any
/// authorization failure drops the state to `Failed`, which front ends
/// render as a login prompt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Idle,
    Authenticating,
    Authenticated(UserSession),
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    LoginStart,
    LoginSucceeded(UserSession),
    LoginFailed(String),
}

impl AuthState {
    pub fn apply(self, event: AuthEvent) -> Self {
        match event {
            AuthEvent::LoginStart => Self::Authenticating,
            AuthEvent::LoginSucceeded(user) => Self::Authenticated(user),
            AuthEvent::LoginFailed(message) => Self::Failed(message),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn user(&self) -> Option<&UserSession> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}
