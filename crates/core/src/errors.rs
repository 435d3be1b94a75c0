use thiserror::Error;

use crate::domain::request::RequestId;
use crate::lifecycle::TransitionError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("unknown process status `{0}`")]
    UnknownStatus(String),
    #[error("unknown user role `{0}`")]
    UnknownRole(String),
    #[error("missing required fields: {0:?}")]
    MissingRequiredFields(Vec<&'static str>),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

/// Everything a caller of the client surface can observe. Matches the
/// failure policy: caught at the call site, logged, rendered as a one-line
/// notification, never fatal — the view stays on the pre-transition state.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("network failure: {0}")]
    Network(String),
    #[error("transition was not applied: {0}")]
    TransitionFailed(String),
    #[error("a transition for request `{0}` is already in flight")]
    TransitionInFlight(RequestId),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("authorization required: {0}")]
    Authorization(String),
}

impl From<TransitionError> for ClientError {
    fn from(value: TransitionError) -> Self {
        Self::Domain(DomainError::Transition(value))
    }
}

impl ClientError {
    /// Retryable errors leave the backend state unchanged; re-invoking the
    /// same operation is the correct recovery.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::TransitionFailed(_))
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Domain(DomainError::Transition(_)) => {
                "That action is not available for this request."
            }
            Self::Domain(DomainError::MissingRequiredFields(_)) => {
                "Please fill in all required fields."
            }
            Self::Domain(_) => "The request could not be processed. Check inputs and try again.",
            Self::Network(_) => "The service could not be reached. Please retry shortly.",
            Self::TransitionFailed(_) => {
                "The action could not be completed and the request is unchanged. Please retry."
            }
            Self::TransitionInFlight(_) => {
                "An action for this request is still in progress. Please wait for it to finish."
            }
            Self::Validation(_) => "The request could not be processed. Check inputs and try again.",
            Self::Authorization(_) => "Your session has expired. Please log in again.",
        }
    }
}
