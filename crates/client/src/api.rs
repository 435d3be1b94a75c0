use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use gemflow_core::{
    ClientError, Credentials, Request, RequestId, StaffAction, UserSession, ValuationResult,
};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("authorization rejected: {0}")]
    Unauthorized(String),
    #[error("backend rejected the call: {0}")]
    Backend(String),
    #[error("malformed backend response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Mapping for read-side calls. Anything that is not an authorization
    /// problem reads as the service being unreachable or unusable.
    pub fn into_fetch_error(self) -> ClientError {
        match self {
            Self::Unauthorized(message) => ClientError::Authorization(message),
            Self::Transport(message) | Self::Backend(message) | Self::Decode(message) => {
                ClientError::Network(message)
            }
        }
    }

    /// Mapping for mutating calls: a failed round trip leaves the backend
    /// status unchanged, so the caller sees a retryable transition failure.
    pub fn into_transition_error(self) -> ClientError {
        match self {
            Self::Unauthorized(message) => ClientError::Authorization(message),
            Self::Transport(message) | Self::Backend(message) | Self::Decode(message) => {
                ClientError::TransitionFailed(message)
            }
        }
    }
}

/// Acknowledgement echoed by the backend for a mutating call. Carries only a
/// human-readable message; the authoritative state is re-fetched, never
/// inferred from the ack.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TransitionAck {
    pub message: String,
}

/// The abstract REST surface of the valuation backend. Exact paths are
/// backend-owned; only these contracts matter. Every call is made with the
/// session credentials attached; a missing or expired session fails with
/// `ApiError::Unauthorized`.
#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<UserSession, ApiError>;

    async fn list_requests(&self) -> Result<Vec<Request>, ApiError>;

    async fn get_request(&self, id: &RequestId) -> Result<Request, ApiError>;

    /// Issue one lifecycle transition. `note` overrides the default
    /// description for the approval-backed actions (sealing, commitment)
    /// and is ignored by the others.
    async fn transition(
        &self,
        id: &RequestId,
        action: StaffAction,
        note: Option<&str>,
    ) -> Result<TransitionAck, ApiError>;

    async fn submit_valuation(
        &self,
        id: &RequestId,
        valuation: &ValuationResult,
    ) -> Result<TransitionAck, ApiError>;
}
