//! The operation surface front ends call.
//!
//! `RequestService` owns the rules the lifecycle alone cannot enforce:
//! - a transition is validated locally before any network traffic;
//! - nothing is mutated optimistically — the cached list only changes via a
//!   wholesale re-fetch after the backend confirms;
//! - one transition per request at a time, guarded by the store;
//! - a failed round trip leaves the list untouched and reports a retryable
//!   error; retry is caller-driven, there is no automatic retry or backoff,
//!   and an issued transition cannot be cancelled.

use std::mem;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use gemflow_core::{
    AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink, ClientError, Credentials,
    LifecycleEngine, Request, RequestId, RequestStore, StaffAction, StoreEvent, TransitionOutcome,
    UserSession, ValuationDraft,
};

use crate::api::BackendApi;
use crate::session::{AuthEvent, AuthState};

pub struct RequestService<A, S> {
    api: A,
    sink: S,
    engine: LifecycleEngine,
    store: RequestStore,
    auth: AuthState,
}

impl<A, S> RequestService<A, S>
where
    A: BackendApi,
    S: AuditSink,
{
    pub fn new(api: A, sink: S) -> Self {
        Self {
            api,
            sink,
            engine: LifecycleEngine::new(),
            store: RequestStore::new(),
            auth: AuthState::default(),
        }
    }

    pub fn store(&self) -> &RequestStore {
        &self.store
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn engine(&self) -> &LifecycleEngine {
        &self.engine
    }

    /// Actions currently offered for one request, as a pure function of the
    /// cached `(status, finish_date)`.
    pub fn available_actions(&self, id: &RequestId, now: DateTime<Utc>) -> Vec<StaffAction> {
        self.store
            .get(id)
            .map(|request| self.engine.available_actions(request, now))
            .unwrap_or_default()
    }

    fn actor(&self) -> String {
        self.auth
            .user()
            .map(|user| user.username.clone())
            .unwrap_or_else(|| "anonymous".to_string())
    }

    pub async fn login(&mut self, credentials: &Credentials) -> Result<UserSession, ClientError> {
        let correlation_id = Uuid::new_v4().to_string();
        self.auth = mem::take(&mut self.auth).apply(AuthEvent::LoginStart);

        match self.api.login(credentials).await {
            Ok(user) => {
                info!(
                    event_name = "session.login_succeeded",
                    username = %user.username,
                    role = user.role.as_str(),
                    correlation_id = %correlation_id,
                    "login succeeded"
                );
                self.sink.emit(AuditEvent::new(
                    None,
                    correlation_id,
                    "session.login_succeeded",
                    AuditCategory::Session,
                    user.username.clone(),
                    AuditOutcome::Success,
                ));
                self.auth =
                    mem::take(&mut self.auth).apply(AuthEvent::LoginSucceeded(user.clone()));
                Ok(user)
            }
            Err(error) => {
                let client_error = error.into_fetch_error();
                warn!(
                    event_name = "session.login_failed",
                    username = %credentials.username,
                    correlation_id = %correlation_id,
                    error = %client_error,
                    "login failed"
                );
                self.sink.emit(
                    AuditEvent::new(
                        None,
                        correlation_id,
                        "session.login_failed",
                        AuditCategory::Session,
                        credentials.username.clone(),
                        AuditOutcome::Failed,
                    )
                    .with_metadata("error", client_error.to_string()),
                );
                self.auth =
                    mem::take(&mut self.auth).apply(AuthEvent::LoginFailed(client_error.to_string()));
                Err(client_error)
            }
        }
    }

    /// Re-fetch the worklist wholesale. This is the only path through which
    /// the cached list ever changes.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.store.apply(StoreEvent::FetchStart)?;
        match self.api.list_requests().await {
            Ok(requests) => {
                info!(event_name = "sync.fetch_succeeded", count = requests.len(), "worklist refreshed");
                self.store.apply(StoreEvent::FetchSuccess(requests))?;
                Ok(())
            }
            Err(error) => {
                let client_error = error.into_fetch_error();
                warn!(event_name = "sync.fetch_failed", error = %client_error, "worklist refresh failed");
                self.store.apply(StoreEvent::FetchFailure(client_error.to_string()))?;
                self.note_authorization(&client_error);
                Err(client_error)
            }
        }
    }

    /// Fetch one request's authoritative state directly from the backend.
    pub async fn fetch_request(&mut self, id: &RequestId) -> Result<Request, ClientError> {
        match self.api.get_request(id).await {
            Ok(request) => Ok(request),
            Err(error) => {
                let client_error = error.into_fetch_error();
                self.note_authorization(&client_error);
                Err(client_error)
            }
        }
    }

    /// Issue one lifecycle transition. On success the authoritative state is
    /// re-fetched; the outcome returned reflects what the engine computed,
    /// never a locally mutated record.
    pub async fn apply_action(
        &mut self,
        id: &RequestId,
        action: StaffAction,
        now: DateTime<Utc>,
    ) -> Result<TransitionOutcome, ClientError> {
        let correlation_id = Uuid::new_v4().to_string();
        let request = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| ClientError::Validation(format!("unknown request `{id}`")))?;

        let audit = AuditContext::new(Some(id.clone()), correlation_id.clone(), self.actor());
        let outcome = self.engine.apply_with_audit(&request, action, now, &self.sink, &audit)?;

        self.store.apply(StoreEvent::TransitionStart(id.clone()))?;

        match self.api.transition(id, action, None).await {
            Ok(ack) => {
                self.store.apply(StoreEvent::TransitionSuccess(id.clone()))?;
                info!(
                    event_name = "sync.transition_confirmed",
                    request_id = %id,
                    action = action.as_str(),
                    correlation_id = %correlation_id,
                    message = %ack.message,
                    "transition confirmed by backend"
                );
                self.sink.emit(
                    AuditEvent::new(
                        Some(id.clone()),
                        correlation_id,
                        "sync.transition_confirmed",
                        AuditCategory::Sync,
                        self.actor(),
                        AuditOutcome::Success,
                    )
                    .with_metadata("action", action.as_str())
                    .with_metadata("message", ack.message),
                );

                if let Err(error) = self.refresh().await {
                    // The transition itself is applied; a stale list is
                    // recoverable by the next refresh.
                    warn!(
                        event_name = "sync.refresh_after_transition_failed",
                        request_id = %id,
                        error = %error,
                        "re-fetch after confirmed transition failed"
                    );
                }
                Ok(outcome)
            }
            Err(error) => {
                let client_error = error.into_transition_error();
                self.store.apply(StoreEvent::TransitionFailure {
                    id: id.clone(),
                    message: client_error.to_string(),
                })?;
                warn!(
                    event_name = "sync.transition_failed",
                    request_id = %id,
                    action = action.as_str(),
                    correlation_id = %correlation_id,
                    error = %client_error,
                    "transition was not applied"
                );
                self.sink.emit(
                    AuditEvent::new(
                        Some(id.clone()),
                        correlation_id,
                        "sync.transition_failed",
                        AuditCategory::Sync,
                        self.actor(),
                        AuditOutcome::Failed,
                    )
                    .with_metadata("action", action.as_str())
                    .with_metadata("error", client_error.to_string()),
                );
                self.note_authorization(&client_error);
                Err(client_error)
            }
        }
    }

    /// Submit a grading report. Completeness is validated before any network
    /// call; an incomplete draft never leaves the client.
    pub async fn submit_valuation(
        &mut self,
        id: &RequestId,
        draft: ValuationDraft,
    ) -> Result<(), ClientError> {
        let correlation_id = Uuid::new_v4().to_string();
        let valuation = draft.complete().map_err(ClientError::from)?;

        self.store.apply(StoreEvent::TransitionStart(id.clone()))?;

        match self.api.submit_valuation(id, &valuation).await {
            Ok(ack) => {
                self.store.apply(StoreEvent::TransitionSuccess(id.clone()))?;
                info!(
                    event_name = "sync.valuation_submitted",
                    request_id = %id,
                    correlation_id = %correlation_id,
                    message = %ack.message,
                    "valuation submitted"
                );
                self.sink.emit(
                    AuditEvent::new(
                        Some(id.clone()),
                        correlation_id,
                        "sync.valuation_submitted",
                        AuditCategory::Sync,
                        self.actor(),
                        AuditOutcome::Success,
                    )
                    .with_metadata("message", ack.message),
                );

                if let Err(error) = self.refresh().await {
                    warn!(
                        event_name = "sync.refresh_after_valuation_failed",
                        request_id = %id,
                        error = %error,
                        "re-fetch after valuation submission failed"
                    );
                }
                Ok(())
            }
            Err(error) => {
                let client_error = error.into_transition_error();
                self.store.apply(StoreEvent::TransitionFailure {
                    id: id.clone(),
                    message: client_error.to_string(),
                })?;
                warn!(
                    event_name = "sync.valuation_failed",
                    request_id = %id,
                    correlation_id = %correlation_id,
                    error = %client_error,
                    "valuation submission failed"
                );
                self.sink.emit(
                    AuditEvent::new(
                        Some(id.clone()),
                        correlation_id,
                        "sync.valuation_failed",
                        AuditCategory::Sync,
                        self.actor(),
                        AuditOutcome::Failed,
                    )
                    .with_metadata("error", client_error.to_string()),
                );
                self.note_authorization(&client_error);
                Err(client_error)
            }
        }
    }

    fn note_authorization(&mut self, error: &ClientError) {
        if matches!(error, ClientError::Authorization(_)) {
            self.auth = mem::take(&mut self.auth).apply(AuthEvent::LoginFailed(error.to_string()));
        }
    }
}
