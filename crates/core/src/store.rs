//! Reducer-style container for the locally cached request list.
//!
//! The worklist is the only shared client state. It changes exclusively
//! through [`StoreEvent`]s, which keeps the whole view layer a pure function
//! of the snapshot and makes the transition guarantees testable without any
//! rendering or transport in the loop:
//!
//! - the displayed list is replaced wholesale by `FetchSuccess` and by
//!   nothing else — a transition settling never patches it in place;
//! - at most one transition per request is in flight: a second
//!   `TransitionStart` for the same id is rejected until the first settles.

use std::collections::HashSet;

use thiserror::Error;

use crate::domain::request::{Request, RequestId};
use crate::errors::ClientError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    FetchStart,
    FetchSuccess(Vec<Request>),
    FetchFailure(String),
    TransitionStart(RequestId),
    TransitionSuccess(RequestId),
    TransitionFailure { id: RequestId, message: String },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("a transition for request `{0}` is already in flight")]
    TransitionInFlight(RequestId),
}

impl From<StoreError> for ClientError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::TransitionInFlight(id) => Self::TransitionInFlight(id),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RequestStore {
    requests: Vec<Request>,
    loading: bool,
    last_error: Option<String>,
    pending: HashSet<RequestId>,
}

impl RequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: StoreEvent) -> Result<(), StoreError> {
        match event {
            StoreEvent::FetchStart => {
                self.loading = true;
            }
            StoreEvent::FetchSuccess(requests) => {
                self.requests = requests;
                self.loading = false;
                self.last_error = None;
            }
            StoreEvent::FetchFailure(message) => {
                self.loading = false;
                self.last_error = Some(message);
            }
            StoreEvent::TransitionStart(id) => {
                if !self.pending.insert(id.clone()) {
                    return Err(StoreError::TransitionInFlight(id));
                }
            }
            StoreEvent::TransitionSuccess(id) => {
                self.pending.remove(&id);
            }
            StoreEvent::TransitionFailure { id, message } => {
                self.pending.remove(&id);
                self.last_error = Some(message);
            }
        }
        Ok(())
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn get(&self, id: &RequestId) -> Option<&Request> {
        self.requests.iter().find(|request| &request.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_pending(&self, id: &RequestId) -> bool {
        self.pending.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{RequestStore, StoreError, StoreEvent};
    use crate::domain::request::{ProcessStatus, Request, RequestId, ServiceTier};

    fn request(id: &str, status: ProcessStatus) -> Request {
        Request {
            id: RequestId(id.to_string()),
            process_status: status,
            service_name: ServiceTier::BasicValuation,
            finish_date: None,
            created_date: Utc::now(),
        }
    }

    #[test]
    fn fetch_success_replaces_the_list_wholesale() {
        let mut store = RequestStore::new();
        store.apply(StoreEvent::FetchStart).expect("fetch start");
        assert!(store.is_loading());

        store
            .apply(StoreEvent::FetchSuccess(vec![
                request("R-1", ProcessStatus::ReadyForValuation),
                request("R-2", ProcessStatus::Completed),
            ]))
            .expect("fetch success");
        assert_eq!(store.requests().len(), 2);
        assert!(!store.is_loading());

        store
            .apply(StoreEvent::FetchSuccess(vec![request("R-2", ProcessStatus::Sealing)]))
            .expect("second fetch");
        assert_eq!(store.requests().len(), 1);
        assert_eq!(store.requests()[0].process_status, ProcessStatus::Sealing);
    }

    #[test]
    fn duplicate_transition_start_is_rejected_until_settled() {
        let mut store = RequestStore::new();
        let id = RequestId("R-1".to_string());

        store.apply(StoreEvent::TransitionStart(id.clone())).expect("first start");
        let error = store
            .apply(StoreEvent::TransitionStart(id.clone()))
            .expect_err("second start must be rejected");
        assert_eq!(error, StoreError::TransitionInFlight(id.clone()));
        assert!(store.is_pending(&id));

        store.apply(StoreEvent::TransitionSuccess(id.clone())).expect("settle");
        assert!(!store.is_pending(&id));
        store.apply(StoreEvent::TransitionStart(id)).expect("restart after settle");
    }

    #[test]
    fn transition_events_never_mutate_the_request_list() {
        let mut store = RequestStore::new();
        store
            .apply(StoreEvent::FetchSuccess(vec![request("R-1", ProcessStatus::Completed)]))
            .expect("seed");
        let before = store.requests().to_vec();

        let id = RequestId("R-1".to_string());
        store.apply(StoreEvent::TransitionStart(id.clone())).expect("start");
        store.apply(StoreEvent::TransitionSuccess(id.clone())).expect("success");
        assert_eq!(store.requests(), before.as_slice());

        store.apply(StoreEvent::TransitionStart(id.clone())).expect("start again");
        store
            .apply(StoreEvent::TransitionFailure {
                id,
                message: "connection reset".to_string(),
            })
            .expect("failure");
        assert_eq!(store.requests(), before.as_slice());
        assert_eq!(store.last_error(), Some("connection reset"));
    }

    #[test]
    fn fetch_failure_keeps_the_previous_list() {
        let mut store = RequestStore::new();
        store
            .apply(StoreEvent::FetchSuccess(vec![request("R-1", ProcessStatus::Done)]))
            .expect("seed");

        store.apply(StoreEvent::FetchStart).expect("fetch start");
        store.apply(StoreEvent::FetchFailure("timeout".to_string())).expect("fetch failure");

        assert_eq!(store.requests().len(), 1);
        assert_eq!(store.last_error(), Some("timeout"));
        assert!(!store.is_loading());
    }

    #[test]
    fn refresh_does_not_release_pending_guards() {
        let mut store = RequestStore::new();
        let id = RequestId("R-1".to_string());
        store.apply(StoreEvent::TransitionStart(id.clone())).expect("start");

        store
            .apply(StoreEvent::FetchSuccess(vec![request("R-1", ProcessStatus::Completed)]))
            .expect("refresh while pending");
        assert!(store.is_pending(&id));
    }
}
