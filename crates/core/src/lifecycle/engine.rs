use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink};
use crate::domain::request::{ProcessStatus, Request};
use crate::lifecycle::states::{StaffAction, TransitionOutcome, SAMPLE_PICKUP_WINDOW_DAYS};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("action {action:?} is not valid for status `{status}`")]
    InvalidTransition { status: ProcessStatus, action: StaffAction },
    #[error("action {action:?} requires a different pickup window ({days_since_finish} days since finish)")]
    OutsideWindow { action: StaffAction, days_since_finish: i64 },
    #[error("action {action:?} requires a finish date, which the request does not carry")]
    MissingFinishDate { action: StaffAction },
}

/// The request-lifecycle state machine. Holds the transition table and the
/// rule deciding which action surfaces for a given request, so callers are a
/// pure function of `(status, finish_date) -> available actions`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LifecycleEngine;

impl LifecycleEngine {
    pub fn new() -> Self {
        Self
    }

    /// The sealing escalation applies once a completed request's finish date
    /// is more than `SAMPLE_PICKUP_WINDOW_DAYS` whole days in the past.
    pub fn sealing_eligible(&self, request: &Request, now: DateTime<Utc>) -> bool {
        request.process_status == ProcessStatus::Completed
            && request
                .days_since_finish(now)
                .is_some_and(|days| days > SAMPLE_PICKUP_WINDOW_DAYS)
    }

    /// The action offered in the main column of the staff worklist.
    pub fn primary_action(&self, request: &Request) -> Option<StaffAction> {
        match request.process_status {
            ProcessStatus::ReadyForValuation => Some(StaffAction::SendToValuationStaff),
            ProcessStatus::Completed | ProcessStatus::Sealing | ProcessStatus::Commitment => {
                Some(StaffAction::CustomerTookSample)
            }
            _ => None,
        }
    }

    /// The post-completion follow-up. Sealing eligibility is checked first;
    /// only when it fails does a completed request offer commitment. At most
    /// one follow-up action surfaces per request.
    pub fn followup_action(&self, request: &Request, now: DateTime<Utc>) -> Option<StaffAction> {
        if self.sealing_eligible(request, now) {
            Some(StaffAction::RequestSealing)
        } else if request.process_status == ProcessStatus::Completed {
            Some(StaffAction::RequestCommitment)
        } else {
            None
        }
    }

    pub fn available_actions(&self, request: &Request, now: DateTime<Utc>) -> Vec<StaffAction> {
        self.primary_action(request)
            .into_iter()
            .chain(self.followup_action(request, now))
            .collect()
    }

    /// Validate `action` against the request's current status and compute
    /// the resulting status. Pure: the caller adopts the new status only
    /// after the backend round trip succeeds.
    pub fn apply(
        &self,
        request: &Request,
        action: StaffAction,
        now: DateTime<Utc>,
    ) -> Result<TransitionOutcome, TransitionError> {
        use ProcessStatus::{Commitment, Completed, Done, ReadyForValuation, Sealing, StartValuated};

        let from = request.process_status;
        let to = match (from, action) {
            (ReadyForValuation, StaffAction::SendToValuationStaff) => StartValuated,
            (Completed | Sealing | Commitment, StaffAction::CustomerTookSample) => Done,
            (Completed, StaffAction::RequestSealing) => {
                match request.days_since_finish(now) {
                    Some(days) if days > SAMPLE_PICKUP_WINDOW_DAYS => Sealing,
                    Some(days) => {
                        return Err(TransitionError::OutsideWindow {
                            action,
                            days_since_finish: days,
                        })
                    }
                    None => return Err(TransitionError::MissingFinishDate { action }),
                }
            }
            (Completed, StaffAction::RequestCommitment) => {
                // Sealing takes precedence once the window has lapsed.
                match request.days_since_finish(now) {
                    Some(days) if days > SAMPLE_PICKUP_WINDOW_DAYS => {
                        return Err(TransitionError::OutsideWindow {
                            action,
                            days_since_finish: days,
                        })
                    }
                    _ => Commitment,
                }
            }
            (status, action) => return Err(TransitionError::InvalidTransition { status, action }),
        };

        Ok(TransitionOutcome { from, to, action })
    }

    pub fn apply_with_audit<S>(
        &self,
        request: &Request,
        action: StaffAction,
        now: DateTime<Utc>,
        sink: &S,
        audit: &AuditContext,
    ) -> Result<TransitionOutcome, TransitionError>
    where
        S: AuditSink,
    {
        let result = self.apply(request, action, now);
        match &result {
            Ok(outcome) => {
                sink.emit(
                    AuditEvent::new(
                        Some(request.id.clone()),
                        audit.correlation_id.clone(),
                        "lifecycle.transition_accepted",
                        AuditCategory::Lifecycle,
                        audit.actor.clone(),
                        AuditOutcome::Success,
                    )
                    .with_metadata("from", outcome.from.as_str())
                    .with_metadata("to", outcome.to.as_str())
                    .with_metadata("action", outcome.action.as_str()),
                );
            }
            Err(error) => {
                sink.emit(
                    AuditEvent::new(
                        Some(request.id.clone()),
                        audit.correlation_id.clone(),
                        "lifecycle.transition_rejected",
                        AuditCategory::Lifecycle,
                        audit.actor.clone(),
                        AuditOutcome::Rejected,
                    )
                    .with_metadata("action", action.as_str())
                    .with_metadata("error", error.to_string()),
                );
            }
        }
        result
    }
}
