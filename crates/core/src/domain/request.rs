use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle stage of an appraisal request. Variant strings are the exact
/// wire values the backend emits; parsing is strict — an unknown status is
/// a decode error, never silently coerced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessStatus {
    #[serde(rename = "Booking Appointment")]
    BookingAppointment,
    #[serde(rename = "Ready for valuation")]
    ReadyForValuation,
    #[serde(rename = "Start Valuated")]
    StartValuated,
    #[serde(rename = "Sent to Consulting")]
    SentToConsulting,
    #[serde(rename = "Valuated")]
    Valuated,
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Sealing")]
    Sealing,
    #[serde(rename = "Commitment")]
    Commitment,
    #[serde(rename = "Rejected Commitment")]
    RejectedCommitment,
    #[serde(rename = "Rejected Sealing")]
    RejectedSealing,
    #[serde(rename = "Done")]
    Done,
    #[serde(rename = "Approved")]
    Approved,
}

impl ProcessStatus {
    pub const ALL: [ProcessStatus; 12] = [
        Self::BookingAppointment,
        Self::ReadyForValuation,
        Self::StartValuated,
        Self::SentToConsulting,
        Self::Valuated,
        Self::Completed,
        Self::Sealing,
        Self::Commitment,
        Self::RejectedCommitment,
        Self::RejectedSealing,
        Self::Done,
        Self::Approved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BookingAppointment => "Booking Appointment",
            Self::ReadyForValuation => "Ready for valuation",
            Self::StartValuated => "Start Valuated",
            Self::SentToConsulting => "Sent to Consulting",
            Self::Valuated => "Valuated",
            Self::Completed => "Completed",
            Self::Sealing => "Sealing",
            Self::Commitment => "Commitment",
            Self::RejectedCommitment => "Rejected Commitment",
            Self::RejectedSealing => "Rejected Sealing",
            Self::Done => "Done",
            Self::Approved => "Approved",
        }
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value.trim())
            .ok_or_else(|| DomainError::UnknownStatus(value.to_string()))
    }

    /// The request has passed through `Completed` at some point. Only these
    /// statuses may legitimately carry a finish date.
    pub fn passed_completion(&self) -> bool {
        matches!(
            self,
            Self::Completed
                | Self::Sealing
                | Self::Commitment
                | Self::RejectedSealing
                | Self::RejectedCommitment
                | Self::Done
                | Self::Approved
        )
    }
}

impl std::fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceTier {
    #[serde(rename = "Basic Valuation")]
    BasicValuation,
    #[serde(rename = "Advanced Valuation")]
    AdvancedValuation,
}

impl ServiceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BasicValuation => "Basic Valuation",
            Self::AdvancedValuation => "Advanced Valuation",
        }
    }
}

/// One customer's diamond submitted for appraisal. Created by the backend;
/// the client never assigns ids and never deletes requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: RequestId,
    pub process_status: ProcessStatus,
    pub service_name: ServiceTier,
    pub finish_date: Option<DateTime<Utc>>,
    pub created_date: DateTime<Utc>,
}

impl Request {
    /// Whole days elapsed since the finish date, if one is set.
    pub fn days_since_finish(&self, now: DateTime<Utc>) -> Option<i64> {
        self.finish_date.map(|finish| now.signed_duration_since(finish).num_days())
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.finish_date.is_some() && !self.process_status.passed_completion() {
            return Err(DomainError::InvariantViolation(format!(
                "request `{}` carries a finish date in pre-completion status `{}`",
                self.id, self.process_status
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::{ProcessStatus, Request, RequestId, ServiceTier};
    use crate::errors::DomainError;

    #[test]
    fn status_round_trips_through_wire_encoding() {
        for status in ProcessStatus::ALL {
            let decoded = ProcessStatus::parse(status.as_str()).expect("known status");
            assert_eq!(decoded, status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let error = ProcessStatus::parse("Mislabeled").expect_err("unknown status must fail");
        assert!(matches!(error, DomainError::UnknownStatus(ref value) if value == "Mislabeled"));
    }

    #[test]
    fn serde_uses_backend_wire_strings() {
        let json = serde_json::to_string(&ProcessStatus::ReadyForValuation).expect("serialize");
        assert_eq!(json, "\"Ready for valuation\"");

        let decoded: ProcessStatus =
            serde_json::from_str("\"Rejected Sealing\"").expect("deserialize");
        assert_eq!(decoded, ProcessStatus::RejectedSealing);
    }

    #[test]
    fn finish_date_before_completion_violates_invariant() {
        let request = Request {
            id: RequestId("R-77".to_string()),
            process_status: ProcessStatus::ReadyForValuation,
            service_name: ServiceTier::BasicValuation,
            finish_date: Some(Utc::now()),
            created_date: Utc::now(),
        };

        let error = request.validate().expect_err("finish date requires completion");
        assert!(matches!(error, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn days_since_finish_counts_whole_days() {
        let now = Utc::now();
        let request = Request {
            id: RequestId("R-1".to_string()),
            process_status: ProcessStatus::Completed,
            service_name: ServiceTier::AdvancedValuation,
            finish_date: Some(now - Duration::days(7) - Duration::hours(6)),
            created_date: now - Duration::days(20),
        };

        assert_eq!(request.days_since_finish(now), Some(7));
    }
}
