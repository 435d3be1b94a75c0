use serde::{Deserialize, Serialize};

use crate::domain::request::ProcessStatus;

/// Days a customer has to collect the sample after completion before the
/// consulting staff escalates from a commitment to a sealing request.
pub const SAMPLE_PICKUP_WINDOW_DAYS: i64 = 7;

/// Staff actions that drive the lifecycle. Each maps to exactly one backend
/// transition endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffAction {
    SendToValuationStaff,
    CustomerTookSample,
    RequestSealing,
    RequestCommitment,
}

impl StaffAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SendToValuationStaff => "send_to_valuation_staff",
            Self::CustomerTookSample => "customer_took_sample",
            Self::RequestSealing => "request_sealing",
            Self::RequestCommitment => "request_commitment",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "send_to_valuation_staff" => Some(Self::SendToValuationStaff),
            "customer_took_sample" => Some(Self::CustomerTookSample),
            "request_sealing" => Some(Self::RequestSealing),
            "request_commitment" => Some(Self::RequestCommitment),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    pub from: ProcessStatus,
    pub to: ProcessStatus,
    pub action: StaffAction,
}
