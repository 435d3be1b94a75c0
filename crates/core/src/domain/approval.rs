use serde::{Deserialize, Serialize};

/// Post-completion approvals a consulting staff member can ask for. Sealing
/// applies once the customer has left the sample uncollected past the pickup
/// window; commitment applies while the window is still open. The ask
/// travels as a kind plus a free-text description.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalKind {
    Sealing,
    Commitment,
}

impl ApprovalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sealing => "Sealing",
            Self::Commitment => "Commitment",
        }
    }

    pub fn default_description(&self) -> &'static str {
        match self {
            Self::Sealing => "Requesting for sealing request.",
            Self::Commitment => "Requesting for commitment.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApprovalKind;

    #[test]
    fn kinds_carry_wire_names_and_descriptions() {
        assert_eq!(ApprovalKind::Sealing.as_str(), "Sealing");
        assert_eq!(ApprovalKind::Commitment.as_str(), "Commitment");
        assert!(ApprovalKind::Sealing.default_description().contains("sealing"));
        assert!(ApprovalKind::Commitment.default_description().contains("commitment"));
    }
}
