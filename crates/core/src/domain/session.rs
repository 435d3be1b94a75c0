use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "Customer")]
    Customer,
    #[serde(rename = "Consulting Staff")]
    ConsultingStaff,
    #[serde(rename = "Valuation Staff")]
    ValuationStaff,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::ConsultingStaff => "Consulting Staff",
            Self::ValuationStaff => "Valuation Staff",
        }
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.trim() {
            "Customer" => Ok(Self::Customer),
            "Consulting Staff" => Ok(Self::ConsultingStaff),
            "Valuation Staff" => Ok(Self::ValuationStaff),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

/// Authenticated identity as echoed by the backend at login. The session
/// itself lives in the transport's cookie jar, never in this struct.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub user_id: String,
    pub username: String,
    pub role: UserRole,
}

#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into().into() }
    }
}
