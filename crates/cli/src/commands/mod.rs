pub mod act;
pub mod config;
pub mod doctor;
pub mod list;
pub mod show;

use serde::Serialize;

use gemflow_client::{HttpBackendApi, RequestService};
use gemflow_core::config::{AppConfig, LoadOptions};
use gemflow_core::{ClientError, Credentials, InMemoryAuditSink};
use secrecy::ExposeSecret;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

pub(crate) fn error_class(error: &ClientError) -> &'static str {
    match error {
        ClientError::Domain(_) => "invalid_transition",
        ClientError::Network(_) => "network",
        ClientError::TransitionFailed(_) => "transition_failed",
        ClientError::TransitionInFlight(_) => "transition_in_flight",
        ClientError::Validation(_) => "validation",
        ClientError::Authorization(_) => "authorization",
    }
}

/// Build a service against the configured backend and log in when the
/// config carries credentials. Commands that need a session surface the
/// authorization error themselves on the first real call.
pub(crate) async fn connect(
) -> Result<RequestService<HttpBackendApi, InMemoryAuditSink>, String> {
    let config =
        AppConfig::load(LoadOptions::default()).map_err(|error| error.to_string())?;
    let api = HttpBackendApi::new(&config.api)
        .map_err(|error| format!("could not build backend client: {error}"))?;
    let mut service = RequestService::new(api, InMemoryAuditSink::default());

    if let Ok((username, password)) = config.credentials() {
        let credentials = Credentials::new(username, password.expose_secret().to_string());
        service
            .login(&credentials)
            .await
            .map_err(|error| format!("login failed: {error} ({})", error.user_message()))?;
    }

    Ok(service)
}
