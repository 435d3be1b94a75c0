use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use gemflow_core::config::ApiConfig;
use gemflow_core::{
    ApprovalKind, Credentials, ProcessStatus, Request, RequestId, ServiceTier, StaffAction,
    UserRole, UserSession, ValuationResult,
};

use crate::api::{ApiError, BackendApi, TransitionAck};

/// Backend process id for the "Valuated" stage, sent before the grading
/// report itself.
const VALUATED_PROCESS_ID: u32 = 5;

/// Production transport. Sessions are cookie-based: the jar is attached to
/// the underlying client at construction and every call carries it.
pub struct HttpBackendApi {
    base_url: String,
    http: Client,
}

impl HttpBackendApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| ApiError::Transport(error.to_string()))?;

        Ok(Self { base_url: config.base_url.trim_end_matches('/').to_string(), http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response =
            builder.send().await.map_err(|error| ApiError::Transport(error.to_string()))?;
        check_status(response).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response.json::<T>().await.map_err(|error| ApiError::Decode(error.to_string()))
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = read_error_message(response).await;
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ApiError::Unauthorized(message));
    }
    Err(ApiError::Backend(format!("{status}: {message}")))
}

async fn read_error_message(response: Response) -> String {
    #[derive(Deserialize)]
    struct WireError {
        message: String,
    }

    match response.json::<WireError>().await {
        Ok(wire) => wire.message,
        Err(_) => "no error detail provided".to_string(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    request_id: String,
    process_status: ProcessStatus,
    service_name: ServiceTier,
    #[serde(default)]
    finish_date: Option<DateTime<Utc>>,
    created_date: DateTime<Utc>,
}

impl WireRequest {
    fn into_domain(self) -> Result<Request, ApiError> {
        let request = Request {
            id: RequestId(self.request_id),
            process_status: self.process_status,
            service_name: self.service_name,
            finish_date: self.finish_date,
            created_date: self.created_date,
        };
        request.validate().map_err(|error| ApiError::Decode(error.to_string()))?;
        Ok(request)
    }
}

#[derive(Debug, Deserialize)]
struct WireRequestList {
    data: Vec<WireRequest>,
}

#[derive(Debug, Deserialize)]
struct WireRequestDetail {
    request: Vec<WireRequest>,
}

#[derive(Debug, Deserialize)]
struct WireLogin {
    user: WireUser,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    id: String,
    username: String,
    role: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireValuationAck {
    err_code: i64,
    message: String,
}

#[async_trait]
impl BackendApi for HttpBackendApi {
    async fn login(&self, credentials: &Credentials) -> Result<UserSession, ApiError> {
        debug!(event_name = "api.login", username = %credentials.username, "logging in");
        let response = self
            .send(self.http.post(self.url("api/login")).json(&json!({
                "username": credentials.username,
                "password": credentials.password.expose_secret(),
            })))
            .await?;

        let wire: WireLogin = Self::decode(response).await?;
        let role = UserRole::parse(&wire.user.role)
            .map_err(|_| ApiError::Unauthorized(format!("role `{}` is not allowed", wire.user.role)))?;

        Ok(UserSession { user_id: wire.user.id, username: wire.user.username, role })
    }

    async fn list_requests(&self) -> Result<Vec<Request>, ApiError> {
        let response = self.send(self.http.get(self.url("api/take-request"))).await?;
        let wire: WireRequestList = Self::decode(response).await?;
        wire.data.into_iter().map(WireRequest::into_domain).collect()
    }

    async fn get_request(&self, id: &RequestId) -> Result<Request, ApiError> {
        let response =
            self.send(self.http.get(self.url(&format!("api/requests/{}", id.0)))).await?;
        let wire: WireRequestDetail = Self::decode(response).await?;
        wire.request
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Decode(format!("request `{id}` detail payload was empty")))?
            .into_domain()
    }

    async fn transition(
        &self,
        id: &RequestId,
        action: StaffAction,
        note: Option<&str>,
    ) -> Result<TransitionAck, ApiError> {
        debug!(event_name = "api.transition", request_id = %id, action = action.as_str(), "issuing transition");
        let builder = match action {
            StaffAction::SendToValuationStaff => self
                .http
                .post(self.url("api/send-diamond-to-valuationStaff"))
                .json(&json!({ "requestId": id.0 })),
            StaffAction::CustomerTookSample => self
                .http
                .post(self.url("api/customer-took-sample"))
                .json(&json!({ "requestId": id.0 })),
            StaffAction::RequestSealing | StaffAction::RequestCommitment => {
                let kind = if action == StaffAction::RequestSealing {
                    ApprovalKind::Sealing
                } else {
                    ApprovalKind::Commitment
                };
                self.http.post(self.url("api/request-approval")).json(&json!({
                    "requestId": id.0,
                    "requestType": kind.as_str(),
                    "description": note.unwrap_or_else(|| kind.default_description()),
                }))
            }
        };

        let response = self.send(builder).await?;
        Self::decode(response).await
    }

    async fn submit_valuation(
        &self,
        id: &RequestId,
        valuation: &ValuationResult,
    ) -> Result<TransitionAck, ApiError> {
        // The stage change is acknowledged before the grading report goes up.
        let _ = self
            .send(
                self.http
                    .put(self.url(&format!("api/changeProcess/{}", id.0)))
                    .json(&json!({ "processId": VALUATED_PROCESS_ID })),
            )
            .await?;

        let response = self
            .send(self.http.put(self.url(&format!("api/valuation/{}", id.0))).json(valuation))
            .await?;
        let ack: WireValuationAck = Self::decode(response).await?;
        if ack.err_code != 0 {
            return Err(ApiError::Backend(ack.message));
        }
        Ok(TransitionAck { message: ack.message })
    }
}
