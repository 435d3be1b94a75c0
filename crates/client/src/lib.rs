//! Backend integration for gemflow.
//!
//! This crate connects the lifecycle core to the valuation backend:
//! - **API contract** (`api`) - the abstract `BackendApi` operations the
//!   backend collaborator must provide
//! - **HTTP transport** (`http`) - reqwest implementation with cookie-based
//!   session credentials
//! - **Session state** (`session`) - reducer-style auth container
//! - **Request service** (`service`) - coordinates store, engine, and API;
//!   owns the no-optimistic-mutation and duplicate-submission rules
//!
//! # Key Types
//!
//! - `BackendApi` - trait for the remote REST surface
//! - `HttpBackendApi` - production transport (cookie jar, timeouts)
//! - `RequestService` - the operation surface command front ends call

pub mod api;
pub mod http;
pub mod service;
pub mod session;

pub use api::{ApiError, BackendApi, TransitionAck};
pub use http::HttpBackendApi;
pub use service::RequestService;
pub use session::{AuthEvent, AuthState};
