pub mod audit;
pub mod config;
pub mod domain;
pub mod errors;
pub mod lifecycle;
pub mod store;

pub use audit::{
    AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink, InMemoryAuditSink,
};
pub use domain::approval::ApprovalKind;
pub use domain::request::{ProcessStatus, Request, RequestId, ServiceTier};
pub use domain::session::{Credentials, UserRole, UserSession};
pub use domain::valuation::{DiamondShape, ValuationDraft, ValuationResult};
pub use errors::{ClientError, DomainError};
pub use lifecycle::{
    LifecycleEngine, StaffAction, TransitionError, TransitionOutcome, SAMPLE_PICKUP_WINDOW_DAYS,
};
pub use store::{RequestStore, StoreError, StoreEvent};
