pub mod engine;
pub mod states;

pub use engine::{LifecycleEngine, TransitionError};
pub use states::{StaffAction, TransitionOutcome, SAMPLE_PICKUP_WINDOW_DAYS};
