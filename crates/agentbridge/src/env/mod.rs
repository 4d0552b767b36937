//! Single-agent environment interface.
//!
//! Provides the `GymEnv` trait wrapped by the adapter, plus a time-limit
//! wrapper that reports truncation.

mod traits;
mod wrappers;

pub use traits::{Action, EnvInfo, GymEnv, StepResult, TIME_LIMIT_TRUNCATED};
pub use wrappers::TimeLimit;
