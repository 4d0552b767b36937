//! # agentbridge
//!
//! Exposes a single-agent, Gym-style environment through a batched,
//! behavior-oriented multi-agent interface.
//!
//! ## Overview
//!
//! agentbridge provides:
//! - Gymnasium-compatible space descriptors (`Box`, `Discrete`, ...)
//! - The single-agent `GymEnv` trait and the `TimeLimit` wrapper
//! - The multi-agent `BaseEnv` interface: behavior specs, decision and
//!   terminal step batches, batched actions
//! - `GymAdapter`, which drives a `GymEnv` as one agent of one behavior
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use agentbridge::prelude::*;
//! use agentbridge_envs::Pendulum;
//!
//! let mut env = GymAdapter::new(Pendulum::new())?;
//! let name = env.behavior_name().to_string();
//!
//! // The first step starts an episode
//! env.step()?;
//! let (decisions, _) = env.get_steps(&name)?;
//! let action = env.behavior_specs()[&name].create_empty_action(decisions.len());
//! env.set_actions(&name, action)?;
//! env.step()?;
//! ```

pub mod adapter;
pub mod behavior;
pub mod config;
pub mod env;
pub mod spaces;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapter::{GymAdapter, AGENT_ID, DEFAULT_BEHAVIOR_NAME};
    pub use crate::behavior::{
        ActionBuffer, ActionType, AgentId, BaseEnv, BehaviorMapping, BehaviorName, BehaviorSpec,
        DecisionStep, DecisionSteps, TerminalStep, TerminalSteps,
    };
    pub use crate::config::AdapterConfig;
    pub use crate::env::{Action, EnvInfo, GymEnv, StepResult};
    pub use crate::spaces::{Box as BoxSpace, Discrete, DynSpace, MultiDiscrete, Tuple};
    pub use crate::{BridgeError, Result};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types for the library
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BridgeError {
    #[error("Unsupported action space: {0}")]
    ActionSpace(String),

    #[error("Unsupported observation space: {0}")]
    ObservationSpace(String),

    #[error(
        "The behavior {behavior} needs an input of dimension {expected:?} but received input of dimension {actual:?}"
    )]
    ActionShape {
        behavior: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Unknown behavior {actual:?}, this environment only exposes {expected:?}")]
    UnknownBehavior { expected: String, actual: String },

    #[error("Behavior {behavior:?} has no agent with id {agent_id}")]
    UnknownAgent { behavior: String, agent_id: i32 },

    #[error("No action was set for behavior {0:?} before stepping")]
    NoPendingAction(String),

    #[error("Environment is closed")]
    Closed,
}

impl BridgeError {
    /// Whether this error signals a caller bug (wrong behavior name or agent id)
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            BridgeError::UnknownBehavior { .. } | BridgeError::UnknownAgent { .. }
        )
    }
}

pub type Result<T> = core::result::Result<T, BridgeError>;
