//! Multi-agent, behavior-oriented environment interface.
//!
//! A *behavior* groups agents that share one [`BehaviorSpec`]. Each step the
//! environment reports two disjoint batches: agents awaiting a decision
//! ([`DecisionSteps`]) and agents whose episode just ended
//! ([`TerminalSteps`]). Actions are submitted per behavior as a batch with one
//! row per agent in the decision batch.

mod action;
mod spec;
mod steps;

pub use action::ActionBuffer;
pub use spec::{ActionType, BehaviorSpec};
pub use steps::{DecisionStep, DecisionSteps, TerminalStep, TerminalSteps};

use crate::Result;
use std::collections::HashMap;

pub type BehaviorName = String;
pub type AgentId = i32;

/// Behavior name to spec, as returned by [`BaseEnv::behavior_specs`]
pub type BehaviorMapping = HashMap<BehaviorName, BehaviorSpec>;

/// Environment interface consumed by a training harness.
pub trait BaseEnv {
    /// Specs of every behavior this environment exposes
    fn behavior_specs(&self) -> BehaviorMapping;

    /// Advance the simulation by one step, consuming pending actions
    fn step(&mut self) -> Result<()>;

    /// Restart the simulation
    fn reset(&mut self) -> Result<()>;

    /// Release the environment's resources
    fn close(&mut self) -> Result<()>;

    /// Submit actions for every agent of `behavior_name` in the current
    /// decision batch, one row per agent
    fn set_actions(&mut self, behavior_name: &str, action: ActionBuffer) -> Result<()>;

    /// Submit the action of a single agent
    fn set_action_for_agent(
        &mut self,
        behavior_name: &str,
        agent_id: AgentId,
        action: ActionBuffer,
    ) -> Result<()>;

    /// Current decision and terminal batches of `behavior_name`
    fn get_steps(&self, behavior_name: &str) -> Result<(&DecisionSteps, &TerminalSteps)>;
}
