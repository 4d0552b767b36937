//! Single-agent environment trait definitions.

use crate::spaces::DynSpace;
use ndarray::ArrayD;

/// Info key set by Gym-style time limits that cut an episode short.
///
/// Environments that report truncation only through `info` set this to a
/// non-zero value; the adapter treats it like `StepResult::truncated`.
pub const TIME_LIMIT_TRUNCATED: &str = "TimeLimit.truncated";

/// Named scalar side-channel returned with each reset and step
#[derive(Clone, Debug, Default)]
pub struct EnvInfo {
    pub extra: smallvec::SmallVec<[(&'static str, f32); 4]>,
}

impl EnvInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extra(mut self, key: &'static str, value: f32) -> Self {
        self.extra.push((key, value));
        self
    }

    pub fn get(&self, key: &str) -> Option<f32> {
        self.extra.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    /// True when `key` is present and non-zero
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).map_or(false, |v| v != 0.0)
    }
}

/// Action handed to a single-agent environment.
///
/// Discrete spaces receive a category index, `Box` spaces a vector in the
/// environment's native range.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Discrete(i32),
    Continuous(ArrayD<f32>),
}

impl Action {
    pub fn as_discrete(&self) -> Option<i32> {
        match self {
            Action::Discrete(a) => Some(*a),
            Action::Continuous(_) => None,
        }
    }

    pub fn as_continuous(&self) -> Option<&ArrayD<f32>> {
        match self {
            Action::Discrete(_) => None,
            Action::Continuous(a) => Some(a),
        }
    }
}

/// Result from a single environment step
#[derive(Clone, Debug)]
pub struct StepResult {
    /// Observation after the step
    pub observation: ArrayD<f32>,
    /// Reward received
    pub reward: f32,
    /// Whether the task's own termination condition was reached
    pub terminated: bool,
    /// Whether the episode was cut short by an external limit (time budget, etc.)
    pub truncated: bool,
    /// Additional info
    pub info: EnvInfo,
}

impl StepResult {
    /// Check if episode is done (terminated or truncated)
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// A Gym-style environment with one implicit agent.
///
/// # Example
///
/// ```rust,ignore
/// use agentbridge::env::{Action, EnvInfo, GymEnv, StepResult};
/// use agentbridge::spaces::{Box as BoxSpace, Discrete, DynSpace};
///
/// struct MyEnv {
///     state: f32,
/// }
///
/// impl GymEnv for MyEnv {
///     fn observation_space(&self) -> DynSpace {
///         DynSpace::Box(BoxSpace::uniform(&[1], -1.0, 1.0))
///     }
///
///     fn action_space(&self) -> DynSpace {
///         DynSpace::Discrete(Discrete::new(2))
///     }
///
///     fn reset(&mut self, seed: Option<u64>) -> (ArrayD<f32>, EnvInfo) {
///         self.state = 0.0;
///         (ArrayD::from_elem(IxDyn(&[1]), self.state), EnvInfo::new())
///     }
///
///     fn step(&mut self, action: &Action) -> StepResult {
///         // ... implement step logic
///     }
/// }
/// ```
pub trait GymEnv: Send {
    /// Get the observation space
    fn observation_space(&self) -> DynSpace;

    /// Get the action space
    fn action_space(&self) -> DynSpace;

    /// Reset the environment to its initial state
    ///
    /// # Arguments
    /// * `seed` - Optional random seed for reproducibility
    fn reset(&mut self, seed: Option<u64>) -> (ArrayD<f32>, EnvInfo);

    /// Take a single step in the environment
    fn step(&mut self, action: &Action) -> StepResult;

    /// Optional: Close the environment and free resources
    fn close(&mut self) {}
}

impl<E: GymEnv + ?Sized> GymEnv for std::boxed::Box<E> {
    fn observation_space(&self) -> DynSpace {
        (**self).observation_space()
    }

    fn action_space(&self) -> DynSpace {
        (**self).action_space()
    }

    fn reset(&mut self, seed: Option<u64>) -> (ArrayD<f32>, EnvInfo) {
        (**self).reset(seed)
    }

    fn step(&mut self, action: &Action) -> StepResult {
        (**self).step(action)
    }

    fn close(&mut self) {
        (**self).close()
    }
}
