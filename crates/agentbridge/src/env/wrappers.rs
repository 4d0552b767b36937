//! Wrappers layered over a `GymEnv`.

use super::{Action, EnvInfo, GymEnv, StepResult};
use crate::spaces::DynSpace;
use ndarray::ArrayD;

/// Wrapper that truncates episodes after a fixed number of steps.
///
/// A step that hits the limit without the inner environment terminating is
/// reported with `truncated = true`, which the adapter surfaces as an
/// interrupted terminal step.
pub struct TimeLimit<E: GymEnv> {
    env: E,
    max_steps: u32,
    elapsed: u32,
}

impl<E: GymEnv> TimeLimit<E> {
    pub fn new(env: E, max_steps: u32) -> Self {
        assert!(max_steps > 0, "TimeLimit needs at least one step");
        Self {
            env,
            max_steps,
            elapsed: 0,
        }
    }

    /// Steps taken in the current episode
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }
}

impl<E: GymEnv> GymEnv for TimeLimit<E> {
    fn observation_space(&self) -> DynSpace {
        self.env.observation_space()
    }

    fn action_space(&self) -> DynSpace {
        self.env.action_space()
    }

    fn reset(&mut self, seed: Option<u64>) -> (ArrayD<f32>, EnvInfo) {
        self.elapsed = 0;
        self.env.reset(seed)
    }

    fn step(&mut self, action: &Action) -> StepResult {
        let mut result = self.env.step(action);
        self.elapsed += 1;
        if self.elapsed >= self.max_steps && !result.terminated {
            result.truncated = true;
        }
        result
    }

    fn close(&mut self) {
        self.env.close()
    }
}
