//! Multi-armed bandit environment.

use agentbridge::env::{Action, EnvInfo, GymEnv, StepResult};
use agentbridge::spaces::{Box as BoxSpace, Discrete, DynSpace};
use ndarray::{ArrayD, IxDyn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Multi-armed bandit environment
///
/// Every episode is a single pull. The winning arm is fixed by a seed so all
/// instances agree on it.
pub struct Bandit {
    num_actions: usize,
    reward_noise: f32,
    solution_idx: usize,
    rng: StdRng,
}

impl Bandit {
    pub fn new(num_actions: usize) -> Self {
        Self::with_config(num_actions, 0.0, 42)
    }

    pub fn with_config(num_actions: usize, reward_noise: f32, solution_seed: u64) -> Self {
        let mut seed_rng = StdRng::seed_from_u64(solution_seed);
        let solution_idx = seed_rng.gen_range(0..num_actions);

        Self {
            num_actions,
            reward_noise,
            solution_idx,
            rng: StdRng::from_entropy(),
        }
    }

    /// Index of the arm that pays out
    pub fn solution(&self) -> usize {
        self.solution_idx
    }
}

impl GymEnv for Bandit {
    fn observation_space(&self) -> DynSpace {
        DynSpace::Box(BoxSpace::uniform(&[1], -1.0, 1.0))
    }

    fn action_space(&self) -> DynSpace {
        DynSpace::Discrete(Discrete::new(self.num_actions))
    }

    fn reset(&mut self, seed: Option<u64>) -> (ArrayD<f32>, EnvInfo) {
        if let Some(s) = seed {
            self.rng = StdRng::seed_from_u64(s);
        }
        (ArrayD::from_elem(IxDyn(&[1]), 1.0), EnvInfo::new())
    }

    fn step(&mut self, action: &Action) -> StepResult {
        let arm = action.as_discrete().unwrap_or(-1);
        let correct = usize::try_from(arm).map_or(false, |a| a == self.solution_idx);
        let mut reward = if correct { 1.0 } else { 0.0 };

        if self.reward_noise > 0.0 {
            let noise: f32 = self.rng.gen::<f32>() * 2.0 - 1.0;
            reward += noise * self.reward_noise;
        }

        StepResult {
            observation: ArrayD::from_elem(IxDyn(&[1]), 1.0),
            reward,
            terminated: true,
            truncated: false,
            info: EnvInfo::new().with_extra("score", if correct { 1.0 } else { 0.0 }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bandit_pays_only_solution() {
        let mut env = Bandit::new(4);
        env.reset(Some(42));

        for arm in 0..4 {
            let result = env.step(&Action::Discrete(arm));
            assert!(result.terminated);
            let expected = if arm as usize == env.solution() { 1.0 } else { 0.0 };
            assert_eq!(result.reward, expected);
            assert_eq!(result.info.get("score"), Some(expected));
        }
    }

    #[test]
    fn test_bandit_solution_is_seeded() {
        assert_eq!(Bandit::new(10).solution(), Bandit::new(10).solution());
    }
}
