//! Behavior specs.

use super::ActionBuffer;
use ndarray::{Array2, IxDyn};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionType {
    Discrete,
    Continuous,
}

/// Observation and action layout shared by every agent of a behavior
#[derive(Clone, Debug, PartialEq)]
pub struct BehaviorSpec {
    /// Shape of each observation, without the agent dimension
    pub observation_shapes: Vec<Vec<usize>>,
    pub action_type: ActionType,
    /// Continuous: `[vector length]`. Discrete: category count per branch.
    pub action_shape: Vec<usize>,
}

impl BehaviorSpec {
    pub fn continuous(observation_shapes: Vec<Vec<usize>>, size: usize) -> Self {
        Self {
            observation_shapes,
            action_type: ActionType::Continuous,
            action_shape: vec![size],
        }
    }

    pub fn discrete(observation_shapes: Vec<Vec<usize>>, branches: Vec<usize>) -> Self {
        assert!(!branches.is_empty(), "Discrete behavior needs at least one branch");
        Self {
            observation_shapes,
            action_type: ActionType::Discrete,
            action_shape: branches,
        }
    }

    pub fn is_action_continuous(&self) -> bool {
        self.action_type == ActionType::Continuous
    }

    pub fn is_action_discrete(&self) -> bool {
        self.action_type == ActionType::Discrete
    }

    /// Continuous vector length, or total category count over all branches
    pub fn action_size(&self) -> usize {
        self.action_shape.iter().sum()
    }

    /// Columns per agent in an action batch.
    ///
    /// Continuous actions take one column per vector element, discrete actions
    /// one category index per branch.
    pub fn action_dim(&self) -> usize {
        match self.action_type {
            ActionType::Continuous => self.action_shape[0],
            ActionType::Discrete => self.action_shape.len(),
        }
    }

    /// Category counts per branch, `None` for continuous behaviors
    pub fn discrete_action_branches(&self) -> Option<&[usize]> {
        match self.action_type {
            ActionType::Discrete => Some(&self.action_shape),
            ActionType::Continuous => None,
        }
    }

    /// Zero-filled action batch for `n_agents` agents
    pub fn create_empty_action(&self, n_agents: usize) -> ActionBuffer {
        let shape = IxDyn(&[n_agents, self.action_dim()]);
        match self.action_type {
            ActionType::Continuous => ActionBuffer::Float32(ndarray::ArrayD::zeros(shape)),
            ActionType::Discrete => ActionBuffer::Int32(ndarray::ArrayD::zeros(shape)),
        }
    }

    /// Random action batch: continuous values in [-1, 1], discrete indices
    /// uniform within each branch
    pub fn create_random_action<R: Rng>(&self, n_agents: usize, rng: &mut R) -> ActionBuffer {
        let dim = self.action_dim();
        match self.action_type {
            ActionType::Continuous => {
                let dist = Uniform::new_inclusive(-1.0f32, 1.0);
                let batch = Array2::from_shape_fn((n_agents, dim), |_| dist.sample(rng));
                ActionBuffer::Float32(batch.into_dyn())
            }
            ActionType::Discrete => {
                let branches = &self.action_shape;
                let batch =
                    Array2::from_shape_fn((n_agents, dim), |(_, b)| rng.gen_range(0..branches[b]) as i32);
                ActionBuffer::Int32(batch.into_dyn())
            }
        }
    }
}
