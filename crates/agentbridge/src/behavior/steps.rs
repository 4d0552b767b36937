//! Decision and terminal step batches.
//!
//! Every per-agent field of a batch has the agent count as its leading
//! dimension, so an empty batch has zero rows everywhere.

use super::{AgentId, BehaviorSpec};
use ndarray::{Array1, Array2, ArrayD, Axis, IxDyn};
use std::collections::HashMap;

fn empty_observations(spec: &BehaviorSpec) -> Vec<ArrayD<f32>> {
    spec.observation_shapes
        .iter()
        .map(|shape| {
            let mut dims = Vec::with_capacity(shape.len() + 1);
            dims.push(0);
            dims.extend_from_slice(shape);
            ArrayD::zeros(IxDyn(&dims))
        })
        .collect()
}

fn index_agents(agent_id: &Array1<AgentId>) -> HashMap<AgentId, usize> {
    agent_id.iter().enumerate().map(|(i, &id)| (id, i)).collect()
}

fn check_rows(obs: &[ArrayD<f32>], n: usize) {
    for o in obs {
        assert_eq!(o.shape().first(), Some(&n), "Observation rows must match agent count");
    }
}

/// Agents that need an action before the simulation can advance
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionSteps {
    /// One array per observation, shaped `[n_agents, ..obs_shape]`
    pub obs: Vec<ArrayD<f32>>,
    /// Reward accumulated since each agent's last action
    pub reward: Array1<f32>,
    pub agent_id: Array1<AgentId>,
    /// Per discrete branch, `[n_agents, branch_size]`; `true` masks the category out
    pub action_mask: Option<Vec<Array2<bool>>>,
    agent_id_to_index: HashMap<AgentId, usize>,
}

/// One agent's view of a [`DecisionSteps`] batch
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionStep {
    pub obs: Vec<ArrayD<f32>>,
    pub reward: f32,
    pub agent_id: AgentId,
    pub action_mask: Option<Vec<Array1<bool>>>,
}

impl DecisionSteps {
    pub fn new(
        obs: Vec<ArrayD<f32>>,
        reward: Array1<f32>,
        agent_id: Array1<AgentId>,
        action_mask: Option<Vec<Array2<bool>>>,
    ) -> Self {
        let n = agent_id.len();
        assert_eq!(reward.len(), n, "Reward length must match agent count");
        check_rows(&obs, n);
        if let Some(masks) = &action_mask {
            for m in masks {
                assert_eq!(m.nrows(), n, "Action mask rows must match agent count");
            }
        }
        Self {
            obs,
            reward,
            agent_id_to_index: index_agents(&agent_id),
            agent_id,
            action_mask,
        }
    }

    /// Batch with no agents, shaped after `spec`
    pub fn empty(spec: &BehaviorSpec) -> Self {
        Self::new(empty_observations(spec), Array1::zeros(0), Array1::zeros(0), None)
    }

    pub fn len(&self) -> usize {
        self.agent_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agent_id.is_empty()
    }

    /// Row of each agent id in this batch
    pub fn agent_id_to_index(&self) -> &HashMap<AgentId, usize> {
        &self.agent_id_to_index
    }

    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agent_id.iter().copied()
    }

    pub fn contains(&self, agent_id: AgentId) -> bool {
        self.agent_id_to_index.contains_key(&agent_id)
    }

    /// Extract the data of one agent
    pub fn get(&self, agent_id: AgentId) -> Option<DecisionStep> {
        let &idx = self.agent_id_to_index.get(&agent_id)?;
        Some(DecisionStep {
            obs: self
                .obs
                .iter()
                .map(|o| o.index_axis(Axis(0), idx).to_owned())
                .collect(),
            reward: self.reward[idx],
            agent_id,
            action_mask: self
                .action_mask
                .as_ref()
                .map(|masks| masks.iter().map(|m| m.row(idx).to_owned()).collect()),
        })
    }
}

/// Agents whose episode ended on the last step
#[derive(Clone, Debug, PartialEq)]
pub struct TerminalSteps {
    /// One array per observation, shaped `[n_agents, ..obs_shape]`
    pub obs: Vec<ArrayD<f32>>,
    pub reward: Array1<f32>,
    /// `true` when the episode hit an external limit rather than ending on its own
    pub interrupted: Array1<bool>,
    pub agent_id: Array1<AgentId>,
    agent_id_to_index: HashMap<AgentId, usize>,
}

/// One agent's view of a [`TerminalSteps`] batch
#[derive(Clone, Debug, PartialEq)]
pub struct TerminalStep {
    pub obs: Vec<ArrayD<f32>>,
    pub reward: f32,
    pub interrupted: bool,
    pub agent_id: AgentId,
}

impl TerminalSteps {
    pub fn new(
        obs: Vec<ArrayD<f32>>,
        reward: Array1<f32>,
        interrupted: Array1<bool>,
        agent_id: Array1<AgentId>,
    ) -> Self {
        let n = agent_id.len();
        assert_eq!(reward.len(), n, "Reward length must match agent count");
        assert_eq!(interrupted.len(), n, "Interrupted length must match agent count");
        check_rows(&obs, n);
        Self {
            obs,
            reward,
            interrupted,
            agent_id_to_index: index_agents(&agent_id),
            agent_id,
        }
    }

    /// Batch with no agents, shaped after `spec`
    pub fn empty(spec: &BehaviorSpec) -> Self {
        Self::new(
            empty_observations(spec),
            Array1::zeros(0),
            Array1::from_elem(0, false),
            Array1::zeros(0),
        )
    }

    pub fn len(&self) -> usize {
        self.agent_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agent_id.is_empty()
    }

    pub fn agent_id_to_index(&self) -> &HashMap<AgentId, usize> {
        &self.agent_id_to_index
    }

    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agent_id.iter().copied()
    }

    pub fn contains(&self, agent_id: AgentId) -> bool {
        self.agent_id_to_index.contains_key(&agent_id)
    }

    pub fn get(&self, agent_id: AgentId) -> Option<TerminalStep> {
        let &idx = self.agent_id_to_index.get(&agent_id)?;
        Some(TerminalStep {
            obs: self
                .obs
                .iter()
                .map(|o| o.index_axis(Axis(0), idx).to_owned())
                .collect(),
            reward: self.reward[idx],
            interrupted: self.interrupted[idx],
            agent_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    fn spec() -> BehaviorSpec {
        BehaviorSpec::discrete(vec![vec![3]], vec![2])
    }

    #[test]
    fn test_empty_batches_are_consistent() {
        let decisions = DecisionSteps::empty(&spec());
        assert!(decisions.is_empty());
        assert_eq!(decisions.obs[0].shape(), &[0, 3]);
        assert_eq!(decisions.reward.len(), 0);
        assert!(decisions.action_mask.is_none());

        let terminals = TerminalSteps::empty(&spec());
        assert_eq!(terminals.len(), 0);
        assert_eq!(terminals.obs[0].shape(), &[0, 3]);
        assert_eq!(terminals.interrupted.len(), 0);
    }

    #[test]
    fn test_decision_get_by_agent_id() {
        let decisions = DecisionSteps::new(
            vec![arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).into_dyn()],
            arr1(&[0.5, -1.0]),
            arr1(&[7, 3]),
            Some(vec![arr2(&[[false, true], [true, false]])]),
        );
        assert_eq!(decisions.len(), 2);
        assert_eq!(decisions.agent_id_to_index()[&3], 1);
        assert_eq!(decisions.agent_ids().collect::<Vec<_>>(), vec![7, 3]);

        let step = decisions.get(3).unwrap();
        assert_eq!(step.obs[0].as_slice().unwrap(), &[4.0, 5.0, 6.0]);
        assert_eq!(step.reward, -1.0);
        assert_eq!(step.action_mask.unwrap()[0], arr1(&[true, false]));
        assert!(decisions.get(1).is_none());
    }

    #[test]
    fn test_terminal_get_by_agent_id() {
        let terminals = TerminalSteps::new(
            vec![arr2(&[[0.1, 0.2, 0.3]]).into_dyn()],
            arr1(&[2.0]),
            arr1(&[true]),
            arr1(&[1]),
        );
        assert!(terminals.contains(1));
        let step = terminals.get(1).unwrap();
        assert!(step.interrupted);
        assert_eq!(step.reward, 2.0);
    }

    #[test]
    #[should_panic(expected = "Reward length must match agent count")]
    fn test_inconsistent_batch_panics() {
        DecisionSteps::new(
            vec![arr2(&[[1.0, 2.0, 3.0]]).into_dyn()],
            arr1(&[0.0, 0.0]),
            arr1(&[1]),
            None,
        );
    }
}
