//! Drive a single-agent [`GymEnv`] through the multi-agent [`BaseEnv`] interface.
//!
//! The adapter exposes one behavior with one agent (id [`AGENT_ID`]).
//! Observations are divided by a per-element ratio derived from the observation
//! space bounds. Continuous actions are divided by the matching ratio of the
//! action space before they reach the environment; discrete actions pass
//! through as category indices.
//!
//! Episode flow:
//!
//! ```text
//!   new() ──► FRESH ──step()/reset()──► RUNNING ──step(), not done──► RUNNING
//!               ▲                          │
//!               └───────step(), done───────┘
//! ```
//!
//! A `step()` while FRESH starts a new episode instead of advancing, so a
//! harness can keep calling `step()` across episode boundaries.

use crate::behavior::{
    ActionBuffer, AgentId, BaseEnv, BehaviorMapping, BehaviorSpec, DecisionSteps, TerminalSteps,
};
use crate::config::AdapterConfig;
use crate::env::{Action, GymEnv, TIME_LIMIT_TRUNCATED};
use crate::spaces::DynSpace;
use crate::{BridgeError, Result};
use ndarray::{Array1, ArrayD, Axis, IxDyn};

/// Behavior name used when none is configured
pub const DEFAULT_BEHAVIOR_NAME: &str = "gym_behavior_name";

/// Id of the single agent
pub const AGENT_ID: AgentId = 1;

/// How submitted actions map onto the environment's action space
#[derive(Clone, Debug)]
enum ActionKind {
    /// Native action = submitted row / ratio, in the action space's shape
    Continuous { ratio: ArrayD<f32>, size: usize },
    Discrete { count: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// No episode in progress: the next step resets
    Fresh,
    Running,
    Closed,
}

/// Multi-agent view of a single-agent environment.
pub struct GymAdapter<E: GymEnv> {
    env: E,
    behavior_name: String,
    /// Seed for the first reset, taken on use
    seed: Option<u64>,
    spec: BehaviorSpec,
    action_kind: ActionKind,
    obs_ratio: ArrayD<f32>,
    pending_action: Option<Action>,
    current_steps: (DecisionSteps, TerminalSteps),
    phase: Phase,
}

impl<E: GymEnv> GymAdapter<E> {
    /// Wrap `env` under the default behavior name
    pub fn new(env: E) -> Result<Self> {
        Self::with_config(env, AdapterConfig::default())
    }

    /// Wrap `env` under `name`
    pub fn with_name(env: E, name: impl Into<String>) -> Result<Self> {
        Self::with_config(env, AdapterConfig::new().with_behavior_name(name))
    }

    /// Wrap `env` with a full configuration
    ///
    /// Fails if the action space is neither `Box` nor `Discrete`, or if the
    /// observation space is not `Box`. The action space is checked first.
    pub fn with_config(env: E, config: AdapterConfig) -> Result<Self> {
        let action_kind = match env.action_space() {
            DynSpace::Box(space) => ActionKind::Continuous {
                size: space.shape().iter().product(),
                ratio: space.scale_ratio(),
            },
            DynSpace::Discrete(space) => ActionKind::Discrete { count: space.n },
            other => {
                return Err(BridgeError::ActionSpace(format!(
                    "{} {:?}",
                    other.kind(),
                    other.shape()
                )))
            }
        };

        let obs_space = match env.observation_space() {
            DynSpace::Box(space) => space,
            other => {
                return Err(BridgeError::ObservationSpace(format!(
                    "{} {:?}",
                    other.kind(),
                    other.shape()
                )))
            }
        };
        let obs_shape = obs_space.shape().to_vec();
        let obs_ratio = obs_space.scale_ratio();

        let spec = match &action_kind {
            ActionKind::Continuous { size, .. } => BehaviorSpec::continuous(vec![obs_shape], *size),
            ActionKind::Discrete { count } => BehaviorSpec::discrete(vec![obs_shape], vec![*count]),
        };

        tracing::debug!(
            behavior = %config.behavior_name,
            action_type = ?spec.action_type,
            action_size = spec.action_size(),
            obs_shape = ?spec.observation_shapes[0],
            "Created gym adapter"
        );

        let current_steps = (DecisionSteps::empty(&spec), TerminalSteps::empty(&spec));
        Ok(Self {
            env,
            behavior_name: config.behavior_name,
            seed: config.seed,
            spec,
            action_kind,
            obs_ratio,
            pending_action: None,
            current_steps,
            phase: Phase::Fresh,
        })
    }

    pub fn behavior_name(&self) -> &str {
        &self.behavior_name
    }

    pub fn spec(&self) -> &BehaviorSpec {
        &self.spec
    }

    /// Divisor applied to raw observations
    pub fn obs_ratio(&self) -> &ArrayD<f32> {
        &self.obs_ratio
    }

    /// Divisor applied to submitted continuous actions; `None` for discrete spaces
    pub fn action_ratio(&self) -> Option<&ArrayD<f32>> {
        match &self.action_kind {
            ActionKind::Continuous { ratio, .. } => Some(ratio),
            ActionKind::Discrete { .. } => None,
        }
    }

    /// Action the next step will apply, in the environment's native form
    pub fn pending_action(&self) -> Option<&Action> {
        self.pending_action.as_ref()
    }

    /// Whether the next step starts a new episode
    pub fn is_fresh(&self) -> bool {
        self.phase == Phase::Fresh
    }

    pub fn is_closed(&self) -> bool {
        self.phase == Phase::Closed
    }

    /// Get a reference to the wrapped environment
    pub fn inner(&self) -> &E {
        &self.env
    }

    fn ensure_open(&self) -> Result<()> {
        if self.phase == Phase::Closed {
            return Err(BridgeError::Closed);
        }
        Ok(())
    }

    fn check_behavior(&self, behavior_name: &str) -> Result<()> {
        if behavior_name != self.behavior_name {
            return Err(BridgeError::UnknownBehavior {
                expected: self.behavior_name.clone(),
                actual: behavior_name.to_string(),
            });
        }
        Ok(())
    }

    /// Scale a raw observation and add the leading agent dimension
    fn normalize_obs(&self, obs: ArrayD<f32>) -> Result<ArrayD<f32>> {
        if obs.shape() != self.obs_ratio.shape() {
            return Err(BridgeError::ShapeMismatch {
                expected: self.obs_ratio.shape().to_vec(),
                actual: obs.shape().to_vec(),
            });
        }
        Ok((obs / &self.obs_ratio).insert_axis(Axis(0)))
    }

    /// Turn one agent's action row into the environment's native action
    fn to_native(&self, row: ActionBuffer) -> Result<Action> {
        match &self.action_kind {
            ActionKind::Discrete { .. } => {
                let index = row.into_i32().iter().next().copied().unwrap_or_default();
                Ok(Action::Discrete(index))
            }
            ActionKind::Continuous { ratio, .. } => {
                let flat = row.into_f32();
                let native = ArrayD::from_shape_vec(IxDyn(ratio.shape()), flat.iter().copied().collect())
                    .map_err(|_| BridgeError::ShapeMismatch {
                        expected: ratio.shape().to_vec(),
                        actual: flat.shape().to_vec(),
                    })?;
                Ok(Action::Continuous(native / ratio))
            }
        }
    }

    fn start_episode(&mut self) -> Result<()> {
        let (obs, _info) = self.env.reset(self.seed.take());
        let obs = self.normalize_obs(obs)?;
        self.current_steps = (
            DecisionSteps::new(
                vec![obs],
                Array1::zeros(1),
                Array1::from_elem(1, AGENT_ID),
                None,
            ),
            TerminalSteps::empty(&self.spec),
        );
        self.phase = Phase::Running;
        tracing::debug!(behavior = %self.behavior_name, "Episode started");
        Ok(())
    }
}

impl<E: GymEnv> BaseEnv for GymAdapter<E> {
    fn behavior_specs(&self) -> BehaviorMapping {
        BehaviorMapping::from([(self.behavior_name.clone(), self.spec.clone())])
    }

    fn step(&mut self) -> Result<()> {
        match self.phase {
            Phase::Closed => return Err(BridgeError::Closed),
            Phase::Fresh => return self.start_episode(),
            Phase::Running => {}
        }

        let action = self
            .pending_action
            .as_ref()
            .ok_or_else(|| BridgeError::NoPendingAction(self.behavior_name.clone()))?;
        tracing::trace!(?action, "Stepping environment");
        let result = self.env.step(action);
        let done = result.done();
        let interrupted = result.truncated || result.info.flag(TIME_LIMIT_TRUNCATED);
        if done {
            // The episode is over even if its last observation is unusable
            self.phase = Phase::Fresh;
        }
        let obs = match self.normalize_obs(result.observation) {
            Ok(obs) => obs,
            Err(err) => {
                if done {
                    self.current_steps =
                        (DecisionSteps::empty(&self.spec), TerminalSteps::empty(&self.spec));
                }
                return Err(err);
            }
        };
        let reward = Array1::from_elem(1, result.reward);
        let agent_id = Array1::from_elem(1, AGENT_ID);

        self.current_steps = if done {
            tracing::debug!(
                behavior = %self.behavior_name,
                reward = result.reward,
                interrupted,
                "Episode ended"
            );
            (
                DecisionSteps::empty(&self.spec),
                TerminalSteps::new(vec![obs], reward, Array1::from_elem(1, interrupted), agent_id),
            )
        } else {
            (
                DecisionSteps::new(vec![obs], reward, agent_id, None),
                TerminalSteps::empty(&self.spec),
            )
        };
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.start_episode()
    }

    fn close(&mut self) -> Result<()> {
        if self.phase != Phase::Closed {
            self.env.close();
            self.phase = Phase::Closed;
            self.pending_action = None;
            tracing::debug!(behavior = %self.behavior_name, "Closed gym adapter");
        }
        Ok(())
    }

    fn set_actions(&mut self, behavior_name: &str, action: ActionBuffer) -> Result<()> {
        self.ensure_open()?;
        self.check_behavior(behavior_name)?;

        let n_agents = self.current_steps.0.len();
        if n_agents == 0 {
            tracing::debug!(
                behavior = %self.behavior_name,
                "Actions set while no agent awaits a decision, ignoring"
            );
            return Ok(());
        }

        let expected = vec![n_agents, self.spec.action_dim()];
        if action.shape() != expected.as_slice() {
            return Err(BridgeError::ActionShape {
                behavior: behavior_name.to_string(),
                expected,
                actual: action.shape().to_vec(),
            });
        }

        let first_row = match action {
            ActionBuffer::Float32(a) => ActionBuffer::Float32(a.index_axis_move(Axis(0), 0)),
            ActionBuffer::Float64(a) => ActionBuffer::Float64(a.index_axis_move(Axis(0), 0)),
            ActionBuffer::Int32(a) => ActionBuffer::Int32(a.index_axis_move(Axis(0), 0)),
            ActionBuffer::Int64(a) => ActionBuffer::Int64(a.index_axis_move(Axis(0), 0)),
        };
        let native = self.to_native(first_row)?;
        tracing::trace!(action = ?native, "Accepted action");
        self.pending_action = Some(native);
        Ok(())
    }

    fn set_action_for_agent(
        &mut self,
        behavior_name: &str,
        agent_id: AgentId,
        action: ActionBuffer,
    ) -> Result<()> {
        self.ensure_open()?;
        self.check_behavior(behavior_name)?;
        if agent_id != AGENT_ID {
            return Err(BridgeError::UnknownAgent {
                behavior: behavior_name.to_string(),
                agent_id,
            });
        }

        let expected = vec![self.spec.action_dim()];
        if action.shape() != expected.as_slice() {
            return Err(BridgeError::ActionShape {
                behavior: behavior_name.to_string(),
                expected,
                actual: action.shape().to_vec(),
            });
        }

        let native = self.to_native(action)?;
        tracing::trace!(agent_id, action = ?native, "Accepted agent action");
        self.pending_action = Some(native);
        Ok(())
    }

    fn get_steps(&self, behavior_name: &str) -> Result<(&DecisionSteps, &TerminalSteps)> {
        self.ensure_open()?;
        self.check_behavior(behavior_name)?;
        Ok((&self.current_steps.0, &self.current_steps.1))
    }
}
