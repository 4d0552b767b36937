//! Pendulum swing-up environment.

use agentbridge::env::{Action, EnvInfo, GymEnv, StepResult};
use agentbridge::spaces::{Box as BoxSpace, DynSpace};
use ndarray::{arr1, ArrayD};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;

/// Pendulum environment
///
/// Swing a frictionless pendulum upright and keep it there.
///
/// Observation: [cos(theta), sin(theta), theta_dot]
/// Action: torque in [-2, 2]
///
/// Episodes never terminate on their own; wrap in `TimeLimit` to bound them.
pub struct Pendulum {
    max_speed: f32,
    max_torque: f32,
    dt: f32,
    gravity: f32,
    mass: f32,
    length: f32,

    theta: f32,
    theta_dot: f32,
    last_torque: f32,
    rng: StdRng,
}

impl Pendulum {
    pub fn new() -> Self {
        Self {
            max_speed: 8.0,
            max_torque: 2.0,
            dt: 0.05,
            gravity: 10.0,
            mass: 1.0,
            length: 1.0,
            theta: 0.0,
            theta_dot: 0.0,
            last_torque: 0.0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Torque applied on the last step, after clipping
    pub fn last_torque(&self) -> f32 {
        self.last_torque
    }

    fn observation(&self) -> ArrayD<f32> {
        arr1(&[self.theta.cos(), self.theta.sin(), self.theta_dot]).into_dyn()
    }
}

impl Default for Pendulum {
    fn default() -> Self {
        Self::new()
    }
}

fn angle_normalize(x: f32) -> f32 {
    (x + PI).rem_euclid(2.0 * PI) - PI
}

impl GymEnv for Pendulum {
    fn observation_space(&self) -> DynSpace {
        let high = arr1(&[1.0, 1.0, self.max_speed]).into_dyn();
        DynSpace::Box(BoxSpace::new(-high.clone(), high))
    }

    fn action_space(&self) -> DynSpace {
        DynSpace::Box(BoxSpace::uniform(&[1], -self.max_torque, self.max_torque))
    }

    fn reset(&mut self, seed: Option<u64>) -> (ArrayD<f32>, EnvInfo) {
        if let Some(s) = seed {
            self.rng = StdRng::seed_from_u64(s);
        }
        self.theta = self.rng.gen_range(-PI..PI);
        self.theta_dot = self.rng.gen_range(-1.0..1.0);
        self.last_torque = 0.0;
        (self.observation(), EnvInfo::new())
    }

    fn step(&mut self, action: &Action) -> StepResult {
        let torque = action
            .as_continuous()
            .and_then(|a| a.iter().next().copied())
            .unwrap_or(0.0)
            .clamp(-self.max_torque, self.max_torque);
        self.last_torque = torque;

        let cost = angle_normalize(self.theta).powi(2)
            + 0.1 * self.theta_dot.powi(2)
            + 0.001 * torque.powi(2);

        let g = self.gravity;
        let (m, l) = (self.mass, self.length);
        self.theta_dot = (self.theta_dot
            + (3.0 * g / (2.0 * l) * self.theta.sin() + 3.0 / (m * l * l) * torque) * self.dt)
            .clamp(-self.max_speed, self.max_speed);
        self.theta += self.theta_dot * self.dt;

        StepResult {
            observation: self.observation(),
            reward: -cost,
            terminated: false,
            truncated: false,
            info: EnvInfo::new(),
        }
    }
}
