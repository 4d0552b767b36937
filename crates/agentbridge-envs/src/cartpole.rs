//! CartPole classic control environment.

use agentbridge::env::{Action, EnvInfo, GymEnv, StepResult};
use agentbridge::spaces::{Box as BoxSpace, Discrete, DynSpace};
use ndarray::{arr1, ArrayD};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;

/// CartPole environment
///
/// A pole is attached to a cart on a frictionless track. The goal
/// is to balance the pole by applying forces to the cart.
///
/// Observation: [cart_pos, cart_vel, pole_angle, pole_vel]
/// Action: 0 = push left, 1 = push right
///
/// Velocities are unbounded, so adapters leave those dimensions unscaled.
/// Episodes are not time limited; wrap in `TimeLimit` for that.
pub struct CartPole {
    gravity: f32,
    mass_pole: f32,
    total_mass: f32,
    length: f32, // half-pole length
    pole_mass_length: f32,
    force_mag: f32,
    tau: f32, // timestep

    theta_threshold: f32,
    x_threshold: f32,

    state: [f32; 4], // x, x_dot, theta, theta_dot
    rng: StdRng,
}

impl CartPole {
    pub fn new() -> Self {
        let mass_cart = 1.0;
        let mass_pole = 0.1;
        let length = 0.5;

        Self {
            gravity: 9.8,
            mass_pole,
            total_mass: mass_cart + mass_pole,
            length,
            pole_mass_length: mass_pole * length,
            force_mag: 10.0,
            tau: 0.02,
            theta_threshold: 12.0 * 2.0 * PI / 360.0,
            x_threshold: 2.4,
            state: [0.0; 4],
            rng: StdRng::from_entropy(),
        }
    }

    fn is_terminal(&self) -> bool {
        self.state[0].abs() > self.x_threshold || self.state[2].abs() > self.theta_threshold
    }

    fn observation(&self) -> ArrayD<f32> {
        arr1(&self.state).into_dyn()
    }
}

impl Default for CartPole {
    fn default() -> Self {
        Self::new()
    }
}

impl GymEnv for CartPole {
    fn observation_space(&self) -> DynSpace {
        let high = arr1(&[
            self.x_threshold * 2.0,
            f32::INFINITY,
            self.theta_threshold * 2.0,
            f32::INFINITY,
        ])
        .into_dyn();
        DynSpace::Box(BoxSpace::new(-high.clone(), high))
    }

    fn action_space(&self) -> DynSpace {
        DynSpace::Discrete(Discrete::new(2))
    }

    fn reset(&mut self, seed: Option<u64>) -> (ArrayD<f32>, EnvInfo) {
        if let Some(s) = seed {
            self.rng = StdRng::seed_from_u64(s);
        }
        for v in self.state.iter_mut() {
            *v = self.rng.gen::<f32>() * 0.1 - 0.05;
        }
        (self.observation(), EnvInfo::new())
    }

    fn step(&mut self, action: &Action) -> StepResult {
        let push_right = action.as_discrete().unwrap_or_default() == 1;
        let [x, x_dot, theta, theta_dot] = self.state;

        let force = if push_right { self.force_mag } else { -self.force_mag };

        let cos_theta = theta.cos();
        let sin_theta = theta.sin();
        let temp = (force + self.pole_mass_length * theta_dot * theta_dot * sin_theta) / self.total_mass;
        let theta_acc = (self.gravity * sin_theta - cos_theta * temp)
            / (self.length * (4.0 / 3.0 - self.mass_pole * cos_theta * cos_theta / self.total_mass));
        let x_acc = temp - self.pole_mass_length * theta_acc * cos_theta / self.total_mass;

        // Euler integration
        self.state = [
            x + self.tau * x_dot,
            x_dot + self.tau * x_acc,
            theta + self.tau * theta_dot,
            theta_dot + self.tau * theta_acc,
        ];

        let terminated = self.is_terminal();
        StepResult {
            observation: self.observation(),
            reward: 1.0,
            terminated,
            truncated: false,
            info: EnvInfo::new(),
        }
    }
}
