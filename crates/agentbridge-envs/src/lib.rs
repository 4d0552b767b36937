//! Built-in single-agent environments for agentbridge.
//!
//! Small environments for tests and demos:
//! - `Bandit` - Multi-armed bandit, one step per episode
//! - `CartPole` - Classic control, discrete actions
//! - `Pendulum` - Classic control, continuous torque

mod bandit;
mod cartpole;
mod pendulum;

pub use bandit::Bandit;
pub use cartpole::CartPole;
pub use pendulum::Pendulum;
