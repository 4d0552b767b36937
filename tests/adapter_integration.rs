use agentbridge::env::TimeLimit;
use agentbridge::prelude::*;
use agentbridge_envs::{Bandit, CartPole, Pendulum};
use ndarray::{arr1, arr2};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Drive `env` with random actions, checking the step pair invariant every step.
/// Returns (decision steps seen, terminal steps seen).
fn run_random(env: &mut dyn BaseEnv, name: &str, steps: usize, seed: u64) -> (usize, usize) {
    let spec = env.behavior_specs()[name].clone();
    let mut rng = StdRng::seed_from_u64(seed);
    let (mut decisions_seen, mut terminals_seen) = (0, 0);

    for _ in 0..steps {
        env.step().unwrap();
        let (decisions, terminals) = env.get_steps(name).unwrap();
        assert!(
            decisions.len() + terminals.len() == 1,
            "exactly one batch must hold the agent"
        );
        decisions_seen += decisions.len();
        terminals_seen += terminals.len();

        let n = decisions.len();
        env.set_actions(name, spec.create_random_action(n, &mut rng))
            .unwrap();
    }
    (decisions_seen, terminals_seen)
}

#[test]
fn test_cartpole_episodes_cycle() {
    let mut env = GymAdapter::with_config(
        TimeLimit::new(CartPole::new(), 50),
        AdapterConfig::new().with_behavior_name("cartpole").with_seed(42),
    )
    .unwrap();

    let (decisions, terminals) = run_random(&mut env, "cartpole", 400, 7);
    assert!(terminals > 0, "random play should end some episodes");
    assert_eq!(decisions + terminals, 400);
}

#[test]
fn test_cartpole_velocity_dims_unscaled() {
    let env = GymAdapter::new(CartPole::new()).unwrap();
    let ratio = env.obs_ratio();
    assert!((ratio[0] - 4.8).abs() < 1e-6);
    assert_eq!(ratio[1], 1.0);
    assert!((ratio[2] - 24.0 * std::f32::consts::PI / 180.0).abs() < 1e-6);
    assert_eq!(ratio[3], 1.0);
}

#[test]
fn test_pendulum_torque_is_scaled() {
    let mut env = GymAdapter::with_name(Pendulum::new(), "pendulum").unwrap();
    let spec = env.behavior_specs()["pendulum"].clone();
    assert!(spec.is_action_continuous());
    assert_eq!(spec.action_size(), 1);

    env.step().unwrap();
    env.set_actions("pendulum", arr2(&[[1.0f32]]).into()).unwrap();
    env.step().unwrap();
    assert_eq!(env.inner().last_torque(), 0.5);

    env.set_action_for_agent("pendulum", AGENT_ID, arr1(&[-4.0f64]).into())
        .unwrap();
    env.step().unwrap();
    assert_eq!(env.inner().last_torque(), -2.0);
}

#[test]
fn test_time_limit_reports_interrupted() {
    let mut env = GymAdapter::new(TimeLimit::new(Pendulum::new(), 3)).unwrap();
    let name = DEFAULT_BEHAVIOR_NAME;

    env.step().unwrap();
    for _ in 0..3 {
        env.set_actions(name, arr2(&[[0.0f32]]).into()).unwrap();
        env.step().unwrap();
    }

    let (decisions, terminals) = env.get_steps(name).unwrap();
    assert!(decisions.is_empty());
    assert_eq!(terminals.interrupted.to_vec(), vec![true]);

    // Stepping again starts over without an action
    env.step().unwrap();
    let (decisions, _) = env.get_steps(name).unwrap();
    assert_eq!(decisions.reward.to_vec(), vec![0.0]);
}

#[test]
fn test_bandit_alternates_decision_and_terminal() {
    let bandit = Bandit::new(4);
    let solution = bandit.solution() as i32;
    let mut env = GymAdapter::new(bandit).unwrap();
    let name = DEFAULT_BEHAVIOR_NAME;

    for _ in 0..3 {
        env.step().unwrap();
        assert_eq!(env.get_steps(name).unwrap().0.len(), 1);

        env.set_action_for_agent(name, AGENT_ID, arr1(&[solution]).into())
            .unwrap();
        env.step().unwrap();
        let (decisions, terminals) = env.get_steps(name).unwrap();
        assert!(decisions.is_empty());
        let terminal = terminals.get(AGENT_ID).unwrap();
        assert_eq!(terminal.reward, 1.0);
        assert!(!terminal.interrupted);

        // Nobody is waiting for an action here
        env.set_actions(name, arr2(&[[0i32]]).into()).unwrap();
    }
}

#[test]
fn test_boxed_env_behind_trait_objects() {
    let inner: Box<dyn GymEnv> = Box::new(CartPole::new());
    let mut env: Box<dyn BaseEnv> = Box::new(GymAdapter::new(inner).unwrap());

    let specs = env.behavior_specs();
    assert_eq!(specs.len(), 1);
    assert!(specs[DEFAULT_BEHAVIOR_NAME].is_action_discrete());

    run_random(env.as_mut(), DEFAULT_BEHAVIOR_NAME, 20, 1);
    env.close().unwrap();
    assert_eq!(env.step(), Err(BridgeError::Closed));
}
