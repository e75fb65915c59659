use envs::{AntRandParamEnv, Env, EnvConfig, EnvError};
use sim::MockQuadruped;

fn make_env(config: &EnvConfig) -> AntRandParamEnv<MockQuadruped> {
    let mut env = AntRandParamEnv::new(MockQuadruped::new(), config);
    let _ = env.reset();
    env
}

fn seeded() -> EnvConfig {
    EnvConfig {
        random_seed: Some(7),
        ..EnvConfig::default()
    }
}

#[test]
fn idle_step_earns_forward_and_survive_reward() {
    let mut env = make_env(&seeded());
    let outcome = env.step(&[0.0; 8]).unwrap();
    // torso moves at 1 m/s, zero action costs nothing
    assert!(
        (outcome.reward - 1.05).abs() < 1e-6,
        "expected forward + survive reward, got {}",
        outcome.reward
    );
    assert!((outcome.reward_run - 1.0).abs() < 1e-6);
    assert!(outcome.reward_ctrl.abs() < 1e-6);
    assert!(!outcome.done, "upright torso must not terminate");
}

#[test]
fn ctrl_cost_charges_for_actuation() {
    let mut env = make_env(&seeded());
    let outcome = env.step(&[0.5; 8]).unwrap();
    // 0.005 * 8 * (0.5 / 1.0)^2
    assert!(
        (outcome.reward_ctrl + 0.01).abs() < 1e-6,
        "expected -0.01 control component, got {}",
        outcome.reward_ctrl
    );
    assert!((outcome.reward - 1.04).abs() < 1e-6);
}

#[test]
fn ctrl_cost_is_invariant_under_bound_rescaling() {
    let mut narrow = make_env(&seeded());
    let narrow_outcome = narrow.step(&[0.5; 8]).unwrap();

    let mut backend = MockQuadruped::new();
    backend.set_action_bounds(vec![-2.0; 8], vec![2.0; 8]);
    let mut wide = AntRandParamEnv::new(backend, &seeded());
    let _ = wide.reset();
    let wide_outcome = wide.step(&[1.0; 8]).unwrap();

    assert!(
        (narrow_outcome.reward_ctrl - wide_outcome.reward_ctrl).abs() < 1e-6,
        "same normalized action must cost the same: {} vs {}",
        narrow_outcome.reward_ctrl,
        wide_outcome.reward_ctrl
    );
}

#[test]
fn ctrl_cost_is_never_negative() {
    let mut env = make_env(&seeded());
    for action in [[-1.0_f32; 8], [0.0; 8], [0.7; 8]] {
        let outcome = env.step(&action).unwrap();
        assert!(
            outcome.reward_ctrl <= 0.0,
            "negated control cost must not be positive, got {}",
            outcome.reward_ctrl
        );
    }
}

#[test]
fn contact_forces_are_clamped_before_costing() {
    let mut env = make_env(&seeded());
    env.backend_mut()
        .set_contact_forces(vec![100.0, -50.0, 0.5]);
    let outcome = env.step(&[0.0; 8]).unwrap();
    // clamped squares: 1 + 1 + 0.25, scaled by 0.0005
    let expected = 1.0 - 0.0005 * 2.25 + 0.05;
    assert!(
        (outcome.reward - expected).abs() < 1e-6,
        "outlier forces must be bounded: got {}, expected {expected}",
        outcome.reward
    );
}

#[test]
fn reward_is_clamped_when_the_solver_blows_up() {
    let mut env = make_env(&seeded());
    env.backend_mut().set_torso_velocity([1e9, 0.0, 0.0]);
    let outcome = env.step(&[0.0; 8]).unwrap();
    assert!(
        (outcome.reward - 1000.0).abs() < f32::EPSILON,
        "reward must clamp to 1000, got {}",
        outcome.reward
    );

    env.backend_mut().set_torso_velocity([-1e9, 0.0, 0.0]);
    let outcome = env.step(&[0.0; 8]).unwrap();
    assert!(
        (outcome.reward + 1000.0).abs() < f32::EPSILON,
        "reward must clamp to -1000, got {}",
        outcome.reward
    );
}

#[test]
fn step_counter_caps_the_episode() {
    let config = EnvConfig {
        max_path_length: Some(2),
        ..seeded()
    };
    let mut env = make_env(&config);
    let first = env.step(&[0.0; 8]).unwrap();
    assert!(!first.done, "first of two allowed steps must survive");
    let second = env.step(&[0.0; 8]).unwrap();
    assert!(
        second.done,
        "second step must terminate purely from the counter cap"
    );
}

#[test]
fn reset_restarts_the_step_counter() {
    let config = EnvConfig {
        max_path_length: Some(2),
        ..seeded()
    };
    let mut env = make_env(&config);
    let _ = env.step(&[0.0; 8]).unwrap();
    let _ = env.reset();
    assert_eq!(env.step_count(), 0);
    let outcome = env.step(&[0.0; 8]).unwrap();
    assert!(!outcome.done, "counter must restart after reset");
}

#[test]
fn leaving_the_height_window_terminates() {
    let mut env = make_env(&seeded());
    env.backend_mut().set_torso_height(0.1);
    let fallen = env.step(&[0.0; 8]).unwrap();
    assert!(fallen.done, "torso below 0.2 must terminate");

    let _ = env.reset();
    env.backend_mut().set_torso_height(1.5);
    let airborne = env.step(&[0.0; 8]).unwrap();
    assert!(airborne.done, "torso above 1.0 must terminate");
}

#[test]
fn non_finite_observation_terminates_instead_of_erroring() {
    let mut env = make_env(&seeded());
    env.backend_mut().poison_observation();
    let outcome = env.step(&[0.0; 8]).unwrap();
    assert!(outcome.done, "NaN in the observation must flow into done");
}

#[test]
fn mismatched_action_is_rejected() {
    let mut env = make_env(&seeded());
    let result = env.step(&[0.0; 3]);
    assert!(
        matches!(result, Err(EnvError::ShapeMismatch(_))),
        "expected ShapeMismatch, got {result:?}"
    );
}
