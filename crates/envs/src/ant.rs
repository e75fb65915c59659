//! Quadruped forward-locomotion task with randomized dynamics.

use sim::{PhysicalParams, SimBackend};

use crate::config::EnvConfig;
use crate::diagnostics::{DiagnosticsSink, Path};
use crate::env::{Env, StepOutcome};
use crate::error::EnvError;
use crate::randomizer::ParamRandomizer;

/// Rigid body whose center-of-mass velocity is the forward-progress signal.
const TORSO: &str = "torso";

/// Seconds of simulated time per control step; also the denominator of the
/// finite-difference velocity estimate in [`AntRandParamEnv::reward`].
const FRAME_DT: f32 = 0.02;

/// Observation entry holding the torso height.
const TORSO_HEIGHT_IDX: usize = 2;

/// Observation entries counted from the end to the torso x position.
const FORWARD_POS_FROM_END: usize = 3;

/// The torso must stay inside this height window to count as alive.
const TORSO_HEIGHT_MIN: f32 = 0.2;
const TORSO_HEIGHT_MAX: f32 = 1.0;

/// Per-step bonus for staying alive, so idling beats falling.
const SURVIVE_REWARD: f32 = 0.05;

const CTRL_COST_COEFF: f32 = 0.5e-2;
const CONTACT_COST_COEFF: f32 = 0.5e-3;

/// Rewards are clamped to this magnitude in case the solver blows up.
const REWARD_LIMIT: f32 = 1000.0;

/// Ant locomotion environment whose physical parameters are resampled at
/// every episode start.
///
/// The environment owns its physics backend and its parameter randomizer as
/// plain fields and calls them explicitly; reward shaping, the termination
/// predicate, and the episode step counter live here, everything else is
/// delegated.
pub struct AntRandParamEnv<B: SimBackend> {
    backend: B,
    randomizer: ParamRandomizer,
    base_params: PhysicalParams,
    /// Half the dynamic range of each action dimension.
    scaling: Vec<f32>,
    max_path_length: Option<u32>,
    n_steps: u32,
}

impl<B: SimBackend> AntRandParamEnv<B> {
    #[must_use]
    pub fn new(backend: B, config: &EnvConfig) -> Self {
        let (lower, upper) = backend.action_bounds();
        let scaling = lower
            .iter()
            .zip(upper)
            .map(|(lb, ub)| (ub - lb) * 0.5)
            .collect();
        let base_params = backend.params().clone();
        Self {
            backend,
            randomizer: ParamRandomizer::new(config),
            base_params,
            scaling,
            max_path_length: config.max_path_length,
            n_steps: 0,
        }
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Steps taken since the last reset.
    #[must_use]
    pub fn step_count(&self) -> u32 {
        self.n_steps
    }

    /// Re-scores a single recorded transition.
    ///
    /// Pure function over observation snapshots: forward velocity is
    /// estimated by finite differences of the torso x position at the fixed
    /// control timestep, and no contact cost is charged since contact forces
    /// are not recoverable from observations. The result is deliberately not
    /// clamped the way a live step's reward is.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::ShapeMismatch`] when the observation pair or the
    /// action has inconsistent dimensions.
    pub fn reward(
        &self,
        obs: &[f32],
        action: &[f32],
        obs_next: &[f32],
    ) -> Result<f32, EnvError> {
        let rewards = self.reward_batch(
            &[obs.to_vec()],
            &[action.to_vec()],
            &[obs_next.to_vec()],
        )?;
        Ok(rewards[0])
    }

    /// Batched form of [`reward`](Self::reward), one row per transition.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::ShapeMismatch`] when the batches disagree in
    /// length, an observation row pair disagrees in length, or an action row
    /// does not match the backend's action dimensionality.
    pub fn reward_batch(
        &self,
        obs: &[Vec<f32>],
        actions: &[Vec<f32>],
        obs_next: &[Vec<f32>],
    ) -> Result<Vec<f32>, EnvError> {
        if obs.len() != obs_next.len() || actions.len() != obs.len() {
            return Err(EnvError::ShapeMismatch(
                "reward batches must hold one action and one next observation per observation",
            ));
        }
        obs.iter()
            .zip(actions)
            .zip(obs_next)
            .map(|((row, action), row_next)| {
                if row.len() != row_next.len() {
                    return Err(EnvError::ShapeMismatch(
                        "observation rows of a transition must have equal lengths",
                    ));
                }
                if row.len() < FORWARD_POS_FROM_END {
                    return Err(EnvError::ShapeMismatch(
                        "observation row too short to carry a torso position",
                    ));
                }
                if action.len() != self.scaling.len() {
                    return Err(EnvError::ShapeMismatch(
                        "action row does not match the backend action bounds",
                    ));
                }
                let forward_vel =
                    (forward_position(row_next) - forward_position(row)) / FRAME_DT;
                Ok(forward_vel - self.ctrl_cost(action) + SURVIVE_REWARD)
            })
            .collect()
    }

    /// Termination predicate on a raw observation.
    #[must_use]
    pub fn done(&self, obs: &[f32]) -> bool {
        let notdone = obs.iter().all(|value| value.is_finite())
            && obs[TORSO_HEIGHT_IDX] >= TORSO_HEIGHT_MIN
            && obs[TORSO_HEIGHT_IDX] <= TORSO_HEIGHT_MAX;
        !notdone
    }

    /// Batched form of [`done`](Self::done), one flag per row.
    #[must_use]
    pub fn done_batch(&self, obs: &[Vec<f32>]) -> Vec<bool> {
        obs.iter()
            .map(|row| {
                // eager elementwise AND: every condition is evaluated for
                // every row, as the batched predicate must
                let finite = row.iter().all(|value| value.is_finite());
                let above = row[TORSO_HEIGHT_IDX] >= TORSO_HEIGHT_MIN;
                let below = row[TORSO_HEIGHT_IDX] <= TORSO_HEIGHT_MAX;
                !(finite & above & below)
            })
            .collect()
    }

    /// Summarizes forward progress over recorded paths into `sink`.
    ///
    /// Emits mean, max, min, and population standard deviation of the
    /// per-path net displacement under `{prefix}AverageForwardProgress`,
    /// `{prefix}MaxForwardProgress`, `{prefix}MinForwardProgress`, and
    /// `{prefix}StdForwardProgress`. With no paths nothing is emitted.
    pub fn log_diagnostics(
        &self,
        paths: &[Path],
        prefix: &str,
        sink: &mut dyn DiagnosticsSink,
    ) {
        if paths.is_empty() {
            tracing::warn!("no paths recorded; skipping forward-progress statistics");
            return;
        }
        let progress: Vec<f32> = paths.iter().map(Path::forward_progress).collect();
        let count = progress.len() as f32;
        let mean = progress.iter().sum::<f32>() / count;
        let max = progress.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let min = progress.iter().copied().fold(f32::INFINITY, f32::min);
        let std = (progress
            .iter()
            .map(|value| (value - mean).powi(2))
            .sum::<f32>()
            / count)
            .sqrt();
        sink.record_scalar(&format!("{prefix}AverageForwardProgress"), mean);
        sink.record_scalar(&format!("{prefix}MaxForwardProgress"), max);
        sink.record_scalar(&format!("{prefix}MinForwardProgress"), min);
        sink.record_scalar(&format!("{prefix}StdForwardProgress"), std);
    }

    fn ctrl_cost(&self, action: &[f32]) -> f32 {
        CTRL_COST_COEFF
            * action
                .iter()
                .zip(&self.scaling)
                .map(|(a, s)| (a / s).powi(2))
                .sum::<f32>()
    }
}

impl<B: SimBackend> Env for AntRandParamEnv<B> {
    fn step(&mut self, action: &[f32]) -> Result<StepOutcome, EnvError> {
        if action.len() != self.scaling.len() {
            return Err(EnvError::ShapeMismatch(
                "action length does not match the backend action bounds",
            ));
        }
        self.backend.advance(action)?;

        let comvel = self.backend.body_velocity(TORSO);
        let forward_reward = comvel[0];
        let ctrl_cost = self.ctrl_cost(action);
        let contact_cost = CONTACT_COST_COEFF
            * self
                .backend
                .contact_forces()
                .iter()
                .map(|force| force.clamp(-1.0, 1.0).powi(2))
                .sum::<f32>();

        let observation = self.backend.current_observation();
        let notdone = observation.iter().all(|value| value.is_finite())
            && observation[TORSO_HEIGHT_IDX] >= TORSO_HEIGHT_MIN
            && observation[TORSO_HEIGHT_IDX] <= TORSO_HEIGHT_MAX;
        self.n_steps = self.n_steps.saturating_add(1);
        let capped = self
            .max_path_length
            .is_some_and(|max| self.n_steps >= max);
        let done = !notdone || capped;

        // clamp in case the solver went unstable and produced huge forces
        let reward = (forward_reward - ctrl_cost - contact_cost + SURVIVE_REWARD)
            .clamp(-REWARD_LIMIT, REWARD_LIMIT);

        Ok(StepOutcome {
            observation,
            reward,
            done,
            reward_run: forward_reward,
            reward_ctrl: -ctrl_cost,
        })
    }

    fn reset(&mut self) -> Vec<f32> {
        let params = self.randomizer.resample(&self.base_params);
        self.backend.set_params(&params);
        let observation = self.backend.reset();
        self.n_steps = 0;
        observation
    }

    fn obs_size(&self) -> usize {
        self.backend.current_observation().len()
    }

    fn action_size(&self) -> usize {
        self.scaling.len()
    }
}

fn forward_position(obs: &[f32]) -> f32 {
    obs[obs.len() - FORWARD_POS_FROM_END]
}
