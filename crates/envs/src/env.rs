//! Reinforcement learning environment trait.
//!
//! Inspired by classic frameworks like OpenAI Gym, this trait defines the
//! core interface an environment must provide. Each call to [`step`] advances
//! the simulation by one action vector and returns a [`StepOutcome`] holding
//! the new observation, the reward signal, whether the episode terminated,
//! and the diagnostic reward components.
//!
//! [`step`]: Env::step

use crate::error::EnvError;

/// Everything an environment reports for one step.
///
/// `reward_run` and `reward_ctrl` are informational components for external
/// logging; they are already folded into `reward` and must never be fed back
/// into a learning signal a second time.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// Observation after the step.
    pub observation: Vec<f32>,
    /// Scalar reward, clamped by the environment.
    pub reward: f32,
    /// Whether the episode ended on this step.
    pub done: bool,
    /// Forward-velocity component of the reward.
    pub reward_run: f32,
    /// Negated control cost.
    pub reward_ctrl: f32,
}

pub trait Env {
    /// Advance the environment by one action vector.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::ShapeMismatch`] when the action length does not
    /// match the backend's action bounds, and propagates backend failures.
    fn step(&mut self, action: &[f32]) -> Result<StepOutcome, EnvError>;

    /// Reset the environment to a fresh episode and return the initial
    /// observation vector.
    fn reset(&mut self) -> Vec<f32>;

    /// Size of the observation vector.
    fn obs_size(&self) -> usize;

    /// Size of the action vector.
    fn action_size(&self) -> usize;
}
