#![deny(clippy::all, clippy::pedantic)]
//! Physics-backend boundary for the STRIDER locomotion environments.
//!
//! Environments in this workspace never talk to a physics engine directly.
//! They drive a [`SimBackend`], which integrates actions, reports body
//! velocities and contact forces, and accepts a [`PhysicalParams`] set before
//! each episode. Concrete engines (MuJoCo-class simulators, GPU solvers)
//! implement this trait out of tree; the in-tree [`MockQuadruped`] behind the
//! `mock` feature is a deterministic kinematic stand-in used by tests,
//! benches, and the demo runner.

use thiserror::Error;

pub mod params;

#[cfg(feature = "mock")]
pub mod mock;

pub use params::PhysicalParams;

#[cfg(feature = "mock")]
pub use mock::MockQuadruped;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("action shape mismatch: {0}")]
    ShapeMismatch(&'static str),
    #[error("backend not available")]
    BackendUnavailable,
}

/// Contract a physics engine exposes to the environment layer.
///
/// State lives inside the backend; [`advance`] mutates it in place. One
/// backend instance must be driven by exactly one caller at a time.
///
/// [`advance`]: SimBackend::advance
pub trait SimBackend {
    /// Integrates one control timestep under the given torque vector.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ShapeMismatch`] when `action` does not match the
    /// length of the bound vectors reported by [`action_bounds`].
    ///
    /// [`action_bounds`]: SimBackend::action_bounds
    fn advance(&mut self, action: &[f32]) -> Result<(), SimError>;

    /// Instantaneous linear velocity of the named rigid body.
    fn body_velocity(&self, body: &str) -> [f32; 3];

    /// Full observation vector for the current state.
    fn current_observation(&self) -> Vec<f32>;

    /// Per-dimension lower and upper torque bounds.
    fn action_bounds(&self) -> (&[f32], &[f32]);

    /// External contact force components for the current state.
    fn contact_forces(&self) -> &[f32];

    /// Physical parameter set currently loaded into the model.
    fn params(&self) -> &PhysicalParams;

    /// Replaces the model's physical parameters before the next episode.
    fn set_params(&mut self, params: &PhysicalParams);

    /// Restores the initial state and returns the first observation.
    fn reset(&mut self) -> Vec<f32>;
}
