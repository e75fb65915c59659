//! Deterministic kinematic stand-in for a quadruped model.

use crate::{PhysicalParams, SimBackend, SimError};

/// Seconds of simulated time per control step.
const DT: f32 = 0.02;

/// Observation length of the stand-in model: joint state plus a trailing
/// torso center-of-mass triple, with torso height at index 2.
const OBS_LEN: usize = 32;

/// Quadruped backend that translates the torso at a constant velocity.
///
/// There is no dynamics here: `advance` moves the torso center of mass by
/// `velocity * DT` and leaves every other observation entry untouched. Tests
/// steer episodes by mutating the exposed knobs (`set_torso_height`,
/// `set_contact_forces`, `poison_observation`) between steps.
pub struct MockQuadruped {
    observation: Vec<f32>,
    velocity: [f32; 3],
    lower: Vec<f32>,
    upper: Vec<f32>,
    contacts: Vec<f32>,
    params: PhysicalParams,
    initial_height: f32,
}

impl MockQuadruped {
    /// Stand-in with eight actuated joints, the usual two-per-leg layout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_action_dim(8)
    }

    #[must_use]
    pub fn with_action_dim(action_dim: usize) -> Self {
        let initial_height = 0.55;
        let mut observation = vec![0.0; OBS_LEN];
        observation[2] = initial_height;
        Self {
            observation,
            velocity: [1.0, 0.0, 0.0],
            lower: vec![-1.0; action_dim],
            upper: vec![1.0; action_dim],
            contacts: vec![0.0; 6 * (action_dim + 1)],
            params: PhysicalParams {
                body_mass: vec![1.0; action_dim + 1],
                body_inertia: vec![0.1; action_dim + 1],
                dof_damping: vec![0.5; action_dim],
                geom_friction: vec![1.0; action_dim + 1],
            },
            initial_height,
        }
    }

    pub fn set_torso_height(&mut self, height: f32) {
        self.observation[2] = height;
    }

    pub fn set_torso_velocity(&mut self, velocity: [f32; 3]) {
        self.velocity = velocity;
    }

    pub fn set_contact_forces(&mut self, forces: Vec<f32>) {
        self.contacts = forces;
    }

    /// # Panics
    ///
    /// Panics when the bound vectors disagree in length.
    pub fn set_action_bounds(&mut self, lower: Vec<f32>, upper: Vec<f32>) {
        assert_eq!(lower.len(), upper.len(), "bound vectors must match");
        self.lower = lower;
        self.upper = upper;
    }

    /// Writes a NaN into the observation, as a diverged solver would.
    pub fn poison_observation(&mut self) {
        self.observation[5] = f32::NAN;
    }

    fn forward_index(&self) -> usize {
        self.observation.len() - 3
    }
}

impl Default for MockQuadruped {
    fn default() -> Self {
        Self::new()
    }
}

impl SimBackend for MockQuadruped {
    fn advance(&mut self, action: &[f32]) -> Result<(), SimError> {
        if action.len() != self.lower.len() {
            return Err(SimError::ShapeMismatch(
                "action length does not match the actuator count",
            ));
        }
        let fwd = self.forward_index();
        self.observation[fwd] += self.velocity[0] * DT;
        self.observation[fwd + 1] += self.velocity[1] * DT;
        Ok(())
    }

    fn body_velocity(&self, _body: &str) -> [f32; 3] {
        self.velocity
    }

    fn current_observation(&self) -> Vec<f32> {
        self.observation.clone()
    }

    fn action_bounds(&self) -> (&[f32], &[f32]) {
        (&self.lower, &self.upper)
    }

    fn contact_forces(&self) -> &[f32] {
        &self.contacts
    }

    fn params(&self) -> &PhysicalParams {
        &self.params
    }

    fn set_params(&mut self, params: &PhysicalParams) {
        self.params = params.clone();
    }

    fn reset(&mut self) -> Vec<f32> {
        for entry in &mut self.observation {
            *entry = 0.0;
        }
        self.observation[2] = self.initial_height;
        self.observation.clone()
    }
}
