//! Per-episode sampling of physical parameters.

use sim::PhysicalParams;

use crate::config::{EnvConfig, RandParam};

/// Draws a perturbed copy of a model's physical parameters at episode start.
///
/// Each value of each selected family is scaled by an independent multiplier
/// `2^u` with `u` uniform in `[-log_scale_limit, +log_scale_limit]`, so
/// parameters vary multiplicatively and symmetrically in log space around
/// their base values. Families not selected pass through unchanged.
pub struct ParamRandomizer {
    log_scale_limit: f32,
    fix_params: bool,
    rand_params: Vec<RandParam>,
    rng: fastrand::Rng,
    frozen: Option<PhysicalParams>,
}

impl ParamRandomizer {
    #[must_use]
    pub fn new(config: &EnvConfig) -> Self {
        let rng = match config.random_seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            log_scale_limit: config.log_scale_limit,
            fix_params: config.fix_params,
            rand_params: config.rand_params.clone(),
            rng,
            frozen: None,
        }
    }

    /// Samples the parameter set for the next episode.
    ///
    /// With `fix_params` the first sampled set is cached and every later call
    /// returns a copy of it.
    pub fn resample(&mut self, base: &PhysicalParams) -> PhysicalParams {
        if let Some(frozen) = &self.frozen {
            return frozen.clone();
        }
        let mut params = base.clone();
        for family in &self.rand_params {
            let values = match family {
                RandParam::BodyMass => &mut params.body_mass,
                RandParam::BodyInertia => &mut params.body_inertia,
                RandParam::DofDamping => &mut params.dof_damping,
                RandParam::GeomFriction => &mut params.geom_friction,
            };
            for value in values.iter_mut() {
                *value *= multiplier(&self.rng, self.log_scale_limit);
            }
        }
        if self.fix_params {
            self.frozen = Some(params.clone());
        }
        params
    }
}

/// Log-uniform multiplier in `[2^-limit, 2^limit]`.
fn multiplier(rng: &fastrand::Rng, limit: f32) -> f32 {
    let u = rng.f32() * 2.0 * limit - limit;
    2f32.powf(u)
}
