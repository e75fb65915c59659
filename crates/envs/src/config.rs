//! Environment configuration.
//!
//! Configs deserialize from JSON so experiment sweeps can be described in
//! files; every field has a default, so `EnvConfig::default()` is a complete,
//! sensible setup.

use anyhow::Result;
use serde::Deserialize;

/// Parameter family of the physics model that can be randomized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandParam {
    BodyMass,
    BodyInertia,
    DofDamping,
    GeomFriction,
}

impl RandParam {
    /// Every randomizable family.
    #[must_use]
    pub fn all() -> Vec<RandParam> {
        vec![
            RandParam::BodyMass,
            RandParam::BodyInertia,
            RandParam::DofDamping,
            RandParam::GeomFriction,
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnvConfig {
    /// Half-width of the base-2 log-uniform sampling interval for parameter
    /// multipliers. Wider means more extreme perturbations.
    #[serde(default = "default_log_scale_limit")]
    pub log_scale_limit: f32,
    /// Sample one parameter set and hold it for every later episode.
    #[serde(default)]
    pub fix_params: bool,
    /// Parameter families subject to randomization.
    #[serde(default = "RandParam::all")]
    pub rand_params: Vec<RandParam>,
    /// Seed for parameter sampling. `None` seeds from entropy.
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Hard cap on episode length. `None` leaves episodes uncapped.
    #[serde(default)]
    pub max_path_length: Option<u32>,
}

fn default_log_scale_limit() -> f32 {
    2.0
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            log_scale_limit: default_log_scale_limit(),
            fix_params: false,
            rand_params: RandParam::all(),
            random_seed: None,
            max_path_length: None,
        }
    }
}

impl EnvConfig {
    /// Parses a config from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns an error when the JSON is malformed or a field has the wrong
    /// type.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
