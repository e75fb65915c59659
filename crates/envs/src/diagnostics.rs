//! Recorded trajectories and the sink they are summarized into.

/// One recorded episode trajectory, supplied by the training driver.
#[derive(Debug, Clone, Default)]
pub struct Path {
    /// Observations in step order, including the initial one.
    pub observations: Vec<Vec<f32>>,
    /// Actions taken, one per step.
    pub actions: Vec<Vec<f32>>,
    /// Rewards received, one per step.
    pub rewards: Vec<f32>,
}

impl Path {
    /// Net torso displacement along the locomotion axis over the episode.
    ///
    /// A path with no observations has zero progress.
    #[must_use]
    pub fn forward_progress(&self) -> f32 {
        match (self.observations.first(), self.observations.last()) {
            (Some(first), Some(last)) => {
                last[last.len() - 3] - first[first.len() - 3]
            }
            _ => 0.0,
        }
    }
}

/// Destination for named scalar statistics.
///
/// Injected wherever diagnostics are emitted, so the caller decides where
/// metrics end up instead of a global logger.
pub trait DiagnosticsSink {
    fn record_scalar(&mut self, key: &str, value: f32);
}

/// Sink that emits each scalar through `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record_scalar(&mut self, key: &str, value: f32) {
        tracing::info!(key = %key, value, "diagnostic scalar");
    }
}

/// Sink that accumulates scalars in memory.
#[derive(Debug, Default)]
pub struct TabularSink {
    pub rows: Vec<(String, f32)>,
}

impl TabularSink {
    /// Value recorded under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f32> {
        self.rows
            .iter()
            .find(|(recorded, _)| recorded == key)
            .map(|(_, value)| *value)
    }
}

impl DiagnosticsSink for TabularSink {
    fn record_scalar(&mut self, key: &str, value: f32) {
        self.rows.push((key.to_string(), value));
    }
}
