use std::time::Duration;

use crate::error::{RaceError, Result};
use crate::model::FALL_BASE_RATE;

/// Engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Per-tick fall probability is `fall_base_rate * confidence^2`
    pub fall_base_rate: f64,
    /// Pause between ticks, for display pacing. Zero runs flat out.
    pub tick_interval: Duration,
    /// Random seed for reproducible races
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fall_base_rate: FALL_BASE_RATE,
            tick_interval: Duration::from_millis(100),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// No pacing between ticks
    pub fn headless() -> Self {
        Self {
            tick_interval: Duration::ZERO,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_fall_base_rate(mut self, rate: f64) -> Self {
        self.fall_base_rate = rate;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.fall_base_rate.is_finite() || self.fall_base_rate < 0.0 {
            return Err(RaceError::InvalidConfig(format!(
                "fall base rate must be a non-negative number, got {}",
                self.fall_base_rate
            )));
        }
        Ok(())
    }
}
