use serde::Serialize;
use std::time::Duration;

use crate::error::{FocusError, Result};

pub const INITIAL_STAR_PROBABILITY: f64 = 0.2;
pub const GROWTH_FACTOR: f64 = 1.5;
pub const MIN_ROUND_DURATION: Duration = Duration::from_secs(1);
pub const GRID_WIDTH: usize = 15;
pub const GRID_HEIGHT: usize = 5;

/// Pause after the summary before the terminal is handed back
pub const CLOSING_PAUSE: Duration = Duration::from_secs(1);

/// Round parameters, fixed for the whole session
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RoundConfig {
    pub initial_star_probability: f64,
    pub growth_factor: f64,
    pub min_round_duration: Duration,
    pub grid_width: usize,
    pub grid_height: usize,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            initial_star_probability: INITIAL_STAR_PROBABILITY,
            growth_factor: GROWTH_FACTOR,
            min_round_duration: MIN_ROUND_DURATION,
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
        }
    }
}

impl RoundConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.initial_star_probability) {
            return Err(FocusError::InvalidConfig(format!(
                "star probability {} outside [0, 1]",
                self.initial_star_probability
            )));
        }
        if self.growth_factor.is_nan() || self.growth_factor <= 1.0 {
            return Err(FocusError::InvalidConfig(format!(
                "growth factor {} must be greater than 1",
                self.growth_factor
            )));
        }
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(FocusError::InvalidConfig(format!(
                "empty grid {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        Ok(())
    }
}
