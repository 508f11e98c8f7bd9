use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Settings for running a simulation.
///
/// Every field has a default so a JSON configuration only needs the fields it changes.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// The grid is grown with dead cells until both sides are at least this long.
    pub grid_size: usize,
    /// The number of generations to run.
    pub generations: usize,
    /// The seed for random starting grids.
    pub seed: u64,
    /// The chance that a cell of a random starting grid is alive.
    pub alive_probability: f64,
    /// Where to save the generation history. `None` to skip it.
    pub history_file: Option<String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            grid_size: 50,
            generations: 100,
            seed: 0,
            alive_probability: 0.6,
            history_file: None,
        }
    }
}

impl SimulationConfig {
    pub fn new(grid_size: usize, generations: usize) -> SimulationConfig {
        SimulationConfig {
            grid_size,
            generations,
            ..SimulationConfig::default()
        }
    }

    /// Parses and validates a configuration from JSON.
    pub fn from_json(json: &str) -> Result<SimulationConfig, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::InvalidGridSize);
        }

        if !(0.0..=1.0).contains(&self.alive_probability) {
            return Err(ConfigError::InvalidProbability(self.alive_probability));
        }

        Ok(())
    }
}
