//! Race configuration
//!
//! Supports JSON configuration files for:
//! - Race length and pacing
//! - The roster of horses with their cosmetics
//! - Where the player's balance is saved
//!
//! Every field has a default, so `{}` is a valid configuration.

use derby_core::entities::{DEFAULT_BREED, DEFAULT_COAT_COLOUR, DEFAULT_EQUIPMENT, DEFAULT_SYMBOL};
use derby_core::catalog::{self, BREEDS, COAT_COLOURS, EQUIPMENT};
use derby_core::{Confidence, Distance, Horse, MAX_CONFIDENCE};
use derby_engine::{EngineConfig, FALL_BASE_RATE, RaceError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Smallest field a race can have
pub const MIN_HORSES: usize = 2;
/// Largest field a race can have
pub const MAX_HORSES: usize = 10;
/// Shortest allowed track
pub const MIN_RACE_LENGTH: Distance = 10;
/// Longest allowed track
pub const MAX_RACE_LENGTH: Distance = 100;

pub const DEFAULT_SAVE_FILE: &str = "money_save.txt";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Number of horses must be between {min} and {max}, got {0}", min = MIN_HORSES, max = MAX_HORSES)]
    InvalidHorseCount(usize),

    #[error("Race length must be between {min} and {max}, got {0}", min = MIN_RACE_LENGTH, max = MAX_RACE_LENGTH)]
    InvalidRaceLength(Distance),

    #[error("Confidence of {name} must be above 0 and at most 1, got {confidence}")]
    InvalidConfidence { name: String, confidence: Confidence },

    #[error("Invalid engine settings: {0}")]
    Engine(#[from] RaceError),
}

/// One horse in the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorseConfig {
    pub name: String,

    #[serde(default = "default_symbol")]
    pub symbol: char,

    #[serde(default = "default_confidence")]
    pub confidence: Confidence,

    #[serde(default = "default_breed")]
    pub breed: String,

    #[serde(default = "default_coat_colour")]
    pub coat_colour: String,

    #[serde(default = "default_equipment")]
    pub equipment: String,
}

fn default_symbol() -> char {
    DEFAULT_SYMBOL
}

fn default_confidence() -> Confidence {
    dec!(0.5)
}

fn default_breed() -> String {
    DEFAULT_BREED.to_string()
}

fn default_coat_colour() -> String {
    DEFAULT_COAT_COLOUR.to_string()
}

fn default_equipment() -> String {
    DEFAULT_EQUIPMENT.to_string()
}

impl HorseConfig {
    /// Default entry for the n-th horse (1-based): "Horse n"
    pub fn numbered(n: usize) -> Self {
        Self {
            name: format!("Horse {}", n),
            symbol: default_symbol(),
            confidence: default_confidence(),
            breed: default_breed(),
            coat_colour: default_coat_colour(),
            equipment: default_equipment(),
        }
    }

    /// Confidence must lie in (0, 1]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.confidence <= Decimal::ZERO || self.confidence > MAX_CONFIDENCE {
            return Err(ConfigError::InvalidConfidence {
                name: self.name.clone(),
                confidence: self.confidence,
            });
        }
        Ok(())
    }

    /// Cosmetic values that are neither the default nor in the catalog
    pub fn unlisted_cosmetics(&self) -> Vec<&str> {
        [
            (self.breed.as_str(), DEFAULT_BREED, &BREEDS[..]),
            (self.coat_colour.as_str(), DEFAULT_COAT_COLOUR, &COAT_COLOURS[..]),
            (self.equipment.as_str(), DEFAULT_EQUIPMENT, &EQUIPMENT[..]),
        ]
        .into_iter()
        .filter(|(value, default, options)| value != default && !catalog::is_listed(options, value))
        .map(|(value, _, _)| value)
        .collect()
    }

    pub fn to_horse(&self) -> Horse {
        for value in self.unlisted_cosmetics() {
            log::warn!("{}: '{}' is not a catalogued option", self.name, value);
        }
        Horse::new(self.name.clone(), self.symbol, self.confidence)
            .with_breed(self.breed.clone())
            .with_coat_colour(self.coat_colour.clone())
            .with_equipment(self.equipment.clone())
    }
}

/// Root configuration for a race session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceConfig {
    /// Track length in distance units
    #[serde(default = "default_race_length")]
    pub race_length: Distance,

    /// Horses in lane order
    #[serde(default = "default_horses")]
    pub horses: Vec<HorseConfig>,

    /// Pause between ticks in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Per-tick fall rate at confidence 1.0
    #[serde(default = "default_fall_base_rate")]
    pub fall_base_rate: f64,

    /// Random seed for reproducible sessions
    #[serde(default)]
    pub seed: Option<u64>,

    /// Plain-text file holding the player's balance
    #[serde(default = "default_save_file")]
    pub save_file: PathBuf,
}

fn default_race_length() -> Distance {
    20
}

fn default_horses() -> Vec<HorseConfig> {
    (1..=3).map(HorseConfig::numbered).collect()
}

fn default_tick_interval_ms() -> u64 {
    100
}

fn default_fall_base_rate() -> f64 {
    FALL_BASE_RATE
}

fn default_save_file() -> PathBuf {
    PathBuf::from(DEFAULT_SAVE_FILE)
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            race_length: default_race_length(),
            horses: default_horses(),
            tick_interval_ms: default_tick_interval_ms(),
            fall_base_rate: default_fall_base_rate(),
            seed: None,
            save_file: default_save_file(),
        }
    }
}

impl RaceConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            source,
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Grow or shrink the roster to `count` horses
    ///
    /// Existing entries keep their settings; new ones get numbered defaults.
    pub fn with_horse_count(mut self, count: usize) -> Self {
        self.horses.truncate(count);
        let have = self.horses.len();
        self.horses
            .extend((have + 1..=count).map(HorseConfig::numbered));
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_HORSES..=MAX_HORSES).contains(&self.horses.len()) {
            return Err(ConfigError::InvalidHorseCount(self.horses.len()));
        }
        if !(MIN_RACE_LENGTH..=MAX_RACE_LENGTH).contains(&self.race_length) {
            return Err(ConfigError::InvalidRaceLength(self.race_length));
        }
        for horse in &self.horses {
            horse.validate()?;
        }
        self.engine_config().validate()?;
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            fall_base_rate: self.fall_base_rate,
            tick_interval: self.tick_interval(),
            seed: self.seed,
        }
    }

    /// Build the roster in lane order
    pub fn build_horses(&self) -> Vec<Horse> {
        self.horses.iter().map(HorseConfig::to_horse).collect()
    }
}
