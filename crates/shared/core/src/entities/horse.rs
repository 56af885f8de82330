use serde::{Deserialize, Serialize};

use crate::values::{Confidence, Distance};

/// Symbol used when none is chosen
pub const DEFAULT_SYMBOL: char = '♘';

/// Breed assigned at construction
pub const DEFAULT_BREED: &str = "Unknown";

/// Coat colour assigned at construction
pub const DEFAULT_COAT_COLOUR: &str = "Unknown";

/// Equipment assigned at construction
pub const DEFAULT_EQUIPMENT: &str = "None";

/// A horse taking part in races
///
/// Holds identity, cosmetic attributes, per-race state (distance and fallen
/// flag) and a confidence rating that carries over between races.
///
/// Setters perform no validation. In particular a confidence outside
/// [0.1, 1.0] is accepted as-is; only the engine's post-race adjustment
/// clamps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Horse {
    /// Display name, not required to be unique
    name: String,

    /// Track marker
    symbol: char,

    /// Drives both forward movement and (quadratically) falling
    confidence: Confidence,

    /// Units covered in the current race
    distance_travelled: Distance,

    /// Whether the horse fell in the current race
    fallen: bool,

    breed: String,
    coat_colour: String,
    equipment: String,
}

impl Horse {
    /// Create a horse at the start line with default cosmetics
    pub fn new(name: impl Into<String>, symbol: char, confidence: Confidence) -> Self {
        Self {
            name: name.into(),
            symbol,
            confidence,
            distance_travelled: 0,
            fallen: false,
            breed: DEFAULT_BREED.to_string(),
            coat_colour: DEFAULT_COAT_COLOUR.to_string(),
            equipment: DEFAULT_EQUIPMENT.to_string(),
        }
    }

    pub fn with_breed(mut self, breed: impl Into<String>) -> Self {
        self.breed = breed.into();
        self
    }

    pub fn with_coat_colour(mut self, coat_colour: impl Into<String>) -> Self {
        self.coat_colour = coat_colour.into();
        self
    }

    pub fn with_equipment(mut self, equipment: impl Into<String>) -> Self {
        self.equipment = equipment.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    pub fn set_symbol(&mut self, symbol: char) {
        self.symbol = symbol;
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    pub fn set_confidence(&mut self, confidence: Confidence) {
        self.confidence = confidence;
    }

    pub fn distance_travelled(&self) -> Distance {
        self.distance_travelled
    }

    pub fn has_fallen(&self) -> bool {
        self.fallen
    }

    pub fn breed(&self) -> &str {
        &self.breed
    }

    pub fn set_breed(&mut self, breed: impl Into<String>) {
        self.breed = breed.into();
    }

    pub fn coat_colour(&self) -> &str {
        &self.coat_colour
    }

    pub fn set_coat_colour(&mut self, coat_colour: impl Into<String>) {
        self.coat_colour = coat_colour.into();
    }

    pub fn equipment(&self) -> &str {
        &self.equipment
    }

    pub fn set_equipment(&mut self, equipment: impl Into<String>) {
        self.equipment = equipment.into();
    }

    /// Advance exactly one unit
    ///
    /// Does not check `fallen`; the engine is responsible for skipping
    /// fallen horses.
    pub fn move_forward(&mut self) {
        self.distance_travelled += 1;
    }

    /// Mark the horse as fallen. Idempotent.
    pub fn fall(&mut self) {
        self.fallen = true;
    }

    /// Put the horse back on the start line
    ///
    /// Distance and fallen flag always reset together.
    pub fn reset_for_race(&mut self) {
        self.distance_travelled = 0;
        self.fallen = false;
    }
}
