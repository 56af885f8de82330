//! Derby Core Domain
//!
//! Pure domain types for the Derby race simulator.
//! Plain data and rules only: nothing here awaits or touches the filesystem.

pub mod catalog;
pub mod entities;
pub mod race;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::Horse;
pub use race::{LaneSnapshot, RaceResult, RaceSnapshot};
pub use values::{Confidence, Distance, LaneNumber, MAX_CONFIDENCE, MIN_CONFIDENCE};
