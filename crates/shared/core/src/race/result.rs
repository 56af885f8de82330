use serde::{Deserialize, Serialize};

use crate::values::LaneNumber;

/// Outcome of a finished race
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceResult {
    /// Winner's name at the moment the race finished
    pub winner_name: String,
    /// Lane the winner ran in
    pub winner_lane: LaneNumber,
    /// Number of ticks the race took
    pub ticks: u64,
}

impl RaceResult {
    pub fn new(winner_name: impl Into<String>, winner_lane: LaneNumber, ticks: u64) -> Self {
        Self {
            winner_name: winner_name.into(),
            winner_lane,
            ticks,
        }
    }

    /// Exact (case-sensitive) name comparison, as used by bet settlement
    pub fn is_won_by(&self, name: &str) -> bool {
        self.winner_name == name
    }
}
