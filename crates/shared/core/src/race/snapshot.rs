use serde::{Deserialize, Serialize};

use crate::entities::Horse;
use crate::values::{Confidence, Distance, LaneNumber};

/// State of one lane at the end of a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneSnapshot {
    /// 1-based lane index
    pub lane: LaneNumber,
    pub name: String,
    pub symbol: char,
    pub distance_travelled: Distance,
    pub fallen: bool,
    /// Confidence going into the race (adjustment happens after the last tick)
    pub confidence: Confidence,
}

impl LaneSnapshot {
    /// Capture a horse's current state in the given lane
    pub fn capture(lane: LaneNumber, horse: &Horse) -> Self {
        Self {
            lane,
            name: horse.name().to_string(),
            symbol: horse.symbol(),
            distance_travelled: horse.distance_travelled(),
            fallen: horse.has_fallen(),
            confidence: horse.confidence(),
        }
    }
}

/// Immutable view of every lane after one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceSnapshot {
    /// 1-based tick counter within the race
    pub tick: u64,
    /// Lanes in ascending order
    pub lanes: Vec<LaneSnapshot>,
}

impl RaceSnapshot {
    pub fn new(tick: u64, lanes: Vec<LaneSnapshot>) -> Self {
        Self { tick, lanes }
    }

    /// Look up a lane by its 1-based index
    pub fn lane(&self, lane: LaneNumber) -> Option<&LaneSnapshot> {
        self.lanes.iter().find(|l| l.lane == lane)
    }

    /// Furthest distance reached by any horse
    pub fn leading_distance(&self) -> Distance {
        self.lanes
            .iter()
            .map(|l| l.distance_travelled)
            .max()
            .unwrap_or(0)
    }

    /// True when every lane's horse is down
    pub fn all_fallen(&self) -> bool {
        !self.lanes.is_empty() && self.lanes.iter().all(|l| l.fallen)
    }

    /// True when no horse is both standing and able to move
    ///
    /// A fallen horse is out, and a standing horse at zero confidence never
    /// moves. Unless someone is already over the line, such a race cannot end.
    pub fn is_stalled(&self) -> bool {
        !self.lanes.is_empty()
            && self
                .lanes
                .iter()
                .all(|l| l.fallen || l.confidence <= Confidence::ZERO)
    }
}
