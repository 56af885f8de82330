use derby_core::LaneNumber;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RaceError {
    #[error("Cannot add horse to lane {lane} because there is no such lane (1..={lane_count})")]
    InvalidLane { lane: LaneNumber, lane_count: usize },

    #[error("Cannot start race: lane {lane} has no horse")]
    IncompleteRoster { lane: LaneNumber },

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, RaceError>;
