//! Text rendering of the track
//!
//! ```text
//! ======================
//! |     ♘              | Horse 1 (confidence 0.5)
//! |   ❌               | Horse 2 (confidence 0.6)
//! ======================
//! ```

use derby_core::{Distance, LaneSnapshot, RaceResult, RaceSnapshot};
use rust_decimal::RoundingStrategy;

/// Drawn in place of the symbol once a horse has fallen
pub const FALLEN_MARKER: char = '❌';

/// Top and bottom rule, two wider than the track for the lane walls
pub fn track_border(race_length: Distance) -> String {
    "=".repeat(race_length as usize + 2)
}

/// One lane: `|<spaces><symbol><spaces>| name (confidence X.X)`
pub fn render_lane(lane: &LaneSnapshot, race_length: Distance) -> String {
    let before = lane.distance_travelled as usize;
    let after = race_length.saturating_sub(lane.distance_travelled) as usize;
    let marker = if lane.fallen { FALLEN_MARKER } else { lane.symbol };
    let confidence = lane
        .confidence
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);

    format!(
        "|{}{}{}| {} (confidence {:.1})",
        " ".repeat(before),
        marker,
        " ".repeat(after.saturating_sub(1)),
        lane.name,
        confidence
    )
}

/// The whole track for one tick
pub fn render_track(snapshot: &RaceSnapshot, race_length: Distance) -> String {
    let border = track_border(race_length);
    let mut lines = Vec::with_capacity(snapshot.lanes.len() + 2);

    lines.push(border.clone());
    lines.extend(
        snapshot
            .lanes
            .iter()
            .map(|lane| render_lane(lane, race_length)),
    );
    lines.push(border);
    lines.join("\n")
}

pub fn render_winner(result: &RaceResult) -> String {
    format!("And the winner is {}", result.winner_name)
}
