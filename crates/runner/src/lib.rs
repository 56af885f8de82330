//! Derby Runner - race sessions for the terminal
//!
//! Wires the engine and the betting crate into a playable session:
//!
//! - **Config**: JSON race configuration with defaults and bounds
//! - **Session**: roster, wallet, balance store and one race after another
//! - **Render**: the text track drawn each tick
//!
//! ## Flow
//!
//! ```text
//!   RaceConfig ──► RaceSession ──► RaceEngine (one per race)
//!                      │                 │ snapshots
//!                      │                 ▼
//!                      │             render_track
//!                      ▼
//!            Wallet + BalanceStore
//! ```

pub mod config;
pub mod render;
pub mod session;

pub use config::{ConfigError, HorseConfig, RaceConfig};
pub use render::{render_lane, render_track, render_winner, track_border};
pub use session::{RaceOutcome, RaceSession, SessionError};
