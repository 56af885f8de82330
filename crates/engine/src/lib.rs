//! Derby Engine - stochastic horse race simulation
//!
//! - **Engine**: lane roster of borrowed horses and the tick loop
//! - **Model**: movement/fall draws and post-race confidence adjustment
//! - **Run**: async, pull-based sequence of tick snapshots ending in a result
//!
//! ## Usage
//!
//! ```ignore
//! use derby_core::Horse;
//! use derby_engine::{EngineConfig, RaceEngine, RaceEvent};
//! use rust_decimal_macros::dec;
//!
//! let mut a = Horse::new("Comet", 'C', dec!(0.6));
//! let mut b = Horse::new("Dasher", 'D', dec!(0.5));
//!
//! let mut engine = RaceEngine::with_config(2, 20, EngineConfig::headless())?;
//! engine.assign_lane(&mut a, 1)?;
//! engine.assign_lane(&mut b, 2)?;
//!
//! let mut run = engine.run()?;
//! while let Some(event) = run.next_event().await {
//!     match event {
//!         RaceEvent::Tick(snapshot) => println!("tick {}", snapshot.tick),
//!         RaceEvent::Finished(result) => println!("winner {}", result.winner_name),
//!     }
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod run;

pub use config::EngineConfig;
pub use engine::RaceEngine;
pub use error::{RaceError, Result};
pub use model::{CONFIDENCE_STEP, FALL_BASE_RATE};
pub use run::{RaceEvent, RaceRun};
