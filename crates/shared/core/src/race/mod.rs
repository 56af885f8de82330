//! Race observation types
//!
//! Values handed out of the engine: a per-tick snapshot for renderers and
//! the terminal result. Neither exposes a mutable horse reference.

mod result;
mod snapshot;

pub use result::RaceResult;
pub use snapshot::{LaneSnapshot, RaceSnapshot};
