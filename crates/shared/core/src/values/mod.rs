use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Confidence rating - uses Decimal so adjustments step in exact tenths
/// Not validated: values outside [0.1, 1.0] are the caller's business
pub type Confidence = Decimal;

/// Distance along the track, in whole units
pub type Distance = u32;

/// 1-based lane index
pub type LaneNumber = usize;

/// Floor applied by the post-race confidence adjustment
pub const MIN_CONFIDENCE: Confidence = dec!(0.1);

/// Ceiling applied by the post-race confidence adjustment
pub const MAX_CONFIDENCE: Confidence = dec!(1.0);
