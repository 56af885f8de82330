//! Movement and confidence model
//!
//! Each tick a standing horse gets two independent draws: one decides
//! whether it advances (`u1 < confidence`), the other whether it falls
//! (`u2 < base_rate * confidence^2`). The outcomes are not exclusive, so a
//! horse can advance and fall in the same tick. Fall risk grows with the
//! square of confidence.
//!
//! After a race the winner's confidence steps up by 0.1 and everyone else's
//! steps down by 0.1, rounded half-up to one decimal and clamped to
//! [0.1, 1.0]. The arithmetic is done in `Decimal` so the steps are exact.

use derby_core::{Confidence, Horse, MAX_CONFIDENCE, MIN_CONFIDENCE};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

/// Reference per-tick fall rate for a horse of confidence 1.0
pub const FALL_BASE_RATE: f64 = 0.01;

/// Amount confidence moves after each race
pub const CONFIDENCE_STEP: Decimal = dec!(0.1);

/// What happened to one horse during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stride {
    pub moved: bool,
    pub fell: bool,
}

/// Per-tick probability of falling
pub fn fall_probability(confidence: Confidence, fall_base_rate: f64) -> f64 {
    let c = confidence.to_f64().unwrap_or(0.0);
    fall_base_rate * c * c
}

/// Run one tick for a single horse
///
/// Fallen horses are skipped without consuming any randomness.
pub fn advance_horse<R: Rng + ?Sized>(horse: &mut Horse, rng: &mut R, fall_base_rate: f64) -> Stride {
    if horse.has_fallen() {
        return Stride::default();
    }

    let confidence = horse.confidence().to_f64().unwrap_or(0.0);
    let mut stride = Stride::default();

    if rng.r#gen::<f64>() < confidence {
        horse.move_forward();
        stride.moved = true;
    }

    if rng.r#gen::<f64>() < fall_probability(horse.confidence(), fall_base_rate) {
        horse.fall();
        stride.fell = true;
    }

    stride
}

/// Round to one decimal place, halves going up: `floor(x * 10 + 0.5) / 10`
fn round_tenths_half_up(value: Decimal) -> Decimal {
    (value * dec!(10) + dec!(0.5)).floor() / dec!(10)
}

/// Confidence after winning a race
pub fn promoted(confidence: Confidence) -> Confidence {
    round_tenths_half_up(confidence + CONFIDENCE_STEP).min(MAX_CONFIDENCE)
}

/// Confidence after losing a race
pub fn demoted(confidence: Confidence) -> Confidence {
    round_tenths_half_up(confidence - CONFIDENCE_STEP).max(MIN_CONFIDENCE)
}

/// Apply the post-race adjustment to one horse
pub fn adjust_confidence(horse: &mut Horse, won: bool) {
    let next = if won {
        promoted(horse.confidence())
    } else {
        demoted(horse.confidence())
    };
    horse.set_confidence(next);
}
