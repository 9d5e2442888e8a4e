//! Strength formulas shared by plan generation and PR tracking
//!
//! - Training max: 90% of the one-rep max, rounded half-up to a whole number
//! - Plate rounding: nearest multiple of the loading increment (default 5)
//! - Estimated 1RM: Epley, `weight * (1 + reps / 30)`

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::models::{OneRepMaxes, TrainingMaxes};

/// Fraction of the one-rep max used as the training max
pub const TRAINING_MAX_FACTOR: Decimal = dec!(0.9);

/// Default smallest loadable weight jump
pub const DEFAULT_ROUNDING_INCREMENT: Decimal = dec!(5);

/// Denominator of the Epley rep term
pub const EPLEY_DIVISOR: f64 = 30.0;

/// Training max for a single lift: `round(one_rep_max * 0.9)`.
///
/// Callers must pass a positive value.
pub fn derive_training_max(one_rep_max: Decimal) -> Decimal {
    (one_rep_max * TRAINING_MAX_FACTOR).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

pub fn derive_training_maxes(one_rep_maxes: &OneRepMaxes) -> TrainingMaxes {
    TrainingMaxes::new(
        derive_training_max(one_rep_maxes.squat),
        derive_training_max(one_rep_maxes.bench),
        derive_training_max(one_rep_maxes.deadlift),
        derive_training_max(one_rep_maxes.press),
    )
}

/// Round to the nearest multiple of `increment`, halves going up.
pub fn round_to_increment(value: Decimal, increment: Decimal) -> Decimal {
    if increment <= Decimal::ZERO {
        return value;
    }
    (value / increment).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero) * increment
}

/// Epley estimated one-rep max. Not rounded.
pub fn estimated_one_rep_max(weight: Decimal, reps: u32) -> f64 {
    let weight = weight.to_f64().unwrap_or(0.0);
    weight * (1.0 + f64::from(reps) / EPLEY_DIVISOR)
}
