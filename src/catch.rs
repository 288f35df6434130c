//! Catch simulation for the catch command
//!
//! A pokemon's base experience sets a catch rate, the rate sets a shake
//! threshold, and a catch attempt rolls up to four times against that
//! threshold. All of the arithmetic is integer division, which the
//! threshold derivation depends on.

use rand::Rng;

/// Number of shake checks a successful catch must pass
const SHAKES_TO_CATCH: u32 = 4;

/// Exclusive upper bound for a shake roll
const ROLL_BOUND: u32 = 65536;

/// Outcome of a single catch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatchOutcome {
    /// All four shake checks passed
    Caught,
    /// The pokemon broke free after this many shakes
    BrokeOut(u32),
}

/// Derives the catch rate from a pokemon's base experience
///
/// Stronger pokemon (higher base experience) are harder to catch; the rate
/// never drops below 3, no matter how large the base experience gets.
pub fn catch_rate(base_experience: u32) -> u32 {
    let rate = 255u32.saturating_sub(base_experience / 3);
    rate.max(3)
}

/// Derives the shake threshold from a catch rate
///
/// A shake check passes when a roll in `0..65536` lands below the
/// threshold. `rate` must come from [`catch_rate`]; rates of 128 and above
/// collapse the divisor to 1, so every roll passes.
pub fn shake_threshold(rate: u32) -> u32 {
    ROLL_BOUND / (255 / rate)
}

/// Rolls up to four shake checks against `threshold`
pub fn roll_shakes<R: Rng>(rng: &mut R, threshold: u32) -> CatchOutcome {
    for shake in 0..SHAKES_TO_CATCH {
        let roll = rng.gen_range(0..ROLL_BOUND);
        if roll >= threshold {
            return CatchOutcome::BrokeOut(shake);
        }
    }
    CatchOutcome::Caught
}
