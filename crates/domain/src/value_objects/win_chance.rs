//! Probability that the player beats a given opponent.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A win probability, always within `[0.0, 1.0]`.
///
/// Non-finite inputs collapse to `0.0` so a misbehaving resolver can never
/// persist `NaN` into a session record.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct WinChance(f64);

impl WinChance {
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 1.0))
        } else {
            Self(0.0)
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Whole-number percentage for display.
    pub fn percent(&self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl From<f64> for WinChance {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<WinChance> for f64 {
    fn from(value: WinChance) -> Self {
        value.0
    }
}

impl fmt::Display for WinChance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}
