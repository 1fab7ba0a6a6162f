//! Clock and random implementations.

use crate::infrastructure::ports::{ClockPort, RandomPort};
use chrono::{DateTime, FixedOffset, Utc};

/// Timestamp format of `last_enter_timestamp`.
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Format `instant` as wall-clock time at a fixed UTC offset.
///
/// Offsets outside +/-23 hours fall back to UTC.
pub fn format_local(instant: DateTime<Utc>, utc_offset_hours: i32) -> String {
    match utc_offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
    {
        Some(offset) => instant
            .with_timezone(&offset)
            .format(TIMESTAMP_FORMAT)
            .to_string(),
        None => instant.format(TIMESTAMP_FORMAT).to_string(),
    }
}

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        use rand::Rng;
        rand::thread_rng().gen_range(min..=max)
    }

    fn gen_unit(&self) -> f64 {
        use rand::Rng;
        rand::thread_rng().gen::<f64>()
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Fixed random for testing.
#[cfg(test)]
pub struct FixedRandom {
    pub range: i32,
    pub unit: f64,
}

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        self.range.clamp(min, max)
    }

    fn gen_unit(&self) -> f64 {
        self.unit
    }
}
