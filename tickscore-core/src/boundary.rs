//! Period boundaries — when the host should call `tick`.
//!
//! A cadence splits wall-clock time into fixed periods aligned to the Unix
//! epoch, so a one-minute cadence fires at second `:00` of every minute.

use chrono::{DateTime, Duration, Utc};
use std::num::NonZeroU32;

const ONE_MINUTE: NonZeroU32 = match NonZeroU32::new(60) {
    Some(secs) => secs,
    None => panic!("zero period"),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    period_secs: NonZeroU32,
}

impl Cadence {
    pub fn new(period_secs: NonZeroU32) -> Self {
        Self { period_secs }
    }

    pub fn every_minute() -> Self {
        Self::new(ONE_MINUTE)
    }

    pub fn period(&self) -> Duration {
        Duration::seconds(i64::from(self.period_secs.get()))
    }

    /// Time elapsed since the start of the current period.
    fn offset(&self, now: DateTime<Utc>) -> Duration {
        let period_ms = i64::from(self.period_secs.get()) * 1_000;
        Duration::milliseconds(now.timestamp_millis().rem_euclid(period_ms))
    }

    /// Start of the period containing `now`.
    pub fn floor(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.offset(now)
    }

    /// First boundary strictly after `now`.
    pub fn next_boundary(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.floor(now) + self.period()
    }

    /// Countdown to the next boundary, in `(0, period]`.
    ///
    /// Exactly on a boundary this is the full period.
    pub fn until_next(&self, now: DateTime<Utc>) -> Duration {
        self.next_boundary(now) - now
    }

    /// Whether `now` falls within the first second of a period.
    pub fn is_boundary(&self, now: DateTime<Utc>) -> bool {
        self.offset(now) < Duration::seconds(1)
    }
}

impl Default for Cadence {
    fn default() -> Self {
        Self::every_minute()
    }
}
