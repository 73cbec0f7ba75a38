//! Price feeds — CSV replay files and a deterministic synthetic walk.
//!
//! CSV layout (header required, `pair` column optional):
//!
//! ```text
//! timestamp,pair,price,high,low
//! 2024-07-01T09:30:00Z,EUR/GBP OTC,0.8512,0.8519,0.8507
//! ```

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;
use thiserror::Error;

use crate::boundary::Cadence;
use crate::domain::{MarketSnapshot, Pair, SnapshotError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedRecord {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub pair: Option<Pair>,
    pub price: f64,
    pub high: f64,
    pub low: f64,
}

impl FeedRecord {
    pub fn snapshot(&self) -> Result<MarketSnapshot, SnapshotError> {
        MarketSnapshot::new(self.price, self.high, self.low)
    }
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("read feed: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: SnapshotError,
    },

    #[error("row {row}: timestamp {timestamp} is earlier than the previous row for the same pair")]
    OutOfOrder { row: usize, timestamp: DateTime<Utc> },
}

/// Read and validate a CSV feed. Rows are numbered from 1, header excluded.
///
/// Timestamps must not go backwards within a pair.
pub fn read_feed<R: io::Read>(reader: R) -> Result<Vec<FeedRecord>, FeedError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut last_seen: HashMap<Option<Pair>, DateTime<Utc>> = HashMap::new();
    let mut records = Vec::new();

    for (i, result) in rdr.deserialize::<FeedRecord>().enumerate() {
        let row = i + 1;
        let record = result?;
        record
            .snapshot()
            .map_err(|source| FeedError::InvalidRow { row, source })?;

        if let Some(prev) = last_seen.get(&record.pair) {
            if record.timestamp < *prev {
                return Err(FeedError::OutOfOrder {
                    row,
                    timestamp: record.timestamp,
                });
            }
        }
        last_seen.insert(record.pair.clone(), record.timestamp);
        records.push(record);
    }

    Ok(records)
}

/// Deterministic one-per-minute random walk for `pair`.
///
/// The walk alternates drift regimes every two hours so that trend filters
/// have something to find. Same `(pair, seed)` → same feed.
pub fn synthetic_feed(
    pair: &str,
    start: DateTime<Utc>,
    minutes: usize,
    seed: u64,
) -> Vec<FeedRecord> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(pair.as_bytes());
    hasher.update(&seed.to_le_bytes());
    let mut rng = StdRng::from_seed(*hasher.finalize().as_bytes());

    let first = Cadence::every_minute().next_boundary(start);
    let mut price = 100.0_f64;
    let mut records = Vec::with_capacity(minutes);

    for i in 0..minutes {
        let drift = if (i / 120) % 2 == 0 { 0.0004 } else { -0.0004 };
        let change: f64 = drift + rng.gen_range(-0.003..0.003);
        let open = price;
        let close = price * (1.0 + change);
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.001));
        let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.001));

        records.push(FeedRecord {
            timestamp: first + Duration::minutes(i as i64),
            pair: Some(pair.to_string()),
            price: close,
            high,
            low,
        });
        price = close;
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const FEED: &str = "\
timestamp,pair,price,high,low
2024-07-01T09:30:00Z,EUR/GBP OTC,0.8512,0.8519,0.8507
2024-07-01T09:31:00Z,EUR/GBP OTC,0.8515,0.8520,0.8510
2024-07-01T09:31:00Z,AUD/USD OTC,0.6650,0.6655,0.6648
";

    #[test]
    fn reads_valid_feed() {
        let records = read_feed(FEED.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].pair.as_deref(), Some("EUR/GBP OTC"));
        assert_eq!(
            records[1].timestamp,
            Utc.with_ymd_and_hms(2024, 7, 1, 9, 31, 0).unwrap()
        );
        assert_eq!(records[2].snapshot().unwrap().current_price(), 0.6650);
    }

    #[test]
    fn pair_column_is_optional() {
        let feed = "timestamp,price,high,low\n2024-07-01T09:30:00Z,1.0,1.1,0.9\n";
        let records = read_feed(feed.as_bytes()).unwrap();
        assert_eq!(records[0].pair, None);
    }

    #[test]
    fn rejects_inverted_range_with_row_number() {
        let feed = "timestamp,price,high,low\n\
                    2024-07-01T09:30:00Z,1.0,1.1,0.9\n\
                    2024-07-01T09:31:00Z,1.0,0.9,1.1\n";
        let err = read_feed(feed.as_bytes()).unwrap_err();
        assert!(matches!(err, FeedError::InvalidRow { row: 2, .. }), "{err}");
    }

    #[test]
    fn rejects_backwards_time_within_pair() {
        let feed = "timestamp,price,high,low\n\
                    2024-07-01T09:31:00Z,1.0,1.1,0.9\n\
                    2024-07-01T09:30:00Z,1.0,1.1,0.9\n";
        let err = read_feed(feed.as_bytes()).unwrap_err();
        assert!(matches!(err, FeedError::OutOfOrder { row: 2, .. }));
    }

    #[test]
    fn rejects_malformed_number() {
        let feed = "timestamp,price,high,low\n2024-07-01T09:30:00Z,abc,1.1,0.9\n";
        assert!(matches!(
            read_feed(feed.as_bytes()).unwrap_err(),
            FeedError::Csv(_)
        ));
    }

    #[test]
    fn synthetic_feed_is_deterministic_and_aligned() {
        let start = Utc.with_ymd_and_hms(2024, 7, 1, 9, 30, 17).unwrap();
        let a = synthetic_feed("EUR/GBP OTC", start, 200, 7);
        let b = synthetic_feed("EUR/GBP OTC", start, 200, 7);
        assert_eq!(a, b);
        assert_eq!(a.len(), 200);
        assert_eq!(a[0].timestamp, Utc.with_ymd_and_hms(2024, 7, 1, 9, 31, 0).unwrap());
        for r in &a {
            let snap = r.snapshot().unwrap();
            assert!(snap.period_low() <= snap.current_price());
            assert!(snap.current_price() <= snap.period_high());
        }
    }

    #[test]
    fn synthetic_feed_depends_on_pair_and_seed() {
        let start = Utc.with_ymd_and_hms(2024, 7, 1, 9, 30, 0).unwrap();
        let base = synthetic_feed("EUR/GBP OTC", start, 50, 1);
        assert_ne!(base, synthetic_feed("AUD/USD OTC", start, 50, 1));
        assert_ne!(base, synthetic_feed("EUR/GBP OTC", start, 50, 2));
    }
}
