use analysis_core::MarketSnapshot;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::time::Duration;

/// Snapshot cache keyed by symbol and wall-clock bucket.
///
/// A lookup hits only while "now" falls in the same TTL-sized bucket as the
/// insert, so entries expire at bucket boundaries rather than TTL after insert.
pub struct SnapshotCache {
    entries: DashMap<String, MarketSnapshot>,
    ttl_ms: i64,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl_ms: (ttl.as_millis() as i64).max(1),
        }
    }

    fn bucket(&self, now: DateTime<Utc>) -> i64 {
        let ms = now.timestamp_millis();
        ms - ms.rem_euclid(self.ttl_ms)
    }

    pub fn key(&self, symbol: &str, now: DateTime<Utc>) -> String {
        format!("{}_{}", symbol, self.bucket(now))
    }

    pub fn get(&self, symbol: &str, now: DateTime<Utc>) -> Option<MarketSnapshot> {
        self.entries.get(&self.key(symbol, now)).map(|e| e.value().clone())
    }

    /// Store a snapshot and drop any entries from earlier buckets
    pub fn insert(&self, symbol: &str, now: DateTime<Utc>, snapshot: MarketSnapshot) {
        let current = self.bucket(now);
        self.entries.retain(|key, _| {
            key.rsplit_once('_')
                .and_then(|(_, b)| b.parse::<i64>().ok())
                .map_or(false, |b| b >= current)
        });
        self.entries.insert(self.key(symbol, now), snapshot);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
