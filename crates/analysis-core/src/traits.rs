use async_trait::async_trait;
use crate::{AnalysisError, MarketSnapshot};

/// Source of market snapshots for the analysis pipeline.
///
/// Implementations own fetching, caching and degradation to synthetic data.
/// A provider configured to fall back should never surface transport or parse
/// failures to the caller.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    async fn get_snapshot(&self, symbol: &str) -> Result<MarketSnapshot, AnalysisError>;
}
