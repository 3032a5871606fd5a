use analysis_core::{normalize_symbol, AnalysisError, MarketSnapshot, SnapshotProvider};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::alpha_vantage::{AlphaVantageClient, GlobalQuote};
use crate::cache::SnapshotCache;
use crate::config::{FallbackPolicy, MarketDataConfig};
use crate::synthetic;

/// Snapshot provider backed by Alpha Vantage quotes, with synthetic data as
/// the default answer whenever no key is configured or the live call fails.
pub struct StockDataService {
    config: MarketDataConfig,
    alpha_vantage: Option<AlphaVantageClient>,
    cache: SnapshotCache,
}

impl StockDataService {
    pub fn new(config: MarketDataConfig) -> Result<Self, AnalysisError> {
        config.validate()?;

        let alpha_vantage = config
            .live_api_key()
            .map(|key| AlphaVantageClient::new(key.to_string(), &config));
        if alpha_vantage.is_none() {
            tracing::info!("No Alpha Vantage key configured, serving synthetic snapshots");
        }

        Ok(Self {
            cache: SnapshotCache::new(config.cache_ttl),
            alpha_vantage,
            config,
        })
    }

    pub fn has_live_provider(&self) -> bool {
        self.alpha_vantage.is_some()
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    fn synthesize(&self, symbol: &str, now: DateTime<Utc>) -> MarketSnapshot {
        synthetic::generate_snapshot(symbol, now, &mut rand::thread_rng())
    }

    fn enrich(&self, quote: GlobalQuote, now: DateTime<Utc>) -> MarketSnapshot {
        synthetic::enrich_quote(quote, now, &mut rand::thread_rng())
    }

    /// Snapshot for `symbol` as of `now`, served from the current cache bucket when possible.
    pub async fn get_snapshot_at(&self, symbol: &str, now: DateTime<Utc>) -> Result<MarketSnapshot, AnalysisError> {
        let symbol = normalize_symbol(symbol)?;

        if let Some(cached) = self.cache.get(&symbol, now) {
            tracing::debug!("Snapshot cache hit for {}", symbol);
            return Ok(cached);
        }

        let snapshot = match &self.alpha_vantage {
            Some(client) => match client.get_quote(&symbol).await {
                Ok(quote) => self.enrich(quote, now),
                Err(e) => match self.config.fallback {
                    FallbackPolicy::Synthetic => {
                        tracing::warn!("Alpha Vantage failed for {}: {}. Using demo data", symbol, e);
                        self.synthesize(&symbol, now)
                    }
                    FallbackPolicy::Fail => {
                        tracing::warn!("Alpha Vantage failed for {}: {}", symbol, e);
                        return Err(e);
                    }
                },
            },
            None => self.synthesize(&symbol, now),
        };

        self.cache.insert(&symbol, now, snapshot.clone());
        Ok(snapshot)
    }
}

#[async_trait]
impl SnapshotProvider for StockDataService {
    async fn get_snapshot(&self, symbol: &str) -> Result<MarketSnapshot, AnalysisError> {
        self.get_snapshot_at(symbol, Utc::now()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::DataSource;
    use chrono::TimeZone;
    use std::time::Duration;

    fn at(m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 14, m, s).unwrap()
    }

    /// Points at a local port nothing listens on so the live call fails fast
    fn unreachable_config(fallback: FallbackPolicy) -> MarketDataConfig {
        MarketDataConfig {
            alpha_vantage_api_key: Some("TESTKEY".to_string()),
            base_url: "http://127.0.0.1:9/query".to_string(),
            fallback,
            request_timeout: Duration::from_secs(2),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_no_key_serves_synthetic() {
        let service = StockDataService::new(MarketDataConfig::default()).unwrap();
        assert!(!service.has_live_provider());

        let snap = service.get_snapshot_at(" aapl ", at(0, 0)).await.unwrap();
        assert_eq!(snap.symbol, "AAPL");
        assert_eq!(snap.company_name, "Apple Inc.");
        assert_eq!(snap.source, DataSource::Synthetic);
    }

    #[tokio::test]
    async fn test_cached_within_bucket_and_refreshed_after() {
        let service = StockDataService::new(MarketDataConfig::default()).unwrap();

        let first = service.get_snapshot_at("MSFT", at(0, 1)).await.unwrap();
        let second = service.get_snapshot_at("MSFT", at(0, 59)).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(service.cached_entries(), 1);

        let third = service.get_snapshot_at("MSFT", at(1, 0)).await.unwrap();
        assert_eq!(third.timestamp, at(1, 0));
        assert_eq!(service.cached_entries(), 1);
    }

    #[tokio::test]
    async fn test_invalid_symbol_rejected() {
        let service = StockDataService::new(MarketDataConfig::default()).unwrap();
        let result = service.get_snapshot_at("  ", at(0, 0)).await;
        assert!(matches!(result, Err(AnalysisError::InvalidSymbol(_))));
    }

    #[tokio::test]
    async fn test_live_failure_falls_back_to_synthetic() {
        let service = StockDataService::new(unreachable_config(FallbackPolicy::Synthetic)).unwrap();
        assert!(service.has_live_provider());

        let snap = service.get_snapshot_at("NVDA", at(0, 0)).await.unwrap();
        assert_eq!(snap.source, DataSource::Synthetic);
        assert_eq!(snap.company_name, "NVIDIA Corporation");
    }

    #[tokio::test]
    async fn test_live_failure_propagates_with_fail_policy() {
        let service = StockDataService::new(unreachable_config(FallbackPolicy::Fail)).unwrap();
        let result = service.get_snapshot_at("NVDA", at(0, 0)).await;
        assert!(matches!(result, Err(AnalysisError::ApiError(_))));
        assert_eq!(service.cached_entries(), 0);
    }

    #[tokio::test]
    async fn test_provider_trait_object() {
        let provider: Box<dyn SnapshotProvider> =
            Box::new(StockDataService::new(MarketDataConfig::default()).unwrap());
        let snap = provider.get_snapshot("tsla").await.unwrap();
        assert_eq!(snap.symbol, "TSLA");
    }
}
