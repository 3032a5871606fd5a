#[cfg(test)]
mod orchestrator_tests {
    use crate::{analyze_snapshot, AnalysisOrchestrator};
    use analysis_core::{
        Action, AnalysisError, DataSource, MarketSnapshot, Momentum, Quality, RiskLevel,
        SnapshotExtras, SnapshotProvider, Trend, Volatility,
    };
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn sample_snapshot(symbol: &str) -> MarketSnapshot {
        MarketSnapshot {
            symbol: symbol.to_string(),
            company_name: format!("{} Corporation", symbol),
            timestamp: Utc.with_ymd_and_hms(2024, 6, 3, 14, 30, 0).unwrap(),
            price: 100.0,
            change: 1.25,
            change_percent: 1.27,
            volume: 12_345_678,
            sma20: 99.0,
            sma50: 97.0,
            sma200: 90.0,
            rsi: 50.0,
            macd: 1.0,
            atr: 3.2,
            pe: 10.0,
            eps: 6.1,
            dividend_yield: 2.0,
            roe: 22.0,
            roa: 11.0,
            debt_to_equity: 0.4,
            book_value: 31.0,
            market_cap: "85B".to_string(),
            beta: 1.1,
            source: DataSource::Synthetic,
            extras: SnapshotExtras::default(),
        }
    }

    /// Serves a fixed snapshot per call and counts fetches
    struct FixedProvider {
        calls: AtomicUsize,
    }

    impl FixedProvider {
        fn new() -> Self {
            Self { calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl SnapshotProvider for FixedProvider {
        async fn get_snapshot(&self, symbol: &str) -> Result<MarketSnapshot, AnalysisError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if symbol == "FAIL" {
                return Err(AnalysisError::ApiError("upstream down".to_string()));
            }
            Ok(sample_snapshot(symbol))
        }
    }

    #[test]
    fn test_full_pipeline_strong_buy() {
        let analysis = analyze_snapshot(&sample_snapshot("GOOD"));

        // +2 (MA) +1 (MACD)
        assert_eq!(analysis.technical.trend, Trend::StrongBullish);
        assert_eq!(analysis.technical.momentum, Momentum::Neutral);
        assert_eq!(analysis.technical.volatility, Volatility::Medium);

        // pe 10 and roe 22 both score 5
        assert_eq!(analysis.fundamental.overall_score, 100);
        assert_eq!(analysis.fundamental.quality, Quality::HighQuality);

        // 20 + 20 + 10
        assert_eq!(analysis.value_score.score, 50);
        assert_eq!(analysis.risk.level, RiskLevel::Low);

        // 50 + 15 + 20 + 10
        assert_eq!(analysis.recommendation.composite_score, 95.0);
        assert_eq!(analysis.recommendation.action, Action::StrongBuy);
        assert_eq!(analysis.confidence, 69);
    }

    #[test]
    fn test_full_pipeline_sell() {
        let mut snapshot = sample_snapshot("WEAK");
        snapshot.sma200 = 130.0;
        snapshot.rsi = 82.0;
        snapshot.macd = -0.8;
        snapshot.pe = 45.0;
        snapshot.roe = 6.0;
        snapshot.dividend_yield = 0.0;
        snapshot.beta = 1.9;

        let analysis = analyze_snapshot(&snapshot);
        assert_eq!(analysis.technical.trend, Trend::StrongBearish);
        assert_eq!(analysis.fundamental.overall_score, 30);
        assert_eq!(analysis.value_score.score, 0);
        assert_eq!(analysis.risk.level, RiskLevel::High);
        assert_eq!(analysis.risk.risks.len(), 2);
        // 50 - 15 + 6 + 0
        assert!((analysis.recommendation.composite_score - 41.0).abs() < 1e-9);
        assert_eq!(analysis.recommendation.action, Action::Sell);
        // |0 - 4| * 3 + 60
        assert_eq!(analysis.confidence, 72);
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let snapshot = sample_snapshot("SAME");
        let first = serde_json::to_string(&analyze_snapshot(&snapshot)).unwrap();
        let second = serde_json::to_string(&analyze_snapshot(&snapshot)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_pipeline_does_not_touch_snapshot() {
        let snapshot = sample_snapshot("PURE");
        let before = snapshot.clone();
        let _ = analyze_snapshot(&snapshot);
        assert_eq!(snapshot, before);
    }

    #[test]
    fn test_analysis_echoes_snapshot_identity() {
        let mut snapshot = sample_snapshot("ECHO");
        snapshot.source = DataSource::AlphaVantage;
        let analysis = analyze_snapshot(&snapshot);

        assert_eq!(analysis.symbol, "ECHO");
        assert_eq!(analysis.company_name, "ECHO Corporation");
        assert_eq!(analysis.timestamp, snapshot.timestamp);
        assert_eq!(analysis.source, DataSource::AlphaVantage);
        assert_eq!(analysis.price, 100.0);
    }

    #[test]
    fn test_degenerate_snapshot_still_produces_result() {
        let mut snapshot = sample_snapshot("ODD");
        snapshot.price = -1.0;
        snapshot.rsi = 140.0;
        snapshot.pe = f64::NAN;
        snapshot.roe = -30.0;
        snapshot.atr = -2.0;

        let analysis = analyze_snapshot(&snapshot);
        assert_eq!(analysis.technical.momentum, Momentum::Overbought);
        assert_eq!(analysis.technical.volatility, Volatility::Low);
        assert!((25..=95).contains(&analysis.confidence));
    }

    #[tokio::test]
    async fn test_orchestrator_normalizes_symbol() {
        let provider = Arc::new(FixedProvider::new());
        let orchestrator = AnalysisOrchestrator::new(provider.clone());

        let analysis = orchestrator.analyze("  msft ").await.unwrap();
        assert_eq!(analysis.symbol, "MSFT");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_symbol_never_reaches_provider() {
        let provider = Arc::new(FixedProvider::new());
        let orchestrator = AnalysisOrchestrator::new(provider.clone());

        let result = orchestrator.analyze("   ").await;
        assert!(matches!(result, Err(AnalysisError::InvalidSymbol(_))));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let orchestrator = AnalysisOrchestrator::new(Arc::new(FixedProvider::new()));
        let result = orchestrator.analyze("fail").await;
        assert!(matches!(result, Err(AnalysisError::ApiError(_))));
    }

    #[test]
    fn test_analyze_many_keeps_order() {
        let orchestrator = AnalysisOrchestrator::new(Arc::new(FixedProvider::new()));
        let symbols = vec!["AAPL".to_string(), "FAIL".to_string(), "nvda".to_string()];

        let results = tokio_test::block_on(orchestrator.analyze_many(&symbols));

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, "AAPL");
        assert_eq!(results[0].1.as_ref().unwrap().symbol, "AAPL");
        assert!(results[1].1.is_err());
        assert_eq!(results[2].1.as_ref().unwrap().symbol, "NVDA");
    }

    #[test]
    fn test_analyze_many_fetches_repeated_symbol_once() {
        let provider = Arc::new(FixedProvider::new());
        let orchestrator = AnalysisOrchestrator::new(provider.clone());
        let symbols: Vec<String> = ["aapl", "AAPL", " msft", "aapl "]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let results = tokio_test::block_on(orchestrator.analyze_many(&symbols));

        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "aapl");
        assert_eq!(results[0].1.as_ref().unwrap().symbol, "AAPL");
        assert_eq!(results[1].1.as_ref().unwrap().symbol, "MSFT");
    }

    #[test]
    fn test_json_output_carries_display_attributes() {
        let analysis = analyze_snapshot(&sample_snapshot("GOOD"));
        let json = serde_json::to_value(&analysis).unwrap();

        assert_eq!(json["recommendation"]["action"], "STRONG BUY");
        assert_eq!(json["recommendation"]["style"]["color"], Action::StrongBuy.style().color);
        assert_eq!(json["risk"]["color"], RiskLevel::Low.color());
    }
}
