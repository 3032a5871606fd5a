use analysis_core::{
    normalize_symbol, AnalysisError, ComprehensiveAnalysis, MarketSnapshot, SnapshotProvider,
};
use fundamental_analysis::{FundamentalAnalysisEngine, ValueInvestorScorer};
use futures_util::future::join_all;
use risk_manager::RiskAssessor;
use std::collections::HashSet;
use std::sync::Arc;
use technical_analysis::TechnicalAnalysisEngine;

pub mod recommendation;
pub use recommendation::{calculate_confidence, composite_score, confidence_from_counts, overall_recommendation};

/// Runs the four extractors and the aggregator over one snapshot.
///
/// Pure: the result depends on the snapshot alone, so analyzing the same
/// snapshot twice yields identical output.
pub fn analyze_snapshot(snapshot: &MarketSnapshot) -> ComprehensiveAnalysis {
    SnapshotAnalyzer::new().analyze(snapshot)
}

/// The extractor set, without any data source attached
#[derive(Default)]
pub struct SnapshotAnalyzer {
    technical_analyzer: TechnicalAnalysisEngine,
    fundamental_analyzer: FundamentalAnalysisEngine,
    value_scorer: ValueInvestorScorer,
    risk_assessor: RiskAssessor,
}

impl SnapshotAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analyze(&self, snapshot: &MarketSnapshot) -> ComprehensiveAnalysis {
        // Extractors are independent; the aggregator needs all four
        let technical = self.technical_analyzer.analyze(snapshot);
        let fundamental = self.fundamental_analyzer.analyze(snapshot);
        let value_score = self.value_scorer.score(snapshot);
        let risk = self.risk_assessor.assess(snapshot);

        let recommendation = overall_recommendation(&technical, &fundamental, &value_score, &risk);
        let confidence = calculate_confidence(&technical, &fundamental, &value_score);

        ComprehensiveAnalysis {
            symbol: snapshot.symbol.clone(),
            company_name: snapshot.company_name.clone(),
            price: snapshot.price,
            change_percent: snapshot.change_percent,
            timestamp: snapshot.timestamp,
            source: snapshot.source,
            technical,
            fundamental,
            value_score,
            risk,
            recommendation,
            confidence,
        }
    }
}

/// Fetches snapshots from a provider and analyzes them
pub struct AnalysisOrchestrator {
    provider: Arc<dyn SnapshotProvider>,
    analyzer: SnapshotAnalyzer,
}

impl AnalysisOrchestrator {
    pub fn new(provider: Arc<dyn SnapshotProvider>) -> Self {
        Self {
            provider,
            analyzer: SnapshotAnalyzer::new(),
        }
    }

    /// Fetch a fresh snapshot for `symbol` and analyze it
    pub async fn analyze(&self, symbol: &str) -> Result<ComprehensiveAnalysis, AnalysisError> {
        let symbol = normalize_symbol(symbol)?;
        tracing::info!("Starting analysis for {}", symbol);

        let snapshot = self.provider.get_snapshot(&symbol).await?;
        if snapshot.source.is_synthetic() {
            tracing::info!("Analyzing synthetic snapshot for {}", symbol);
        }

        let analysis = self.analyzer.analyze(&snapshot);
        tracing::info!(
            "{}: {} (score {:.1}, confidence {}%, trend {}, {})",
            analysis.symbol,
            analysis.recommendation.action.as_str(),
            analysis.recommendation.composite_score,
            analysis.confidence,
            analysis.technical.trend.as_str(),
            analysis.risk.level.as_str(),
        );

        Ok(analysis)
    }

    /// Analyze several symbols concurrently. Repeats of a symbol (ignoring case
    /// and surrounding whitespace) are analyzed once; results keep first-seen order.
    pub async fn analyze_many(&self, symbols: &[String]) -> Vec<(String, Result<ComprehensiveAnalysis, AnalysisError>)> {
        let mut seen = HashSet::new();
        let unique: Vec<&String> = symbols
            .iter()
            .filter(|s| seen.insert(s.trim().to_uppercase()))
            .collect();

        let results = join_all(unique.iter().map(|s| self.analyze(s))).await;
        unique.into_iter().cloned().zip(results).collect()
    }
}

#[cfg(test)]
mod tests;
