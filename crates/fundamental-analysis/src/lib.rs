use analysis_core::{FundamentalVerdict, MarketSnapshot, MetricScore, Quality, Valuation};
use std::collections::BTreeMap;

pub mod value;

pub use value::ValueInvestorScorer;

const METRIC_MAX_SCORE: u32 = 5;

pub struct FundamentalAnalysisEngine;

impl FundamentalAnalysisEngine {
    pub fn new() -> Self {
        Self
    }

    /// P/E scoring. Only the upper bound is checked on the middle tier, so a
    /// loss-making company (pe <= 0) lands in "Good".
    fn score_pe(&self, pe: f64) -> MetricScore {
        if pe > 0.0 && pe < 15.0 {
            metric(5, "Excellent", "Very reasonable P/E ratio")
        } else if pe < 25.0 {
            metric(3, "Good", "Reasonable P/E ratio")
        } else {
            metric(1, "Expensive", "High P/E ratio")
        }
    }

    fn score_roe(&self, roe: f64) -> MetricScore {
        if roe > 20.0 {
            metric(5, "Excellent", "Outstanding return on equity")
        } else if roe > 15.0 {
            metric(4, "Very Good", "Strong return on equity")
        } else {
            metric(2, "Average", "Adequate return on equity")
        }
    }

    /// Score each metric 1-5 and roll them up into a 0-100 quality score.
    pub fn analyze(&self, snapshot: &MarketSnapshot) -> FundamentalVerdict {
        let mut scores = BTreeMap::new();
        scores.insert("pe".to_string(), self.score_pe(snapshot.pe));
        scores.insert("roe".to_string(), self.score_roe(snapshot.roe));

        let overall_score = overall_score(&scores);

        let valuation = if snapshot.pe < 20.0 {
            Valuation::Reasonable
        } else {
            Valuation::Expensive
        };
        let quality = if overall_score > 70 {
            Quality::HighQuality
        } else {
            Quality::AverageQuality
        };

        FundamentalVerdict {
            scores,
            overall_score,
            valuation,
            quality,
        }
    }
}

impl Default for FundamentalAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn metric(score: u32, status: &str, reason: &str) -> MetricScore {
    MetricScore {
        score,
        max_score: METRIC_MAX_SCORE,
        status: status.to_string(),
        reason: reason.to_string(),
    }
}

/// Awarded points as a rounded percentage of the points available
fn overall_score(scores: &BTreeMap<String, MetricScore>) -> u32 {
    let (total, max) = scores
        .values()
        .fold((0u32, 0u32), |(t, m), s| (t + s.score, m + s.max_score));
    if max == 0 {
        return 0;
    }
    ((total as f64 / max as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::{DataSource, SnapshotExtras};
    use chrono::Utc;

    fn snapshot(pe: f64, roe: f64) -> MarketSnapshot {
        MarketSnapshot {
            symbol: "TEST".to_string(),
            company_name: "Test Corporation".to_string(),
            timestamp: Utc::now(),
            price: 100.0,
            change: 0.0,
            change_percent: 0.0,
            volume: 1_000_000,
            sma20: 100.0,
            sma50: 100.0,
            sma200: 100.0,
            rsi: 50.0,
            macd: 0.0,
            atr: 3.0,
            pe,
            eps: 4.0,
            dividend_yield: 0.0,
            roe,
            roa: 5.0,
            debt_to_equity: 1.0,
            book_value: 20.0,
            market_cap: "50B".to_string(),
            beta: 1.0,
            source: DataSource::Synthetic,
            extras: SnapshotExtras::default(),
        }
    }

    #[test]
    fn test_excellent_metrics_score_100() {
        let verdict = FundamentalAnalysisEngine::new().analyze(&snapshot(10.0, 22.0));

        assert_eq!(verdict.scores["pe"].score, 5);
        assert_eq!(verdict.scores["roe"].score, 5);
        assert_eq!(verdict.overall_score, 100);
        assert_eq!(verdict.valuation, Valuation::Reasonable);
        assert_eq!(verdict.quality, Quality::HighQuality);
    }

    #[test]
    fn test_pe_tiers() {
        let engine = FundamentalAnalysisEngine::new();
        assert_eq!(engine.score_pe(14.9).status, "Excellent");
        assert_eq!(engine.score_pe(15.0).status, "Good");
        assert_eq!(engine.score_pe(24.9).score, 3);
        assert_eq!(engine.score_pe(25.0).status, "Expensive");
        assert_eq!(engine.score_pe(80.0).score, 1);
    }

    #[test]
    fn test_non_positive_pe_scores_as_good() {
        let engine = FundamentalAnalysisEngine::new();
        assert_eq!(engine.score_pe(0.0).score, 3);
        assert_eq!(engine.score_pe(-12.0).status, "Good");
    }

    #[test]
    fn test_roe_tiers() {
        let engine = FundamentalAnalysisEngine::new();
        assert_eq!(engine.score_roe(20.1).score, 5);
        assert_eq!(engine.score_roe(20.0).status, "Very Good");
        assert_eq!(engine.score_roe(15.1).score, 4);
        assert_eq!(engine.score_roe(15.0).status, "Average");
        assert_eq!(engine.score_roe(-3.0).score, 2);
    }

    #[test]
    fn test_overall_score_rounding_and_quality() {
        let engine = FundamentalAnalysisEngine::new();

        // 3 + 4 = 7 of 10
        let verdict = engine.analyze(&snapshot(18.0, 17.0));
        assert_eq!(verdict.overall_score, 70);
        assert_eq!(verdict.quality, Quality::AverageQuality);

        // 5 + 4 = 9 of 10
        let verdict = engine.analyze(&snapshot(12.0, 18.0));
        assert_eq!(verdict.overall_score, 90);
        assert_eq!(verdict.quality, Quality::HighQuality);

        // 1 + 2 = 3 of 10
        let verdict = engine.analyze(&snapshot(40.0, 5.0));
        assert_eq!(verdict.overall_score, 30);
        assert_eq!(verdict.valuation, Valuation::Expensive);
    }

    #[test]
    fn test_valuation_threshold_is_independent_of_pe_score() {
        let engine = FundamentalAnalysisEngine::new();
        assert_eq!(engine.analyze(&snapshot(19.9, 10.0)).valuation, Valuation::Reasonable);
        assert_eq!(engine.analyze(&snapshot(20.0, 10.0)).valuation, Valuation::Expensive);
        // Loss-makers read as reasonable
        assert_eq!(engine.analyze(&snapshot(-5.0, 10.0)).valuation, Valuation::Reasonable);
    }

    #[test]
    fn test_overall_score_bounded() {
        let engine = FundamentalAnalysisEngine::new();
        for pe in [-50.0, 0.0, 5.0, 15.0, 22.0, 30.0, 1000.0, f64::NAN] {
            for roe in [-20.0, 0.0, 16.0, 25.0, f64::NAN] {
                let score = engine.analyze(&snapshot(pe, roe)).overall_score;
                assert!(score <= 100);
                assert!(score >= 30, "minimum awarded is 1 + 2 of 10");
            }
        }
    }

    #[test]
    fn test_nan_pe_is_expensive() {
        let verdict = FundamentalAnalysisEngine::new().analyze(&snapshot(f64::NAN, 22.0));
        assert_eq!(verdict.scores["pe"].status, "Expensive");
        assert_eq!(verdict.valuation, Valuation::Expensive);
    }
}
