//! Recommendation aggregation.
//!
//! The composite score is `50 + trend delta + 0.2 * fundamental + 0.2 * value`.
//! Risk is deliberately left out of it: the risk verdict is surfaced alongside
//! the recommendation for display only. Folding risk into the score changes
//! every band and needs its own decision.

use analysis_core::{
    Action, FundamentalVerdict, Recommendation, RiskVerdict, TechnicalVerdict, ValueScoreVerdict,
};

const BASE_SCORE: f64 = 50.0;
const FUNDAMENTAL_WEIGHT: f64 = 0.2;
const VALUE_WEIGHT: f64 = 0.2;

const BASE_CONFIDENCE: u64 = 60;
const CONFIDENCE_PER_NET_SIGNAL: u64 = 3;
const MIN_CONFIDENCE: u64 = 25;
const MAX_CONFIDENCE: u64 = 95;

pub fn composite_score(
    technical: &TechnicalVerdict,
    fundamental: &FundamentalVerdict,
    value_score: &ValueScoreVerdict,
) -> f64 {
    let mut score = BASE_SCORE;
    score += technical.trend.score_delta();
    score += fundamental.overall_score as f64 * FUNDAMENTAL_WEIGHT;
    score += value_score.score as f64 * VALUE_WEIGHT;
    score
}

/// Combine the verdicts into a recommendation band.
///
/// `_risk` is accepted so callers hand over the full set of verdicts, but it
/// does not move the score.
pub fn overall_recommendation(
    technical: &TechnicalVerdict,
    fundamental: &FundamentalVerdict,
    value_score: &ValueScoreVerdict,
    _risk: &RiskVerdict,
) -> Recommendation {
    let score = composite_score(technical, fundamental, value_score);
    Recommendation::new(Action::from_score(score), score)
}

/// Signal agreement as a percentage in [25, 95]. Not a probability.
///
/// Only the technical tally feeds it today; the other verdicts are part of the
/// signature so more agreement sources can be added without touching callers.
pub fn calculate_confidence(
    technical: &TechnicalVerdict,
    _fundamental: &FundamentalVerdict,
    _value_score: &ValueScoreVerdict,
) -> u32 {
    confidence_from_counts(technical.bullish_signals, technical.bearish_signals)
}

pub fn confidence_from_counts(bullish: u32, bearish: u32) -> u32 {
    let alignment = bullish.abs_diff(bearish) as u64;
    let confidence = BASE_CONFIDENCE + CONFIDENCE_PER_NET_SIGNAL * alignment;
    confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE) as u32
}
