//! Value-investor checklist.
//!
//! Each check awards points independently. The awards are not normalized, so
//! `score` tops out at the sum of the implemented awards (currently 50) while
//! `max_score` stays at 100 to leave room for further checks.

use analysis_core::{MarketSnapshot, ValueScoreVerdict};

const VALUE_MAX_SCORE: u32 = 100;

pub struct ValueInvestorScorer;

impl ValueInvestorScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, snapshot: &MarketSnapshot) -> ValueScoreVerdict {
        let mut score = 0;
        let mut factors = Vec::new();
        // No check emits warnings yet
        let warnings = Vec::new();

        if snapshot.pe > 0.0 && snapshot.pe < 20.0 {
            score += 20;
            factors.push("Reasonable P/E ratio (< 20)".to_string());
        }

        if snapshot.roe > 15.0 {
            score += 20;
            factors.push("Strong return on equity (> 15%)".to_string());
        }

        if snapshot.dividend_yield > 0.0 {
            score += 10;
            factors.push("Pays dividend (management discipline)".to_string());
        }

        ValueScoreVerdict {
            score,
            factors,
            warnings,
            max_score: VALUE_MAX_SCORE,
        }
    }
}

impl Default for ValueInvestorScorer {
    fn default() -> Self {
        Self::new()
    }
}
