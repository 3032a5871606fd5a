//! Risk Assessment Module
//!
//! Flags snapshot-level risks and grades them Low / Medium / High. The grade is
//! the highest level any triggered rule asks for; rules can only raise it.

use analysis_core::{MarketSnapshot, RiskLevel, RiskVerdict};

const HIGH_BETA: f64 = 1.5;
const HIGH_PE: f64 = 30.0;

pub struct RiskAssessor;

impl RiskAssessor {
    pub fn new() -> Self {
        Self
    }

    pub fn assess(&self, snapshot: &MarketSnapshot) -> RiskVerdict {
        let mut risks = Vec::new();
        let mut level = RiskLevel::Low;

        if snapshot.beta > HIGH_BETA {
            risks.push("High volatility (Beta > 1.5)".to_string());
            level = level.max(RiskLevel::High);
        }

        if snapshot.pe > HIGH_PE {
            risks.push("High valuation risk".to_string());
            level = level.max(RiskLevel::Medium);
        }

        RiskVerdict::new(level, risks)
    }
}

impl Default for RiskAssessor {
    fn default() -> Self {
        Self::new()
    }
}
