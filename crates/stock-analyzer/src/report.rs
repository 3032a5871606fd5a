//! Plain-text rendering of an analysis for the terminal.

use analysis_core::{ComprehensiveAnalysis, SignalType};
use market_data::MarketStatus;

pub const DISCLAIMER: &str = "Educational use only. Scores come from simple rules over a \
single snapshot (possibly synthetic) and are not investment advice.";

pub fn render_market_status(status: &MarketStatus) -> String {
    format!("Market {}: {}", status.session.as_str(), status.reason)
}

pub fn render(analysis: &ComprehensiveAnalysis) -> String {
    let mut lines = Vec::new();

    let provenance = if analysis.source.is_synthetic() { " [demo data]" } else { "" };
    lines.push(format!(
        "== {} ({}) ${:.2} ({:+.2}%){}",
        analysis.symbol, analysis.company_name, analysis.price, analysis.change_percent, provenance
    ));
    lines.push(format!("   as of {}", analysis.timestamp.format("%Y-%m-%d %H:%M:%S UTC")));

    let t = &analysis.technical;
    lines.push(format!(
        "Technical: {} | momentum {} | volatility {} | bullish {} / bearish {}",
        t.trend.as_str(),
        t.momentum.as_str(),
        t.volatility.as_str(),
        t.bullish_signals,
        t.bearish_signals
    ));
    for signal in &t.signals {
        let marker = match signal.signal_type {
            SignalType::Bullish => '+',
            SignalType::Bearish => '-',
            SignalType::Neutral => '~',
        };
        lines.push(format!(
            "  {} {}: {} ({})",
            marker,
            signal.indicator,
            signal.reason,
            signal.strength.as_str()
        ));
    }

    let f = &analysis.fundamental;
    lines.push(format!(
        "Fundamental: {}/100 | {} | {}",
        f.overall_score,
        f.valuation.as_str(),
        f.quality.as_str()
    ));
    for (name, metric) in &f.scores {
        lines.push(format!(
            "  {}: {}/{} {} - {}",
            name.to_uppercase(),
            metric.score,
            metric.max_score,
            metric.status,
            metric.reason
        ));
    }

    let v = &analysis.value_score;
    lines.push(format!("Value score: {}/{}", v.score, v.max_score));
    for factor in &v.factors {
        lines.push(format!("  + {}", factor));
    }
    for warning in &v.warnings {
        lines.push(format!("  ! {}", warning));
    }

    lines.push(format!("Risk: {}", analysis.risk.level.as_str()));
    for risk in &analysis.risk.risks {
        lines.push(format!("  ! {}", risk));
    }

    lines.push(format!(
        "Recommendation: {} (score {:.1}, confidence {}%)",
        analysis.recommendation.action.as_str(),
        analysis.recommendation.composite_score,
        analysis.confidence
    ));

    lines.join("\n")
}
