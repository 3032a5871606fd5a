use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a snapshot's values came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DataSource {
    /// Live quote, with the remaining fields synthesized around it
    AlphaVantage,
    /// Fully generated demo data
    #[default]
    Synthetic,
}

impl DataSource {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, DataSource::Synthetic)
    }
}

/// Indicators the data collaborator may attach beyond the ones the scoring
/// engine reads. None of these feed any verdict.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotExtras {
    pub ema12: Option<f64>,
    pub ema26: Option<f64>,
    pub adx: Option<f64>,
    pub stochastic: Option<f64>,
    pub williams_r: Option<f64>,
    pub cci: Option<f64>,
    pub roc: Option<f64>,
    pub obv: Option<u64>,
    pub mfi: Option<f64>,
    pub current_ratio: Option<f64>,
    pub quick_ratio: Option<f64>,
    pub price_to_book: Option<f64>,
    pub price_to_sales: Option<f64>,
    pub gross_margin: Option<f64>,
    pub operating_margin: Option<f64>,
    pub net_margin: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
}

/// Point-in-time bundle of price, technical and fundamental fields for one symbol.
///
/// Values are taken as given: nothing here is validated or clamped, so an RSI
/// outside 0-100 or a negative price simply flows through the extractors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub symbol: String,
    pub company_name: String,
    pub timestamp: DateTime<Utc>,

    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,

    pub sma20: f64,
    pub sma50: f64,
    pub sma200: f64,

    pub rsi: f64,
    pub macd: f64,
    pub atr: f64,

    pub pe: f64,
    pub eps: f64,
    pub dividend_yield: f64,
    pub roe: f64,
    pub roa: f64,
    pub debt_to_equity: f64,
    pub book_value: f64,
    /// Display string such as "2.41T"; never parsed
    pub market_cap: String,

    pub beta: f64,

    #[serde(default)]
    pub source: DataSource,
    #[serde(default)]
    pub extras: SnapshotExtras,
}

/// Direction of a single observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalType {
    Bullish,
    Bearish,
    Neutral,
}

/// How much weight a reader should give a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalStrength {
    Weak,
    Moderate,
    Strong,
}

impl SignalStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalStrength::Weak => "Weak",
            SignalStrength::Moderate => "Moderate",
            SignalStrength::Strong => "Strong",
        }
    }
}

/// A directional observation with a named indicator and its justification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub signal_type: SignalType,
    pub indicator: String,
    pub reason: String,
    pub strength: SignalStrength,
}

impl Signal {
    pub fn new(
        signal_type: SignalType,
        indicator: &str,
        reason: &str,
        strength: SignalStrength,
    ) -> Self {
        Self {
            signal_type,
            indicator: indicator.to_string(),
            reason: reason.to_string(),
            strength,
        }
    }

    pub fn is_bullish(&self) -> bool {
        self.signal_type == SignalType::Bullish
    }
}

/// Technical trend classification from the net weighted signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    #[serde(rename = "Strong Bullish")]
    StrongBullish,
    Bullish,
    Neutral,
    Bearish,
    #[serde(rename = "Strong Bearish")]
    StrongBearish,
}

impl Trend {
    pub fn from_net_signal(net: i64) -> Self {
        match net {
            n if n > 2 => Trend::StrongBullish,
            n if n > 0 => Trend::Bullish,
            n if n < -2 => Trend::StrongBearish,
            n if n < 0 => Trend::Bearish,
            _ => Trend::Neutral,
        }
    }

    /// Contribution of the trend to the composite recommendation score
    pub fn score_delta(&self) -> f64 {
        match self {
            Trend::StrongBullish => 15.0,
            Trend::Bullish => 10.0,
            Trend::Neutral => 0.0,
            Trend::Bearish => -10.0,
            Trend::StrongBearish => -15.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::StrongBullish => "Strong Bullish",
            Trend::Bullish => "Bullish",
            Trend::Neutral => "Neutral",
            Trend::Bearish => "Bearish",
            Trend::StrongBearish => "Strong Bearish",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Momentum {
    Overbought,
    Oversold,
    Neutral,
}

impl Momentum {
    pub fn as_str(&self) -> &'static str {
        match self {
            Momentum::Overbought => "Overbought",
            Momentum::Oversold => "Oversold",
            Momentum::Neutral => "Neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Volatility {
    High,
    Medium,
    Low,
}

impl Volatility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Volatility::High => "High",
            Volatility::Medium => "Medium",
            Volatility::Low => "Low",
        }
    }
}

/// Output of the technical extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalVerdict {
    pub trend: Trend,
    /// In rule evaluation order
    pub signals: Vec<Signal>,
    /// Weighted, not a plain count of bullish entries in `signals`
    pub bullish_signals: u32,
    pub bearish_signals: u32,
    pub momentum: Momentum,
    pub volatility: Volatility,
}

impl TechnicalVerdict {
    pub fn net_signal(&self) -> i64 {
        self.bullish_signals as i64 - self.bearish_signals as i64
    }
}

/// Score awarded to one fundamental metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricScore {
    /// 1 to `max_score`
    pub score: u32,
    pub max_score: u32,
    pub status: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Valuation {
    Reasonable,
    Expensive,
}

impl Valuation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Valuation::Reasonable => "Reasonable",
            Valuation::Expensive => "Expensive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quality {
    #[serde(rename = "High Quality")]
    HighQuality,
    #[serde(rename = "Average Quality")]
    AverageQuality,
}

impl Quality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::HighQuality => "High Quality",
            Quality::AverageQuality => "Average Quality",
        }
    }
}

/// Output of the fundamental extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalVerdict {
    /// Keyed by metric name ("pe", "roe")
    pub scores: BTreeMap<String, MetricScore>,
    /// 0-100
    pub overall_score: u32,
    pub valuation: Valuation,
    pub quality: Quality,
}

/// Output of the value-investor checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueScoreVerdict {
    /// Sum of the awards that fired; not clamped
    pub score: u32,
    pub factors: Vec<String>,
    /// No rule populates this yet
    pub warnings: Vec<String>,
    pub max_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "High Risk")]
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "#16a34a",
            RiskLevel::Medium => "#ca8a04",
            RiskLevel::High => "#dc2626",
        }
    }
}

/// Output of the risk extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskVerdict {
    pub level: RiskLevel,
    pub risks: Vec<String>,
    /// Display color for `level`
    pub color: String,
}

impl RiskVerdict {
    pub fn new(level: RiskLevel, risks: Vec<String>) -> Self {
        Self {
            level,
            risks,
            color: level.color().to_string(),
        }
    }
}

/// Discrete recommendation band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "STRONG BUY")]
    StrongBuy,
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "HOLD")]
    Hold,
    #[serde(rename = "SELL")]
    Sell,
}

/// Colors a presentation layer uses for a recommendation band
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayStyle {
    pub color: String,
    pub background: String,
    pub border: String,
}

impl DisplayStyle {
    fn new(color: &str, background: &str, border: &str) -> Self {
        Self {
            color: color.to_string(),
            background: background.to_string(),
            border: border.to_string(),
        }
    }
}

impl Action {
    /// Map a composite score onto its band. Every bound is strict, so a score
    /// of exactly 70 is a BUY and exactly 45 is a SELL.
    pub fn from_score(score: f64) -> Self {
        if score > 70.0 {
            Action::StrongBuy
        } else if score > 55.0 {
            Action::Buy
        } else if score > 45.0 {
            Action::Hold
        } else {
            Action::Sell
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::StrongBuy => "STRONG BUY",
            Action::Buy => "BUY",
            Action::Hold => "HOLD",
            Action::Sell => "SELL",
        }
    }

    pub fn style(&self) -> DisplayStyle {
        match self {
            Action::StrongBuy => DisplayStyle::new("#15803d", "#dcfce7", "#86efac"),
            Action::Buy => DisplayStyle::new("#16a34a", "#f0fdf4", "#bbf7d0"),
            Action::Hold => DisplayStyle::new("#ca8a04", "#fefce8", "#fef08a"),
            Action::Sell => DisplayStyle::new("#dc2626", "#fef2f2", "#fecaca"),
        }
    }
}

/// Final recommendation with the composite score that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: Action,
    pub composite_score: f64,
    pub style: DisplayStyle,
}

impl Recommendation {
    pub fn new(action: Action, composite_score: f64) -> Self {
        Self {
            action,
            composite_score,
            style: action.style(),
        }
    }
}

/// Everything derived from one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveAnalysis {
    pub symbol: String,
    pub company_name: String,
    pub price: f64,
    pub change_percent: f64,
    /// Snapshot time, not analysis time
    pub timestamp: DateTime<Utc>,
    pub source: DataSource,
    pub technical: TechnicalVerdict,
    pub fundamental: FundamentalVerdict,
    pub value_score: ValueScoreVerdict,
    pub risk: RiskVerdict,
    pub recommendation: Recommendation,
    /// Percentage, 25-95
    pub confidence: u32,
}
