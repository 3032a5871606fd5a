use analysis_core::{
    MarketSnapshot, Momentum, Signal, SignalStrength, SignalType, TechnicalVerdict, Trend,
    Volatility,
};

const RSI_OVERBOUGHT: f64 = 70.0;
const RSI_OVERSOLD: f64 = 30.0;

/// ATR bands in absolute price units. Not normalized by price, so a $500 stock
/// and a $5 stock share the same cutoffs.
const ATR_HIGH: f64 = 5.0;
const ATR_LOW: f64 = 2.0;

pub struct TechnicalAnalysisEngine;

/// Running tally of emitted signals and their weights
#[derive(Default)]
struct SignalTally {
    signals: Vec<Signal>,
    bullish: u32,
    bearish: u32,
}

impl SignalTally {
    fn push(&mut self, signal: Signal, weight: u32) {
        if signal.is_bullish() {
            self.bullish += weight;
        } else {
            self.bearish += weight;
        }
        self.signals.push(signal);
    }
}

impl TechnicalAnalysisEngine {
    pub fn new() -> Self {
        Self
    }

    /// Derive trend, momentum and volatility from the snapshot's indicators.
    ///
    /// Always yields two or three signals: the moving-average and MACD rules
    /// fire unconditionally, RSI only outside its 30-70 band.
    pub fn analyze(&self, snapshot: &MarketSnapshot) -> TechnicalVerdict {
        let mut tally = SignalTally::default();

        // Long-term trend
        if snapshot.price > snapshot.sma200 {
            tally.push(
                Signal::new(
                    SignalType::Bullish,
                    "Moving Average",
                    "Price above 200-day SMA (long-term uptrend)",
                    SignalStrength::Strong,
                ),
                2,
            );
        } else {
            tally.push(
                Signal::new(
                    SignalType::Bearish,
                    "Moving Average",
                    "Price below 200-day SMA (long-term downtrend)",
                    SignalStrength::Strong,
                ),
                2,
            );
        }

        // RSI: oversold counts double, overbought single
        if snapshot.rsi > RSI_OVERBOUGHT {
            tally.push(
                Signal::new(
                    SignalType::Bearish,
                    "RSI",
                    "Overbought conditions (RSI > 70)",
                    SignalStrength::Moderate,
                ),
                1,
            );
        } else if snapshot.rsi < RSI_OVERSOLD {
            tally.push(
                Signal::new(
                    SignalType::Bullish,
                    "RSI",
                    "Oversold conditions (RSI < 30)",
                    SignalStrength::Strong,
                ),
                2,
            );
        }

        // MACD is compared against zero; the snapshot carries no signal-line value
        if snapshot.macd > 0.0 {
            tally.push(
                Signal::new(
                    SignalType::Bullish,
                    "MACD",
                    "MACD above signal line",
                    SignalStrength::Moderate,
                ),
                1,
            );
        } else {
            tally.push(
                Signal::new(
                    SignalType::Bearish,
                    "MACD",
                    "MACD below signal line",
                    SignalStrength::Moderate,
                ),
                1,
            );
        }

        let net = tally.bullish as i64 - tally.bearish as i64;

        TechnicalVerdict {
            trend: Trend::from_net_signal(net),
            signals: tally.signals,
            bullish_signals: tally.bullish,
            bearish_signals: tally.bearish,
            momentum: Self::momentum(snapshot.rsi),
            volatility: Self::volatility(snapshot.atr),
        }
    }

    fn momentum(rsi: f64) -> Momentum {
        if rsi > RSI_OVERBOUGHT {
            Momentum::Overbought
        } else if rsi < RSI_OVERSOLD {
            Momentum::Oversold
        } else {
            Momentum::Neutral
        }
    }

    fn volatility(atr: f64) -> Volatility {
        if atr > ATR_HIGH {
            Volatility::High
        } else if atr < ATR_LOW {
            Volatility::Low
        } else {
            Volatility::Medium
        }
    }
}

impl Default for TechnicalAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}
