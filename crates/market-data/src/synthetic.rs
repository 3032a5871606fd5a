//! Demo data for when no live provider is configured or the live call fails.
//!
//! Values follow loose but plausible distributions around a per-symbol base
//! price. The random source is passed in so callers can seed it.

use analysis_core::{DataSource, MarketSnapshot, SnapshotExtras};
use chrono::{DateTime, Utc};
use rand::Rng;

use crate::alpha_vantage::GlobalQuote;

const BASE_PRICES: &[(&str, f64)] = &[
    ("AAPL", 185.25),
    ("MSFT", 340.15),
    ("GOOGL", 135.80),
    ("AMZN", 145.30),
    ("TSLA", 245.75),
    ("NVDA", 450.20),
    ("META", 325.45),
    ("NFLX", 420.10),
    ("AMD", 125.60),
    ("INTC", 45.20),
    ("CRM", 220.30),
    ("ORCL", 115.80),
    ("BABA", 90.40),
    ("UBER", 65.20),
    ("SPOT", 180.90),
];

const COMPANY_NAMES: &[(&str, &str)] = &[
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corporation"),
    ("GOOGL", "Alphabet Inc."),
    ("AMZN", "Amazon.com Inc."),
    ("TSLA", "Tesla Inc."),
    ("NVDA", "NVIDIA Corporation"),
    ("META", "Meta Platforms Inc."),
    ("NFLX", "Netflix Inc."),
    ("AMD", "Advanced Micro Devices Inc."),
    ("INTC", "Intel Corporation"),
    ("CRM", "Salesforce Inc."),
    ("ORCL", "Oracle Corporation"),
    ("BABA", "Alibaba Group Holding Ltd"),
    ("UBER", "Uber Technologies Inc."),
    ("SPOT", "Spotify Technology S.A."),
];

const MEGA_CAPS: &[&str] = &["AAPL", "MSFT", "GOOGL", "AMZN"];
const LARGE_CAPS: &[&str] = &["TSLA", "NVDA", "META", "NFLX"];

/// 32-bit rolling string hash (`h * 31 + c` with wraparound), made non-negative.
/// Stable across runs so unknown tickers always get the same base price.
pub fn simple_hash(s: &str) -> u64 {
    let hash = s.encode_utf16().fold(0i32, |h, c| {
        h.wrapping_shl(5).wrapping_sub(h).wrapping_add(c as i32)
    });
    (hash as i64).unsigned_abs()
}

/// Base price for a symbol: a fixed table for well-known tickers, $50-$249 otherwise
pub fn base_price(symbol: &str) -> f64 {
    BASE_PRICES
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, p)| *p)
        .unwrap_or_else(|| 50.0 + (simple_hash(symbol) % 200) as f64)
}

pub fn company_name(symbol: &str) -> String {
    COMPANY_NAMES
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| format!("{} Corporation", symbol))
}

/// Market-cap display string sized by cap tier
pub fn market_cap<R: Rng + ?Sized>(symbol: &str, rng: &mut R) -> String {
    if MEGA_CAPS.contains(&symbol) {
        format!("{:.2}T", rng.gen::<f64>() * 2.0 + 1.0)
    } else if LARGE_CAPS.contains(&symbol) {
        format!("{:.0}B", rng.gen::<f64>() * 800.0 + 200.0)
    } else {
        format!("{:.0}B", rng.gen::<f64>() * 100.0 + 20.0)
    }
}

/// RSI between 30 and 69 derived from the price's text form
pub fn rsi_from_price(price: f64) -> f64 {
    30.0 + (simple_hash(&price.to_string()) % 40) as f64
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `lo + rand * span`, rounded to `decimals`
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, span: f64, decimals: i32) -> f64 {
    round_to(lo + rng.gen::<f64>() * span, decimals)
}

/// A complete snapshot built from scratch for `symbol`
pub fn generate_snapshot<R: Rng + ?Sized>(symbol: &str, now: DateTime<Utc>, rng: &mut R) -> MarketSnapshot {
    let base = base_price(symbol);
    // 2% daily volatility
    let daily_volatility = base * 0.02;
    let change = (rng.gen::<f64>() - 0.5) * daily_volatility * 2.0;
    let change_percent = change / base * 100.0;

    MarketSnapshot {
        symbol: symbol.to_string(),
        company_name: company_name(symbol),
        timestamp: now,
        price: round_to(base + change, 2),
        change: round_to(change, 2),
        change_percent: round_to(change_percent, 2),
        volume: rng.gen_range(1_000_000..51_000_000),
        market_cap: market_cap(symbol, rng),

        pe: uniform(rng, 5.0, 35.0, 1),
        eps: uniform(rng, 1.0, 15.0, 2),
        dividend_yield: uniform(rng, 0.0, 6.0, 2),
        book_value: uniform(rng, 10.0, 50.0, 2),
        roe: uniform(rng, 5.0, 25.0, 1),
        roa: uniform(rng, 2.0, 15.0, 1),
        debt_to_equity: uniform(rng, 0.1, 1.5, 2),

        rsi: uniform(rng, 0.0, 100.0, 1),
        macd: uniform(rng, -1.5, 3.0, 3),
        sma20: round_to(base * (0.98 + rng.gen::<f64>() * 0.04), 2),
        sma50: round_to(base * (0.95 + rng.gen::<f64>() * 0.1), 2),
        sma200: round_to(base * (0.90 + rng.gen::<f64>() * 0.2), 2),
        atr: uniform(rng, 1.0, 8.0, 2),
        beta: uniform(rng, 0.4, 1.8, 2),

        source: DataSource::Synthetic,
        extras: SnapshotExtras {
            ema12: Some(round_to(base * (0.99 + rng.gen::<f64>() * 0.02), 2)),
            ema26: Some(round_to(base * (0.97 + rng.gen::<f64>() * 0.06), 2)),
            adx: Some(uniform(rng, 0.0, 100.0, 1)),
            stochastic: Some(uniform(rng, 0.0, 100.0, 1)),
            williams_r: Some(uniform(rng, 0.0, 100.0, 1)),
            cci: Some(uniform(rng, -150.0, 300.0, 1)),
            roc: Some(uniform(rng, -7.5, 15.0, 2)),
            obv: Some(rng.gen_range(0..1_000_000_000)),
            mfi: Some(uniform(rng, 0.0, 100.0, 1)),
            current_ratio: Some(uniform(rng, 0.5, 2.5, 2)),
            quick_ratio: Some(uniform(rng, 0.3, 2.0, 2)),
            price_to_book: Some(uniform(rng, 0.5, 4.0, 2)),
            price_to_sales: Some(uniform(rng, 0.5, 8.0, 2)),
            gross_margin: Some(uniform(rng, 30.0, 40.0, 1)),
            operating_margin: Some(uniform(rng, 5.0, 20.0, 1)),
            net_margin: Some(uniform(rng, 2.0, 15.0, 1)),
            fifty_two_week_high: Some(round_to(base * (1.1 + rng.gen::<f64>() * 0.3), 2)),
            fifty_two_week_low: Some(round_to(base * (0.7 + rng.gen::<f64>() * 0.2), 2)),
        },
    }
}

/// Fill in everything a GLOBAL_QUOTE response lacks, scaled to the live price
pub fn enrich_quote<R: Rng + ?Sized>(quote: GlobalQuote, now: DateTime<Utc>, rng: &mut R) -> MarketSnapshot {
    let price = quote.price;
    let symbol = quote.symbol.to_uppercase();

    MarketSnapshot {
        company_name: company_name(&symbol),
        market_cap: market_cap(&symbol, rng),
        symbol,
        timestamp: now,
        price,
        change: quote.change,
        change_percent: quote.change_percent,
        volume: quote.volume,

        pe: rng.gen::<f64>() * 35.0 + 5.0,
        eps: rng.gen::<f64>() * 15.0 + 1.0,
        dividend_yield: rng.gen::<f64>() * 6.0,
        book_value: rng.gen::<f64>() * 50.0 + 10.0,
        roe: rng.gen::<f64>() * 25.0 + 5.0,
        roa: rng.gen::<f64>() * 15.0 + 2.0,
        debt_to_equity: rng.gen::<f64>() * 1.5 + 0.1,

        rsi: rsi_from_price(price),
        macd: (rng.gen::<f64>() - 0.5) * 3.0,
        sma20: price * (0.98 + rng.gen::<f64>() * 0.04),
        sma50: price * (0.95 + rng.gen::<f64>() * 0.1),
        sma200: price * (0.90 + rng.gen::<f64>() * 0.2),
        atr: price * 0.02 + rng.gen::<f64>() * (price * 0.03),
        beta: rng.gen::<f64>() * 1.8 + 0.4,

        source: DataSource::AlphaVantage,
        extras: SnapshotExtras {
            ema12: Some(price * (0.99 + rng.gen::<f64>() * 0.02)),
            ema26: Some(price * (0.97 + rng.gen::<f64>() * 0.06)),
            ..Default::default()
        },
    }
}
