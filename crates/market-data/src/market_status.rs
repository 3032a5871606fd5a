//! US equity session clock (NYSE/NASDAQ hours, US/Eastern).

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::US::Eastern;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketSession {
    Open,
    PreMarket,
    AfterHours,
    Closed,
}

impl MarketSession {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketSession::Open => "OPEN",
            MarketSession::PreMarket => "PRE_MARKET",
            MarketSession::AfterHours => "AFTER_HOURS",
            MarketSession::Closed => "CLOSED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketStatus {
    pub session: MarketSession,
    pub reason: String,
}

impl MarketStatus {
    fn new(session: MarketSession, reason: &str) -> Self {
        Self {
            session,
            reason: reason.to_string(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.session == MarketSession::Open
    }
}

pub fn market_status() -> MarketStatus {
    market_status_at(Utc::now())
}

/// Session for an instant. Regular hours run 09:30-16:00 inclusive of the
/// closing minute; holidays are not modelled.
pub fn market_status_at<Tz: TimeZone>(now: DateTime<Tz>) -> MarketStatus {
    let et = now.with_timezone(&Eastern);

    if matches!(et.weekday(), Weekday::Sat | Weekday::Sun) {
        return MarketStatus::new(MarketSession::Closed, "Weekend");
    }

    let hhmm = et.hour() * 100 + et.minute();
    match hhmm {
        930..=1600 => MarketStatus::new(MarketSession::Open, "Regular Trading Hours"),
        400..=929 => MarketStatus::new(MarketSession::PreMarket, "Pre-Market Trading"),
        1601..=2000 => MarketStatus::new(MarketSession::AfterHours, "After-Hours Trading"),
        _ => MarketStatus::new(MarketSession::Closed, "Outside Trading Hours"),
    }
}
