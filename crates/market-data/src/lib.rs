pub mod alpha_vantage;
pub mod cache;
pub mod config;
pub mod market_status;
mod rate_limit;
pub mod service;
pub mod synthetic;

pub use alpha_vantage::{AlphaVantageClient, GlobalQuote};
pub use cache::SnapshotCache;
pub use config::{FallbackPolicy, MarketDataConfig};
pub use market_status::{market_status, market_status_at, MarketSession, MarketStatus};
pub use service::StockDataService;
