use analysis_core::AnalysisError;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

/// What to do when the live provider fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Substitute a synthetic snapshot; the caller never sees the failure
    #[default]
    Synthetic,
    /// Propagate the provider error
    Fail,
}

impl std::str::FromStr for FallbackPolicy {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "synthetic" | "demo" => Ok(FallbackPolicy::Synthetic),
            "fail" | "error" => Ok(FallbackPolicy::Fail),
            other => Err(AnalysisError::Config(format!("unknown fallback policy {other:?}"))),
        }
    }
}

/// Settings for the snapshot provider, passed in at construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketDataConfig {
    pub alpha_vantage_api_key: Option<String>,
    pub base_url: String,
    pub cache_ttl: Duration,
    pub fallback: FallbackPolicy,
    /// Alpha Vantage free tier allows 5 calls per minute
    pub rate_limit_per_minute: usize,
    pub request_timeout: Duration,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            alpha_vantage_api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl: Duration::from_secs(60),
            fallback: FallbackPolicy::Synthetic,
            rate_limit_per_minute: 5,
            request_timeout: Duration::from_secs(15),
        }
    }
}

impl MarketDataConfig {
    /// Build from environment variables, falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self, AnalysisError> {
        let defaults = Self::default();

        let config = Self {
            alpha_vantage_api_key: env::var("ALPHA_VANTAGE_API_KEY").ok(),
            base_url: env::var("ALPHA_VANTAGE_BASE_URL").unwrap_or(defaults.base_url),
            cache_ttl: env::var("SNAPSHOT_CACHE_TTL_SECS")
                .ok()
                .map(|v| parse_number::<u64>("SNAPSHOT_CACHE_TTL_SECS", &v))
                .transpose()?
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            fallback: env::var("SNAPSHOT_FALLBACK")
                .ok()
                .map(|v| v.parse())
                .transpose()?
                .unwrap_or(defaults.fallback),
            rate_limit_per_minute: env::var("ALPHA_VANTAGE_RATE_LIMIT")
                .ok()
                .map(|v| parse_number("ALPHA_VANTAGE_RATE_LIMIT", &v))
                .transpose()?
                .unwrap_or(defaults.rate_limit_per_minute),
            request_timeout: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .map(|v| parse_number::<u64>("HTTP_TIMEOUT_SECS", &v))
                .transpose()?
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.cache_ttl.is_zero() {
            return Err(AnalysisError::Config("cache TTL must be non-zero".to_string()));
        }
        if self.rate_limit_per_minute == 0 {
            return Err(AnalysisError::Config("rate limit must be at least 1 request per minute".to_string()));
        }
        Ok(())
    }

    /// The usable API key, if any. "demo" and blank keys count as absent.
    pub fn live_api_key(&self) -> Option<&str> {
        self.alpha_vantage_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != "demo")
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, AnalysisError> {
    value
        .trim()
        .parse()
        .map_err(|_| AnalysisError::Config(format!("{name} must be a number, got {value:?}")))
}
