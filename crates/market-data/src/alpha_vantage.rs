use analysis_core::AnalysisError;
use reqwest::{Client, Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::MarketDataConfig;
use crate::rate_limit::RateLimiter;

/// Requests per call, counting the single retry after a 429
const MAX_ATTEMPTS: u32 = 2;
const RETRY_AFTER_429: Duration = Duration::from_secs(12);

/// Live quote fields from the GLOBAL_QUOTE endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalQuote {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
}

/// Wire shape: every value arrives as a string
#[derive(Debug, Deserialize)]
struct RawGlobalQuote {
    #[serde(rename = "01. symbol")]
    symbol: String,
    #[serde(rename = "05. price")]
    price: String,
    #[serde(rename = "06. volume")]
    volume: String,
    #[serde(rename = "09. change")]
    change: String,
    #[serde(rename = "10. change percent")]
    change_percent: String,
}

#[derive(Clone)]
pub struct AlphaVantageClient {
    api_key: String,
    base_url: String,
    client: Client,
    rate_limiter: RateLimiter,
    retry_delay: Duration,
}

impl AlphaVantageClient {
    pub fn new(api_key: String, config: &MarketDataConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            api_key,
            base_url: config.base_url.clone(),
            client,
            rate_limiter: RateLimiter::per_minute(config.rate_limit_per_minute),
            retry_delay: RETRY_AFTER_429,
        }
    }

    /// Execute within the rate budget. A 429 is retried once after
    /// `retry_delay`; a second 429 is returned as `RateLimited` straight away.
    async fn send_request(&self, request: Request) -> Result<Response, AnalysisError> {
        for attempt in 1..=MAX_ATTEMPTS {
            let request = request
                .try_clone()
                .ok_or_else(|| AnalysisError::ApiError("request body is not cloneable".to_string()))?;

            self.rate_limiter.acquire().await;
            let response = self
                .client
                .execute(request)
                .await
                .map_err(|e| AnalysisError::ApiError(e.to_string()))?;

            if response.status() != StatusCode::TOO_MANY_REQUESTS {
                return Ok(response);
            }
            if attempt < MAX_ATTEMPTS {
                tracing::warn!(
                    "Alpha Vantage returned 429, retrying in {}s",
                    self.retry_delay.as_secs_f64()
                );
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        Err(AnalysisError::RateLimited("Alpha Vantage returned 429 after retry".to_string()))
    }

    /// Fetch the latest quote for a symbol
    pub async fn get_quote(&self, symbol: &str) -> Result<GlobalQuote, AnalysisError> {
        let request = self
            .client
            .get(&self.base_url)
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", symbol),
                ("apikey", self.api_key.as_str()),
            ])
            .build()
            .map_err(|e| AnalysisError::ApiError(e.to_string()))?;

        let response = self.send_request(request).await?;
        if !response.status().is_success() {
            return Err(AnalysisError::ApiError(format!("HTTP error! status: {}", response.status())));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AnalysisError::InvalidData(e.to_string()))?;

        parse_global_quote(&json)
    }
}

/// Interpret a GLOBAL_QUOTE response body
pub fn parse_global_quote(json: &serde_json::Value) -> Result<GlobalQuote, AnalysisError> {
    if let Some(error) = json.get("Error Message") {
        return Err(AnalysisError::ApiError(format!("Alpha Vantage error: {}", error)));
    }
    if let Some(note) = json.get("Note").or_else(|| json.get("Information")) {
        return Err(AnalysisError::RateLimited(format!("Alpha Vantage limit: {}", note)));
    }

    let quote = json
        .get("Global Quote")
        .filter(|q| q.as_object().is_some_and(|o| !o.is_empty()))
        .ok_or_else(|| AnalysisError::InvalidData("Invalid response from Alpha Vantage".to_string()))?;

    let raw: RawGlobalQuote = serde_json::from_value(quote.clone())
        .map_err(|e| AnalysisError::InvalidData(format!("Malformed Global Quote: {}", e)))?;

    Ok(GlobalQuote {
        symbol: raw.symbol,
        price: parse_field("05. price", &raw.price)?,
        change: parse_field("09. change", &raw.change)?,
        change_percent: parse_field("10. change percent", raw.change_percent.trim_end_matches('%'))?,
        volume: parse_field("06. volume", &raw.volume)?,
    })
}

fn parse_field<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, AnalysisError> {
    value
        .trim()
        .parse()
        .map_err(|_| AnalysisError::InvalidData(format!("Unparseable {name}: {value:?}")))
}
