use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Trim and uppercase a ticker, rejecting anything that is not a plain
/// alphanumeric symbol (dots and dashes allowed, as in "BRK.B").
pub fn normalize_symbol(raw: &str) -> Result<String, AnalysisError> {
    let symbol = raw.trim().to_uppercase();
    let valid = !symbol.is_empty()
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    if valid {
        Ok(symbol)
    } else {
        Err(AnalysisError::InvalidSymbol(raw.to_string()))
    }
}
