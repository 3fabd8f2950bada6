//! Error types for the Alpaca client.

use thiserror::Error;

/// Errors that can occur when talking to Alpaca.
#[derive(Debug, Error)]
pub enum AlpacaError {
    /// Keys rejected (HTTP 401).
    #[error("authentication error: {0}")]
    Authentication(String),

    /// Any other non-success response.
    #[error("API error: {status_code} - {message}")]
    Api { status_code: u16, message: String },

    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimit { retry_after_secs: u64 },

    #[error("network error: {0}")]
    Network(String),

    #[error("request timeout: {0}")]
    Timeout(String),

    /// Missing credentials or a bad endpoint setting.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    /// Symbol rejected before it reached a URL.
    #[error("invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("invalid order: {0}")]
    InvalidOrder(String),

    /// The provider answered but had nothing for the request.
    #[error("no data: {0}")]
    NoData(String),

    /// Order entry attempted while pointed at the live endpoint.
    #[error("refusing to submit orders against the live trading endpoint")]
    LiveTradingRefused,
}

impl AlpacaError {
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status_code,
            message: message.into(),
        }
    }

    pub fn rate_limit(retry_after_secs: u64) -> Self {
        Self::RateLimit { retry_after_secs }
    }

    pub fn no_data(what: impl Into<String>) -> Self {
        Self::NoData(what.into())
    }

    /// Troubleshooting lines to print under the error.
    #[must_use]
    pub fn hint(&self) -> Vec<&'static str> {
        match self {
            Self::Authentication(_) | Self::Configuration(_) => vec![
                "Your API keys are set correctly (APCA_API_KEY_ID, APCA_API_SECRET_KEY)",
                "Paper keys are used with the paper endpoint (alpaca.paper = true)",
            ],
            Self::Api { status_code: 403, .. } => vec![
                "Your Alpaca account has options trading enabled",
                "Your account has enough buying power for the order",
            ],
            Self::Api { status_code: 404 | 422, .. } | Self::InvalidSymbol(_) => vec![
                "The symbol is valid and has listed options",
            ],
            Self::Api { .. } => vec!["The Alpaca API may be degraded; check status.alpaca.markets"],
            Self::RateLimit { .. } => vec!["Wait a minute before running the next lesson"],
            Self::Network(_) | Self::Timeout(_) => vec![
                "You are connected to the internet",
                "alpaca.trading_url and alpaca.data_url point at reachable hosts",
            ],
            Self::NoData(_) => vec![
                "Your Alpaca account has options trading enabled",
                "The market may be closed; quotes can be empty outside market hours",
            ],
            Self::InvalidOrder(_) => vec!["Order quantity must be a positive number of contracts"],
            Self::Serialization(_) => vec!["The API response format may have changed"],
            Self::LiveTradingRefused => vec![
                "Set alpaca.paper = true (or OPTIONS_LAB_ALPACA__PAPER=true) to practice",
            ],
        }
    }
}

impl From<reqwest::Error> for AlpacaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Network(format!("connection failed: {err}"))
        } else if err.is_decode() {
            Self::Serialization(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AlpacaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AlpacaError>;
