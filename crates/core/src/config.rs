use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::risk::RiskRules;
use crate::scanner::ScannerConfig;

pub const PAPER_TRADING_URL: &str = "https://paper-api.alpaca.markets";
pub const LIVE_TRADING_URL: &str = "https://api.alpaca.markets";
pub const MARKET_DATA_URL: &str = "https://data.alpaca.markets";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid configuration value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub alpaca: AlpacaConfig,
    pub lessons: LessonConfig,
    pub scanner: ScannerConfig,
    pub risk: RiskRules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlpacaConfig {
    /// Route trading calls to the paper environment.
    pub paper: bool,
    /// Overrides the paper/live trading endpoint.
    pub trading_url: Option<String>,
    pub data_url: String,
    /// Options data feed ("indicative" or "opra").
    pub options_feed: String,
    pub requests_per_minute: u32,
    pub timeout_secs: u64,
}

impl Default for AlpacaConfig {
    fn default() -> Self {
        Self {
            paper: true,
            trading_url: None,
            data_url: MARKET_DATA_URL.to_string(),
            options_feed: "indicative".to_string(),
            requests_per_minute: 200,
            timeout_secs: 30,
        }
    }
}

impl AlpacaConfig {
    /// Trading endpoint, honoring the override.
    #[must_use]
    pub fn trading_base_url(&self) -> &str {
        match &self.trading_url {
            Some(url) => url,
            None if self.paper => PAPER_TRADING_URL,
            None => LIVE_TRADING_URL,
        }
    }
}

/// Defaults the lessons work from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonConfig {
    /// Underlying for the basics, Greeks and paper-trade lessons.
    pub symbol: String,
    /// Underlying for the covered-call and protective-put lessons.
    pub strategy_symbol: String,
    pub days_to_expiry: i64,
    pub protective_put_days: i64,
    /// Strikes closer than this to the price get the ATM marker.
    pub atm_band: Decimal,
    /// Premium assumed by the call and put P&L tables.
    pub example_premium: Decimal,
    /// Distance within which a strike counts as ATM.
    pub moneyness_tolerance: Decimal,
    /// Expiry horizons compared in the time-decay lesson.
    pub decay_horizons: Vec<i64>,
    /// Rows shown per side in the chain table.
    pub chain_rows: usize,
}

impl Default for LessonConfig {
    fn default() -> Self {
        Self {
            symbol: "SPY".to_string(),
            strategy_symbol: "AAPL".to_string(),
            days_to_expiry: 30,
            protective_put_days: 60,
            atm_band: dec!(5),
            example_premium: dec!(3.00),
            moneyness_tolerance: dec!(2),
            decay_horizons: vec![7, 30, 60, 90],
            chain_rows: 10,
        }
    }
}

impl AppConfig {
    /// Reject values that would make the lessons or the client misbehave.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: &str| {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            })
        };

        if self.alpaca.requests_per_minute == 0 {
            return invalid("alpaca.requests_per_minute", "must be greater than zero");
        }
        if self.alpaca.timeout_secs == 0 {
            return invalid("alpaca.timeout_secs", "must be greater than zero");
        }
        if self.lessons.days_to_expiry <= 0 || self.lessons.protective_put_days <= 0 {
            return invalid("lessons.days_to_expiry", "expiry windows must be positive");
        }
        if self.lessons.example_premium <= Decimal::ZERO {
            return invalid("lessons.example_premium", "must be positive");
        }
        if self.lessons.atm_band < Decimal::ZERO || self.lessons.moneyness_tolerance < Decimal::ZERO {
            return invalid("lessons.atm_band", "bands cannot be negative");
        }
        if self.scanner.top_n == 0 {
            return invalid("scanner.top_n", "must be greater than zero");
        }
        if !(0.0..=100.0).contains(&self.scanner.iv_threshold) {
            return invalid("scanner.iv_threshold", "must be between 0 and 100");
        }
        if self.scanner.high_iv_min_price > self.scanner.high_iv_max_price
            || self.scanner.low_iv_min_price > self.scanner.low_iv_max_price
        {
            return invalid("scanner.price_band", "min price exceeds max price");
        }
        if self.risk.stop_loss_pct <= Decimal::ZERO || self.risk.stop_loss_pct > Decimal::ONE_HUNDRED {
            return invalid("risk.stop_loss_pct", "must be in (0, 100]");
        }
        if self.risk.take_half_pct > self.risk.take_all_pct {
            return invalid("risk.take_half_pct", "first target exceeds second target");
        }
        Ok(())
    }
}
