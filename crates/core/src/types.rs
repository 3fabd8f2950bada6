//! Market records consumed from the data provider.
//!
//! Everything here is read once, printed, and dropped. Greeks and implied
//! volatility are whatever the provider reports; nothing is computed locally.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Options contract right (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionRight {
    Call,
    Put,
}

impl OptionRight {
    /// Lowercase name as used by the provider's query strings.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Put => "put",
        }
    }
}

impl std::fmt::Display for OptionRight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "C"),
            Self::Put => write!(f, "P"),
        }
    }
}

impl FromStr for OptionRight {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(Self::Call),
            "put" | "p" => Ok(Self::Put),
            other => Err(format!("unknown option right: {other}")),
        }
    }
}

/// An options contract specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// OCC contract symbol (e.g., "SPY250620C00450000").
    pub symbol: String,
    pub underlying: String,
    pub expiry: NaiveDate,
    pub strike: Decimal,
    pub right: OptionRight,
    /// Contract multiplier (100 for standard US equity options).
    pub multiplier: Decimal,
}

impl OptionContract {
    /// Create a standard US equity options contract.
    pub fn new(
        symbol: impl Into<String>,
        underlying: &str,
        expiry: NaiveDate,
        strike: Decimal,
        right: OptionRight,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            underlying: underlying.to_uppercase(),
            expiry,
            strike,
            right,
            multiplier: Decimal::from(100),
        }
    }

    /// Human-readable contract description (e.g., "SPY 450C 2025-06-20").
    #[must_use]
    pub fn display_name(&self) -> String {
        format!(
            "{} {}{} {}",
            self.underlying,
            self.strike.normalize(),
            self.right,
            self.expiry
        )
    }

    /// Calendar days from `today` until expiration (negative once expired).
    #[must_use]
    pub fn days_to_expiry(&self, today: NaiveDate) -> i64 {
        (self.expiry - today).num_days()
    }
}

/// Option greeks snapshot as reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionGreeks {
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

/// Mid of a two-sided quote, tolerating an empty side.
///
/// Falls back to whichever side is non-zero, then to `last`.
fn mid_or_fallback(bid: Decimal, ask: Decimal, last: Option<Decimal>) -> Option<Decimal> {
    match (bid > Decimal::ZERO, ask > Decimal::ZERO) {
        (true, true) => Some((bid + ask) / Decimal::TWO),
        (true, false) => Some(bid),
        (false, true) => Some(ask),
        (false, false) => last.filter(|p| *p > Decimal::ZERO),
    }
}

/// Latest quote for an underlying stock or ETF.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockQuote {
    pub symbol: String,
    pub bid: Decimal,
    pub ask: Decimal,
    pub last: Option<Decimal>,
    pub timestamp: DateTime<Utc>,
}

impl StockQuote {
    /// The "current price" every lesson works from.
    #[must_use]
    pub fn mid(&self) -> Option<Decimal> {
        mid_or_fallback(self.bid, self.ask, self.last)
    }
}

/// Quote, implied volatility and greeks for one option contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionSnapshot {
    pub contract: OptionContract,
    pub bid: Option<Decimal>,
    pub ask: Option<Decimal>,
    pub last: Option<Decimal>,
    pub implied_volatility: Option<f64>,
    pub greeks: Option<OptionGreeks>,
}

impl OptionSnapshot {
    /// A snapshot with no market data yet, just the contract.
    #[must_use]
    pub fn bare(contract: OptionContract) -> Self {
        Self {
            contract,
            bid: None,
            ask: None,
            last: None,
            implied_volatility: None,
            greeks: None,
        }
    }

    #[must_use]
    pub fn mid(&self) -> Option<Decimal> {
        mid_or_fallback(
            self.bid.unwrap_or_default(),
            self.ask.unwrap_or_default(),
            self.last,
        )
    }

    /// Best available premium per share: mid, else last trade.
    #[must_use]
    pub fn premium(&self) -> Option<Decimal> {
        self.mid()
    }
}

/// A daily OHLCV bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBar {
    pub timestamp: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: u64,
}

/// Brokerage account summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    pub account_id: String,
    pub status: String,
    pub buying_power: Decimal,
    pub cash: Decimal,
    pub equity: Decimal,
    pub options_trading_level: Option<u8>,
}

/// An open position held at the broker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub qty: Decimal,
    pub avg_entry_price: Decimal,
    pub current_price: Decimal,
    pub unrealized_pl: Decimal,
    /// Unrealized P&L as a fraction (0.12 = +12%).
    pub unrealized_plpc: Decimal,
}

impl Position {
    /// Unrealized P&L as a percentage.
    #[must_use]
    pub fn pnl_pct(&self) -> Decimal {
        self.unrealized_plpc * Decimal::ONE_HUNDRED
    }
}

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// An order as reported by the broker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub symbol: String,
    pub qty: Decimal,
    pub side: OrderSide,
    pub status: String,
    pub submitted_at: Option<DateTime<Utc>>,
}
