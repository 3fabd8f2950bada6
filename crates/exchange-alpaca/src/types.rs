//! Wire types for the Alpaca REST API and their conversion into core types.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use options_lab_core::types::{
    AccountSummary, DailyBar, OptionContract, OptionGreeks, OptionRight, OptionSnapshot, Order,
    OrderSide, Position, StockQuote,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AlpacaError, Result};

// =============================================================================
// Market data
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawLatestQuoteResponse {
    pub quote: RawStockQuote,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawStockQuote {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "ap", default)]
    pub ask_price: Decimal,
    #[serde(rename = "bp", default)]
    pub bid_price: Decimal,
}

impl RawStockQuote {
    pub fn into_quote(self, symbol: &str) -> StockQuote {
        StockQuote {
            symbol: symbol.to_string(),
            bid: self.bid_price,
            ask: self.ask_price,
            last: None,
            timestamp: self.timestamp,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawBarsResponse {
    pub bars: Option<Vec<RawBar>>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawBar {
    pub t: DateTime<Utc>,
    pub o: Decimal,
    pub h: Decimal,
    pub l: Decimal,
    pub c: Decimal,
    pub v: u64,
}

impl From<RawBar> for DailyBar {
    fn from(raw: RawBar) -> Self {
        Self {
            timestamp: raw.t,
            open: raw.o,
            high: raw.h,
            low: raw.l,
            close: raw.c,
            volume: raw.v,
        }
    }
}

// =============================================================================
// Options
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawContractsResponse {
    pub option_contracts: Option<Vec<RawOptionContract>>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawOptionContract {
    pub symbol: String,
    pub underlying_symbol: String,
    pub expiration_date: NaiveDate,
    #[serde(rename = "type")]
    pub right: OptionRight,
    pub strike_price: Decimal,
    pub multiplier: Option<Decimal>,
}

impl From<RawOptionContract> for OptionContract {
    fn from(raw: RawOptionContract) -> Self {
        let mut contract = OptionContract::new(
            raw.symbol,
            &raw.underlying_symbol,
            raw.expiration_date,
            raw.strike_price,
            raw.right,
        );
        if let Some(m) = raw.multiplier {
            contract.multiplier = m;
        }
        contract
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawSnapshotsResponse {
    #[serde(default)]
    pub snapshots: HashMap<String, RawOptionSnapshot>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawOptionSnapshot {
    pub latest_quote: Option<RawOptionQuote>,
    pub latest_trade: Option<RawOptionTrade>,
    pub implied_volatility: Option<f64>,
    pub greeks: Option<OptionGreeks>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawOptionQuote {
    #[serde(default)]
    pub ap: Decimal,
    #[serde(default)]
    pub bp: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawOptionTrade {
    pub p: Decimal,
}

impl RawOptionSnapshot {
    pub fn into_snapshot(self, contract: OptionContract) -> OptionSnapshot {
        let positive = |d: Decimal| (d > Decimal::ZERO).then_some(d);
        let (bid, ask) = match self.latest_quote {
            Some(q) => (positive(q.bp), positive(q.ap)),
            None => (None, None),
        };
        OptionSnapshot {
            contract,
            bid,
            ask,
            last: self.latest_trade.and_then(|t| positive(t.p)),
            implied_volatility: self.implied_volatility,
            greeks: self.greeks,
        }
    }
}

/// Split an OCC option symbol such as `SPY250620C00450000`.
///
/// Layout: root (1-6 chars), `YYMMDD`, `C`/`P`, strike × 1000 in 8 digits.
///
/// # Errors
/// Returns [`AlpacaError::InvalidSymbol`] when the layout does not match.
pub fn parse_occ_symbol(symbol: &str) -> Result<OptionContract> {
    let invalid = || AlpacaError::InvalidSymbol(format!("not an OCC option symbol: {symbol}"));
    if !symbol.is_ascii() || symbol.len() < 16 || symbol.len() > 21 {
        return Err(invalid());
    }
    let (root, tail) = symbol.split_at(symbol.len() - 15);
    let (date, rest) = tail.split_at(6);
    let (right, strike) = rest.split_at(1);

    if !root.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid());
    }
    let expiry = NaiveDate::parse_from_str(date, "%y%m%d").map_err(|_| invalid())?;
    let right: OptionRight = right.parse().map_err(|_| invalid())?;
    if !strike.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let milli: i64 = strike.parse().map_err(|_| invalid())?;
    let strike = Decimal::new(milli, 3).normalize();

    Ok(OptionContract::new(symbol, root, expiry, strike, right))
}

// =============================================================================
// Trading
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawAccount {
    pub id: String,
    pub status: String,
    pub buying_power: Decimal,
    pub cash: Decimal,
    pub equity: Decimal,
    pub options_trading_level: Option<u8>,
}

impl From<RawAccount> for AccountSummary {
    fn from(raw: RawAccount) -> Self {
        Self {
            account_id: raw.id,
            status: raw.status,
            buying_power: raw.buying_power,
            cash: raw.cash,
            equity: raw.equity,
            options_trading_level: raw.options_trading_level,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawPosition {
    pub symbol: String,
    pub qty: Decimal,
    pub avg_entry_price: Decimal,
    pub current_price: Option<Decimal>,
    pub unrealized_pl: Option<Decimal>,
    pub unrealized_plpc: Option<Decimal>,
}

impl From<RawPosition> for Position {
    fn from(raw: RawPosition) -> Self {
        Self {
            symbol: raw.symbol,
            qty: raw.qty,
            avg_entry_price: raw.avg_entry_price,
            current_price: raw.current_price.unwrap_or(raw.avg_entry_price),
            unrealized_pl: raw.unrealized_pl.unwrap_or_default(),
            unrealized_plpc: raw.unrealized_plpc.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawOrder {
    pub id: String,
    pub symbol: String,
    pub qty: Option<Decimal>,
    pub side: OrderSide,
    pub status: String,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl From<RawOrder> for Order {
    fn from(raw: RawOrder) -> Self {
        Self {
            id: raw.id,
            symbol: raw.symbol,
            qty: raw.qty.unwrap_or_default(),
            side: raw.side,
            status: raw.status,
            submitted_at: raw.submitted_at,
        }
    }
}

/// Body of `POST /v2/orders` for a market order.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct MarketOrderRequest<'a> {
    pub symbol: &'a str,
    pub qty: String,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: &'static str,
    pub time_in_force: &'static str,
}

impl<'a> MarketOrderRequest<'a> {
    pub fn day(symbol: &'a str, qty: Decimal, side: OrderSide) -> Self {
        Self {
            symbol,
            qty: qty.normalize().to_string(),
            side,
            order_type: "market",
            time_in_force: "day",
        }
    }
}
