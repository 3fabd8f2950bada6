//! Deterministic market and broker for lesson tests.
//!
//! Every underlying lists nine strikes at $5 steps, centred on the $5
//! multiple at or below its price, for both rights, at a fixed set of expirations. Quotes are intrinsic value
//! plus a time value that grows with days to expiry.

use std::cmp::Ordering;
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use options_lab_alpaca::AlpacaError;
use options_lab_core::chain::ChainFilter;
use options_lab_core::pricing::intrinsic_value;
use options_lab_core::{
    AccountSummary, Broker, DailyBar, MarketData, OptionContract, OptionGreeks, OptionRight,
    OptionSnapshot, Order, OrderSide, Position, StockQuote,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Days from [`today`] to each listed expiration.
pub const EXPIRY_OFFSETS: [i64; 8] = [4, 11, 18, 25, 32, 60, 88, 95];

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

fn price_of(symbol: &str) -> Option<Decimal> {
    match symbol {
        "SPY" => Some(dec!(450)),
        "AAPL" => Some(dec!(200)),
        "QQQ" => Some(dec!(380)),
        "IWM" => Some(dec!(207.5)),
        _ => None,
    }
}

/// Per-share time value for an expiry `days` out: $1 plus 5 cents a day.
pub fn time_value(days: i64) -> Decimal {
    Decimal::ONE + Decimal::from(days) / dec!(20)
}

fn occ_symbol(underlying: &str, expiry: NaiveDate, right: OptionRight, strike: Decimal) -> String {
    let millis = (strike * dec!(1000)).to_u64().unwrap_or(0);
    format!("{underlying}{}{right}{millis:08}", expiry.format("%y%m%d"))
}

pub struct FakeMarket {
    /// Closes returned by `daily_bars`.
    pub closes: Vec<Decimal>,
    /// Whether snapshots carry quotes.
    pub quoted: bool,
    pub submitted: Mutex<Vec<(String, Decimal, OrderSide)>>,
}

impl FakeMarket {
    /// Calm history followed by a violent month: the IV-rank proxy is 100.
    pub fn new() -> Self {
        let mut closes = zigzag(40, dec!(0.5));
        closes.extend(zigzag(30, dec!(10)));
        Self {
            closes,
            quoted: true,
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Violent history followed by a quiet month: the proxy ranks low.
    pub fn quiet() -> Self {
        let mut closes = zigzag(40, dec!(10));
        closes.extend(zigzag(30, dec!(0.5)));
        Self {
            closes,
            ..Self::new()
        }
    }

    /// Contracts listed but never quoted.
    pub fn unquoted() -> Self {
        Self {
            quoted: false,
            ..Self::new()
        }
    }

    fn listed(&self, underlying: &str, filter: &ChainFilter) -> Vec<OptionContract> {
        let Some(price) = price_of(underlying) else {
            return Vec::new();
        };
        let base = (price / dec!(5)).floor() * dec!(5);
        let mut out = Vec::new();
        for offset in EXPIRY_OFFSETS {
            let expiry = today() + Duration::days(offset);
            for right in [OptionRight::Call, OptionRight::Put] {
                for step in -4i64..=4 {
                    let strike = base + Decimal::from(step * 5);
                    let symbol = occ_symbol(underlying, expiry, right, strike);
                    let contract = OptionContract::new(symbol, underlying, expiry, strike, right);
                    if filter.matches(&contract) {
                        out.push(contract);
                    }
                }
            }
        }
        out.truncate(filter.limit as usize);
        out
    }

    fn snapshot(&self, contract: OptionContract) -> OptionSnapshot {
        if !self.quoted {
            return OptionSnapshot::bare(contract);
        }
        let price = price_of(&contract.underlying).unwrap_or_default();
        let days = contract.days_to_expiry(today());
        let bid = intrinsic_value(contract.right, price, contract.strike) + time_value(days);
        let delta = match (contract.strike.cmp(&price), contract.right) {
            (Ordering::Equal, _) => 0.50,
            (Ordering::Less, OptionRight::Call) | (Ordering::Greater, OptionRight::Put) => 0.80,
            _ => 0.25,
        };
        let delta = match contract.right {
            OptionRight::Call => delta,
            OptionRight::Put => -delta,
        };
        OptionSnapshot {
            contract,
            bid: Some(bid),
            ask: Some(bid + dec!(0.10)),
            last: None,
            implied_volatility: Some(0.25),
            greeks: Some(OptionGreeks {
                delta,
                ..OptionGreeks::default()
            }),
        }
    }
}

fn zigzag(n: usize, amp: Decimal) -> Vec<Decimal> {
    (0..n)
        .map(|i| if i % 2 == 0 { dec!(100) } else { dec!(100) + amp })
        .collect()
}

#[async_trait]
impl MarketData for FakeMarket {
    async fn latest_quote(&self, symbol: &str) -> Result<StockQuote> {
        let (bid, ask) = match symbol {
            "EMPTY" => (Decimal::ZERO, Decimal::ZERO),
            s => match price_of(s) {
                Some(p) => (p - dec!(0.05), p + dec!(0.05)),
                None => bail!(AlpacaError::InvalidSymbol(s.to_string())),
            },
        };
        Ok(StockQuote {
            symbol: symbol.to_string(),
            bid,
            ask,
            last: None,
            timestamp: Utc.with_ymd_and_hms(2025, 6, 2, 15, 0, 0).unwrap(),
        })
    }

    async fn option_contracts(
        &self,
        underlying: &str,
        filter: &ChainFilter,
    ) -> Result<Vec<OptionContract>> {
        Ok(self.listed(underlying, filter))
    }

    async fn option_snapshots(
        &self,
        underlying: &str,
        filter: &ChainFilter,
    ) -> Result<Vec<OptionSnapshot>> {
        Ok(self
            .listed(underlying, filter)
            .into_iter()
            .map(|c| self.snapshot(c))
            .collect())
    }

    async fn daily_bars(
        &self,
        _symbol: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<DailyBar>> {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        Ok(self
            .closes
            .iter()
            .enumerate()
            .map(|(i, &close)| DailyBar {
                timestamp: start + Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1_000,
            })
            .collect())
    }
}

#[async_trait]
impl Broker for FakeMarket {
    async fn account(&self) -> Result<AccountSummary> {
        Ok(AccountSummary {
            account_id: "paper-1".to_string(),
            status: "ACTIVE".to_string(),
            buying_power: dec!(200000),
            cash: dec!(100000),
            equity: dec!(100000),
            options_trading_level: Some(2),
        })
    }

    async fn positions(&self) -> Result<Vec<Position>> {
        Ok(vec![
            Position {
                symbol: "SPY250606C00450000".to_string(),
                qty: dec!(4),
                avg_entry_price: dec!(3.00),
                current_price: dec!(4.80),
                unrealized_pl: dec!(720),
                unrealized_plpc: dec!(0.60),
            },
            Position {
                symbol: "AAPL".to_string(),
                qty: dec!(10),
                avg_entry_price: dec!(150),
                current_price: dec!(60),
                unrealized_pl: dec!(-900),
                unrealized_plpc: dec!(-0.60),
            },
        ])
    }

    async fn open_orders(&self) -> Result<Vec<Order>> {
        Ok(vec![Order {
            id: "order-1".to_string(),
            symbol: "SPY250613P00440000".to_string(),
            qty: dec!(1),
            side: OrderSide::Buy,
            status: "new".to_string(),
            submitted_at: None,
        }])
    }

    async fn submit_market_order(
        &self,
        symbol: &str,
        qty: Decimal,
        side: OrderSide,
    ) -> Result<Order> {
        self.submitted
            .lock()
            .unwrap()
            .push((symbol.to_string(), qty, side));
        Ok(Order {
            id: "order-2".to_string(),
            symbol: symbol.to_string(),
            qty,
            side,
            status: "accepted".to_string(),
            submitted_at: None,
        })
    }
}
