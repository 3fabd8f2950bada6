use crate::chain::ChainFilter;
use crate::types::{
    AccountSummary, DailyBar, OptionContract, OptionSnapshot, Order, OrderSide, Position,
    StockQuote,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Read-only market data: quotes, chains, snapshots and daily bars.
#[async_trait]
pub trait MarketData: Send + Sync {
    async fn latest_quote(&self, symbol: &str) -> Result<StockQuote>;

    /// Contract listings (no prices) matching `filter`.
    async fn option_contracts(
        &self,
        underlying: &str,
        filter: &ChainFilter,
    ) -> Result<Vec<OptionContract>>;

    /// Contracts with quotes, IV and greeks where the provider has them.
    async fn option_snapshots(
        &self,
        underlying: &str,
        filter: &ChainFilter,
    ) -> Result<Vec<OptionSnapshot>>;

    async fn daily_bars(&self, symbol: &str, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<DailyBar>>;
}

/// Account access and order entry.
#[async_trait]
pub trait Broker: Send + Sync {
    async fn account(&self) -> Result<AccountSummary>;
    async fn positions(&self) -> Result<Vec<Position>>;
    async fn open_orders(&self) -> Result<Vec<Order>>;
    async fn submit_market_order(&self, symbol: &str, qty: Decimal, side: OrderSide)
        -> Result<Order>;
}
