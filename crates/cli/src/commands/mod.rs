//! The three interactive programs behind the subcommands.
//!
//! Each lesson builds and returns its text so it can be checked without a
//! terminal; the `run` functions own menus, prompts and printing.

pub mod learn;
pub mod scan;
pub mod strategies;

#[cfg(test)]
pub(crate) mod fixtures;

pub use learn::LearnArgs;
pub use scan::ScanArgs;
pub use strategies::StrategiesArgs;

use anyhow::Result;
use chrono::NaiveDate;
use options_lab_alpaca::AlpacaError;
use options_lab_core::chain::{ChainFilter, OptionsChain};
use options_lab_core::{AppConfig, MarketData};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Checklist printed when the failure is not an Alpaca error.
const DEFAULT_CHECKLIST: [&str; 3] = [
    "Your Alpaca account has options trading enabled",
    "Your API keys are set correctly",
    "You're using paper trading for learning",
];

/// Everything a lesson reads from: data source, settings, today's date.
#[derive(Clone, Copy)]
pub struct LessonContext<'a> {
    pub data: &'a dyn MarketData,
    pub config: &'a AppConfig,
    pub today: NaiveDate,
}

impl<'a> LessonContext<'a> {
    pub fn new(data: &'a dyn MarketData, config: &'a AppConfig, today: NaiveDate) -> Self {
        Self {
            data,
            config,
            today,
        }
    }

    /// Mid price of the underlying.
    pub async fn current_price(&self, symbol: &str) -> Result<Decimal> {
        let quote = self.data.latest_quote(symbol).await?;
        quote.mid().ok_or_else(|| {
            anyhow::Error::from(AlpacaError::no_data(format!("no usable quote for {symbol}")))
        })
    }

    /// Snapshots matching `filter`, grouped around `price`.
    pub async fn snapshot_chain(
        &self,
        symbol: &str,
        price: Decimal,
        filter: &ChainFilter,
    ) -> Result<OptionsChain> {
        let options = self.data.option_snapshots(symbol, filter).await?;
        tracing::debug!(symbol, count = options.len(), "Fetched option snapshots");
        Ok(OptionsChain::new(symbol, price, options))
    }

    /// Contract listings matching `filter`, grouped around `price`.
    pub async fn contract_chain(
        &self,
        symbol: &str,
        price: Decimal,
        filter: &ChainFilter,
    ) -> Result<OptionsChain> {
        let contracts = self.data.option_contracts(symbol, filter).await?;
        tracing::debug!(symbol, count = contracts.len(), "Fetched option contracts");
        Ok(OptionsChain::from_contracts(symbol, price, contracts))
    }
}

/// Dollar half-width of the strike window used for ITM/ATM/OTM examples:
/// 5% of the price, at least $15.
#[must_use]
pub fn example_window(price: Decimal) -> Decimal {
    (price * dec!(0.05)).max(dec!(15))
}

/// "Error occurred" block with troubleshooting lines.
#[must_use]
pub fn failure_report(err: &anyhow::Error) -> String {
    let hints = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<AlpacaError>())
        .map(AlpacaError::hint)
        .unwrap_or_else(|| DEFAULT_CHECKLIST.to_vec());

    let mut out = format!("\nError occurred: {err}\n\nMake sure:\n");
    for (i, hint) in hints.iter().enumerate() {
        out.push_str(&format!("{}. {hint}\n", i + 1));
    }
    out
}

pub fn print_failure(err: &anyhow::Error) {
    tracing::debug!(error = ?err, "Command failed");
    eprint!("{}", failure_report(err));
}

#[cfg(test)]
mod tests {
    use super::fixtures::{self, FakeMarket};
    use super::*;

    #[tokio::test]
    async fn current_price_is_the_quote_mid() {
        let market = FakeMarket::new();
        let config = AppConfig::default();
        let ctx = LessonContext::new(&market, &config, fixtures::today());
        assert_eq!(ctx.current_price("SPY").await.unwrap(), dec!(450));
    }

    #[tokio::test]
    async fn empty_quote_is_no_data() {
        let market = FakeMarket::new();
        let config = AppConfig::default();
        let ctx = LessonContext::new(&market, &config, fixtures::today());

        let err = ctx.current_price("EMPTY").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AlpacaError>(),
            Some(AlpacaError::NoData(_))
        ));
    }

    #[test]
    fn window_has_a_floor() {
        assert_eq!(example_window(dec!(450)), dec!(22.50));
        assert_eq!(example_window(dec!(100)), dec!(15));
    }

    #[test]
    fn failure_report_uses_alpaca_hints() {
        let err = anyhow::Error::from(AlpacaError::api(403, "forbidden"));
        let text = failure_report(&err);
        assert!(text.contains("Error occurred: API error: 403 - forbidden"));
        assert!(text.contains("1. Your Alpaca account has options trading enabled"));
        assert!(text.contains("2. Your account has enough buying power"));
    }

    #[test]
    fn failure_report_finds_wrapped_alpaca_errors() {
        let err = anyhow::Error::from(AlpacaError::LiveTradingRefused).context("placing order");
        let text = failure_report(&err);
        assert!(text.contains("Error occurred: placing order"));
        assert!(text.contains("alpaca.paper = true"));
    }

    #[test]
    fn failure_report_falls_back_to_checklist() {
        let err = anyhow::anyhow!("something else");
        let text = failure_report(&err);
        assert!(text.contains("1. Your Alpaca account has options trading enabled"));
        assert!(text.contains("3. You're using paper trading for learning"));
    }
}
