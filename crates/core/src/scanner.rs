//! Watchlist scanner: price and IV-rank filters, ranking, strategy ideas.

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::chain::{closest_to, ChainFilter, ATM_SEARCH_PCT};
use crate::pricing::{moneyness_distance_pct, Moneyness};
use crate::traits::MarketData;
use crate::types::OptionRight;
use crate::volatility::iv_rank_proxy;

/// Which end of the IV-rank range a scan looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanDirection {
    /// Elevated volatility, candidates for selling premium.
    HighIv,
    /// Quiet volatility, candidates for buying options.
    LowIv,
}

impl ScanDirection {
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::HighIv => "HIGH IV SCANNER - Opportunities to SELL Premium",
            Self::LowIv => "LOW IV SCANNER - Opportunities to BUY Options",
        }
    }
}

/// Scanner settings. Loaded from the `[scanner]` config section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub watchlist: Vec<String>,
    pub high_iv_min_price: Decimal,
    pub high_iv_max_price: Decimal,
    pub low_iv_min_price: Decimal,
    pub low_iv_max_price: Decimal,
    /// High scans keep ranks at or above this, low scans at or below.
    pub iv_threshold: f64,
    /// Days ahead to look for the ATM contract.
    pub expiry_days: i64,
    pub top_n: usize,
    /// Contracts requested per symbol when locating the ATM strike.
    pub option_limit: u32,
    /// Calendar days of daily bars fetched for the IV-rank proxy.
    pub bar_lookback_days: i64,
    /// Returns in the "recent" leg of the proxy.
    pub rank_window: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        let watchlist = [
            "SPY", "QQQ", "IWM", // ETFs
            "AAPL", "MSFT", "GOOGL", "AMZN", "META", // big tech
            "TSLA", "NVDA", "AMD", "INTC", // semis
            "JPM", "BAC", "WFC", "GS", // finance
            "XOM", "CVX", "COP", // energy
            "DIS", "NFLX", "BA", "NKE", // consumer
        ];
        Self {
            watchlist: watchlist.iter().map(ToString::to_string).collect(),
            high_iv_min_price: dec!(5),
            high_iv_max_price: dec!(500),
            low_iv_min_price: dec!(10),
            low_iv_max_price: dec!(300),
            iv_threshold: 50.0,
            expiry_days: 45,
            top_n: 10,
            option_limit: 50,
            bar_lookback_days: 90,
            rank_window: 30,
        }
    }
}

impl ScannerConfig {
    /// Inclusive price band for a scan direction.
    #[must_use]
    pub fn price_band(&self, direction: ScanDirection) -> (Decimal, Decimal) {
        match direction {
            ScanDirection::HighIv => (self.high_iv_min_price, self.high_iv_max_price),
            ScanDirection::LowIv => (self.low_iv_min_price, self.low_iv_max_price),
        }
    }

    #[must_use]
    pub fn passes_price_filter(&self, price: Decimal, direction: ScanDirection) -> bool {
        let (min, max) = self.price_band(direction);
        price >= min && price <= max
    }

    #[must_use]
    pub fn passes_iv_filter(&self, iv_rank: Option<f64>, direction: ScanDirection) -> bool {
        match (iv_rank, direction) {
            (Some(r), ScanDirection::HighIv) => r >= self.iv_threshold,
            (Some(r), ScanDirection::LowIv) => r <= self.iv_threshold,
            (None, _) => false,
        }
    }
}

/// A symbol that passed both filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanCandidate {
    pub symbol: String,
    pub price: Decimal,
    pub iv_rank: f64,
    pub atm_strike: Decimal,
    pub expiry: NaiveDate,
    /// Provider-reported IV of the ATM call, when quoted.
    pub implied_volatility: Option<f64>,
}

/// Sort by IV rank (descending for high, ascending for low) and keep `top_n`.
///
/// The sort is stable, so equal ranks keep watchlist order.
#[must_use]
pub fn rank(
    mut candidates: Vec<ScanCandidate>,
    direction: ScanDirection,
    top_n: usize,
) -> Vec<ScanCandidate> {
    candidates.sort_by(|a, b| {
        let ord = a.iv_rank.total_cmp(&b.iv_rank);
        match direction {
            ScanDirection::HighIv => ord.reverse(),
            ScanDirection::LowIv => ord,
        }
    });
    candidates.truncate(top_n);
    candidates
}

/// One-line strategy suggestion for a ranked candidate.
#[must_use]
pub fn strategy_idea(candidate: &ScanCandidate, direction: ScanDirection) -> &'static str {
    match direction {
        ScanDirection::HighIv if candidate.price < dec!(200) => "Covered Call",
        ScanDirection::HighIv => "Cash-Secured Put",
        ScanDirection::LowIv if candidate.iv_rank < 25.0 => "Long Call/Put",
        ScanDirection::LowIv => "Debit Spread",
    }
}

/// IV-rank proxy from daily bars ending `today`.
pub async fn fetch_iv_rank(
    data: &dyn MarketData,
    symbol: &str,
    today: NaiveDate,
    lookback_days: i64,
    window: usize,
) -> Result<Option<f64>> {
    let start = today - Duration::days(lookback_days);
    let bars = data.daily_bars(symbol, start, today).await?;
    let closes: Vec<Decimal> = bars.iter().map(|b| b.close).collect();
    Ok(iv_rank_proxy(&closes, window))
}

/// Runs the filters against a [`MarketData`] provider, one symbol at a time.
pub struct Scanner<'a> {
    data: &'a dyn MarketData,
    config: &'a ScannerConfig,
}

impl<'a> Scanner<'a> {
    pub fn new(data: &'a dyn MarketData, config: &'a ScannerConfig) -> Self {
        Self { data, config }
    }

    /// Evaluate one symbol. `Ok(None)` means it was filtered out.
    pub async fn evaluate(
        &self,
        symbol: &str,
        direction: ScanDirection,
        today: NaiveDate,
    ) -> Result<Option<ScanCandidate>> {
        let quote = self.data.latest_quote(symbol).await?;
        let Some(price) = quote.mid() else {
            debug!(symbol, "No usable quote");
            return Ok(None);
        };
        if !self.config.passes_price_filter(price, direction) {
            debug!(symbol, %price, "Outside price band");
            return Ok(None);
        }

        let iv_rank = fetch_iv_rank(
            self.data,
            symbol,
            today,
            self.config.bar_lookback_days,
            self.config.rank_window,
        )
        .await?;
        if !self.config.passes_iv_filter(iv_rank, direction) {
            debug!(symbol, ?iv_rank, "IV rank filtered out");
            return Ok(None);
        }
        let Some(iv_rank) = iv_rank else {
            return Ok(None);
        };

        // Keep the page near the money so the ATM strike is in it.
        let filter = ChainFilter::expiring_within(today, self.config.expiry_days)
            .with_right(OptionRight::Call)
            .near_price(price, ATM_SEARCH_PCT)
            .with_limit(self.config.option_limit);
        let mut calls = self.data.option_snapshots(symbol, &filter).await?;
        calls.sort_by(|a, b| a.contract.strike.cmp(&b.contract.strike));

        let Some(atm) = closest_to(&calls, price) else {
            debug!(symbol, "No calls in window");
            return Ok(None);
        };

        Ok(Some(ScanCandidate {
            symbol: symbol.to_uppercase(),
            price,
            iv_rank,
            atm_strike: atm.contract.strike,
            expiry: atm.contract.expiry,
            implied_volatility: atm.implied_volatility,
        }))
    }

    /// Evaluate every symbol in order, skip failures, then rank.
    pub async fn scan(
        &self,
        symbols: &[String],
        direction: ScanDirection,
        today: NaiveDate,
    ) -> Vec<ScanCandidate> {
        let mut found = Vec::new();
        for symbol in symbols {
            match self.evaluate(symbol, direction, today).await {
                Ok(Some(candidate)) => found.push(candidate),
                Ok(None) => {}
                Err(e) => warn!(symbol = %symbol, error = %e, "Skipping symbol"),
            }
        }
        rank(found, direction, self.config.top_n)
    }
}

/// Strategy bias of the chain analyzer for an IV rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainOutlook {
    HighIv,
    LowIv,
    Medium,
}

impl ChainOutlook {
    #[must_use]
    pub fn from_rank(rank: Option<f64>) -> Self {
        match rank {
            Some(r) if r > 60.0 => Self::HighIv,
            Some(r) if r < 40.0 => Self::LowIv,
            _ => Self::Medium,
        }
    }
}

/// Whether a strike is inside the analyzer's ±15% window.
#[must_use]
pub fn within_analysis_window(strike: Decimal, price: Decimal) -> bool {
    (strike - price).abs() < price * dec!(0.15)
}

/// Analyzer label such as "ITM -2.2%", "ATM" or "OTM +1.1%".
#[must_use]
pub fn strike_label(right: OptionRight, strike: Decimal, price: Decimal, tolerance: Decimal) -> String {
    let pct = moneyness_distance_pct(strike, price)
        .map(|p| p.abs().round_dp(1))
        .unwrap_or_default();
    match Moneyness::classify(right, price, strike, tolerance) {
        Moneyness::Atm => "ATM".to_string(),
        Moneyness::Itm => format!("ITM -{pct}%"),
        Moneyness::Otm => format!("OTM +{pct}%"),
    }
}
