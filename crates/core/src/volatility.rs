//! Realized volatility and the IV-rank proxy used by the scanner.
//!
//! The proxy compares recent realized volatility with the volatility of the
//! whole fetched window. It is not an implied-volatility rank; it stands in
//! for one when no option IV history is available.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trading days per year used to annualize daily volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Bars required before a rank is reported.
pub const MIN_BARS_FOR_RANK: usize = 20;

/// Default lookback (in returns) for the "recent" leg of the proxy.
pub const DEFAULT_RANK_WINDOW: usize = 30;

/// Simple daily returns from consecutive closes. Zero closes are skipped.
#[must_use]
pub fn daily_returns(closes: &[Decimal]) -> Vec<f64> {
    closes
        .windows(2)
        .filter_map(|w| {
            let prev = w[0].to_f64()?;
            let next = w[1].to_f64()?;
            if prev == 0.0 {
                return None;
            }
            Some((next - prev) / prev)
        })
        .collect()
}

/// Sample standard deviation (n - 1 denominator).
fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(var.sqrt())
}

/// Annualized volatility of a return series, in percent.
#[must_use]
pub fn annualized_from_returns(returns: &[f64]) -> Option<f64> {
    sample_std(returns).map(|s| s * TRADING_DAYS_PER_YEAR.sqrt() * 100.0)
}

/// Annualized close-to-close volatility, in percent.
#[must_use]
pub fn annualized_volatility(closes: &[Decimal]) -> Option<f64> {
    annualized_from_returns(&daily_returns(closes))
}

/// Recent volatility over whole-window volatility, scaled to 0..=100.
///
/// Returns `None` with fewer than [`MIN_BARS_FOR_RANK`] closes or a flat
/// series.
#[must_use]
pub fn iv_rank_proxy(closes: &[Decimal], window: usize) -> Option<f64> {
    if closes.len() < MIN_BARS_FOR_RANK {
        return None;
    }
    let returns = daily_returns(closes);
    let recent = &returns[returns.len().saturating_sub(window)..];

    let recent_vol = annualized_from_returns(recent)?;
    let all_vol = annualized_from_returns(&returns)?;
    if all_vol == 0.0 || !all_vol.is_finite() {
        return None;
    }
    Some((recent_vol / all_vol * 100.0).clamp(0.0, 100.0))
}

/// Coarse volatility regime for an IV rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IvRegime {
    VeryHigh,
    High,
    Medium,
    Low,
}

impl IvRegime {
    #[must_use]
    pub fn from_rank(rank: f64) -> Self {
        if rank > 75.0 {
            Self::VeryHigh
        } else if rank > 50.0 {
            Self::High
        } else if rank < 25.0 {
            Self::Low
        } else {
            Self::Medium
        }
    }

    #[must_use]
    pub fn status_line(&self) -> &'static str {
        match self {
            Self::VeryHigh => "VERY HIGH IV - Good for selling",
            Self::High => "HIGH IV - Good for selling",
            Self::Medium => "MEDIUM IV - Neutral",
            Self::Low => "LOW IV - Good for buying",
        }
    }
}
