//! Options chain grouping and strike selection.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{OptionContract, OptionRight, OptionSnapshot};

/// Strike window (fraction of price) used when only the ATM contract is needed.
pub const ATM_SEARCH_PCT: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Request shape for a chain query against the data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainFilter {
    pub expiration_gte: Option<NaiveDate>,
    pub expiration_lte: Option<NaiveDate>,
    pub right: Option<OptionRight>,
    pub strike_gte: Option<Decimal>,
    pub strike_lte: Option<Decimal>,
    /// Maximum number of contracts to return across all pages.
    pub limit: u32,
}

impl Default for ChainFilter {
    fn default() -> Self {
        Self {
            expiration_gte: None,
            expiration_lte: None,
            right: None,
            strike_gte: None,
            strike_lte: None,
            limit: 100,
        }
    }
}

impl ChainFilter {
    /// Contracts expiring between `today` and `today + days`, inclusive.
    #[must_use]
    pub fn expiring_within(today: NaiveDate, days: i64) -> Self {
        Self {
            expiration_gte: Some(today),
            expiration_lte: Some(today + Duration::days(days)),
            ..Self::default()
        }
    }

    /// Contracts expiring on exactly one date.
    #[must_use]
    pub fn expiring_on(date: NaiveDate) -> Self {
        Self {
            expiration_gte: Some(date),
            expiration_lte: Some(date),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_right(mut self, right: OptionRight) -> Self {
        self.right = Some(right);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_strikes(mut self, gte: Option<Decimal>, lte: Option<Decimal>) -> Self {
        self.strike_gte = gte;
        self.strike_lte = lte;
        self
    }

    /// Strikes within `pct` (0.05 = 5%) either side of `price`, bounds inclusive.
    #[must_use]
    pub fn near_price(self, price: Decimal, pct: Decimal) -> Self {
        let band = price * pct;
        self.with_strikes(Some(price - band), Some(price + band))
    }

    /// Whether a contract falls inside the window.
    #[must_use]
    pub fn matches(&self, contract: &OptionContract) -> bool {
        self.expiration_gte.map_or(true, |d| contract.expiry >= d)
            && self.expiration_lte.map_or(true, |d| contract.expiry <= d)
            && self.right.map_or(true, |r| contract.right == r)
            && self.strike_gte.map_or(true, |s| contract.strike >= s)
            && self.strike_lte.map_or(true, |s| contract.strike <= s)
    }
}

/// Calls and puts of one expiration, each sorted by strike.
#[derive(Debug, Clone, Default)]
pub struct ExpirySlice<'a> {
    pub calls: Vec<&'a OptionSnapshot>,
    pub puts: Vec<&'a OptionSnapshot>,
}

/// One line of a side-by-side chain table.
#[derive(Debug, Clone, Copy)]
pub struct StrikeRow<'a> {
    pub strike: Decimal,
    pub call: Option<&'a OptionSnapshot>,
    pub put: Option<&'a OptionSnapshot>,
}

impl<'a> ExpirySlice<'a> {
    /// Up to `rows` strikes centred on the one nearest `price`, calls and
    /// puts aligned by strike.
    #[must_use]
    pub fn rows_around(&self, price: Decimal, rows: usize) -> Vec<StrikeRow<'a>> {
        let strikes: Vec<Decimal> = self
            .calls
            .iter()
            .chain(&self.puts)
            .map(|o| o.contract.strike)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if strikes.is_empty() || rows == 0 {
            return Vec::new();
        }

        let centre = strikes
            .iter()
            .enumerate()
            .min_by_key(|(_, k)| (**k - price).abs())
            .map_or(0, |(i, _)| i);
        let start = centre
            .saturating_sub(rows / 2)
            .min(strikes.len().saturating_sub(rows));

        strikes[start..]
            .iter()
            .take(rows)
            .map(|&strike| StrikeRow {
                strike,
                call: self.calls.iter().copied().find(|o| o.contract.strike == strike),
                put: self.puts.iter().copied().find(|o| o.contract.strike == strike),
            })
            .collect()
    }
}

/// All fetched contracts for one underlying.
#[derive(Debug, Clone)]
pub struct OptionsChain {
    pub underlying: String,
    pub underlying_price: Decimal,
    pub options: Vec<OptionSnapshot>,
}

impl OptionsChain {
    pub fn new(underlying: &str, underlying_price: Decimal, options: Vec<OptionSnapshot>) -> Self {
        Self {
            underlying: underlying.to_uppercase(),
            underlying_price,
            options,
        }
    }

    /// Chain built from bare contracts (no quotes).
    pub fn from_contracts(
        underlying: &str,
        underlying_price: Decimal,
        contracts: Vec<OptionContract>,
    ) -> Self {
        let options = contracts.into_iter().map(OptionSnapshot::bare).collect();
        Self::new(underlying, underlying_price, options)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Distinct expirations, ascending.
    #[must_use]
    pub fn expirations(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.options.iter().map(|o| o.contract.expiry).collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }

    /// Group by expiration date, calls and puts sorted by strike.
    #[must_use]
    pub fn by_expiry(&self) -> BTreeMap<NaiveDate, ExpirySlice<'_>> {
        let mut grouped: BTreeMap<NaiveDate, ExpirySlice<'_>> = BTreeMap::new();
        for opt in &self.options {
            let slice = grouped.entry(opt.contract.expiry).or_default();
            match opt.contract.right {
                OptionRight::Call => slice.calls.push(opt),
                OptionRight::Put => slice.puts.push(opt),
            }
        }
        for slice in grouped.values_mut() {
            slice.calls.sort_by(|a, b| a.contract.strike.cmp(&b.contract.strike));
            slice.puts.sort_by(|a, b| a.contract.strike.cmp(&b.contract.strike));
        }
        grouped
    }

    /// One side of the chain, optionally for a single expiry, sorted by strike.
    #[must_use]
    pub fn side(&self, right: OptionRight, expiry: Option<NaiveDate>) -> Vec<&OptionSnapshot> {
        let mut out: Vec<&OptionSnapshot> = self
            .options
            .iter()
            .filter(|o| o.contract.right == right)
            .filter(|o| expiry.map_or(true, |d| o.contract.expiry == d))
            .collect();
        out.sort_by(|a, b| {
            a.contract
                .strike
                .cmp(&b.contract.strike)
                .then(a.contract.expiry.cmp(&b.contract.expiry))
        });
        out
    }

    /// Contract with the strike closest to the underlying price.
    #[must_use]
    pub fn atm(&self, right: OptionRight, expiry: Option<NaiveDate>) -> Option<&OptionSnapshot> {
        closest_to(self.side(right, expiry), self.underlying_price)
    }

    /// First strike (ascending) that is in the money by more than `band`.
    #[must_use]
    pub fn first_itm_example(&self, right: OptionRight, band: Decimal) -> Option<&OptionSnapshot> {
        let price = self.underlying_price;
        self.side(right, None).into_iter().find(|o| match right {
            OptionRight::Call => o.contract.strike < price - band,
            OptionRight::Put => o.contract.strike > price + band,
        })
    }

    /// First strike (ascending) that is out of the money by more than `band`.
    #[must_use]
    pub fn first_otm_example(&self, right: OptionRight, band: Decimal) -> Option<&OptionSnapshot> {
        let price = self.underlying_price;
        self.side(right, None).into_iter().find(|o| match right {
            OptionRight::Call => o.contract.strike > price + band,
            OptionRight::Put => o.contract.strike < price - band,
        })
    }

    /// Contracts whose strike lies within `pct` (0.05 = 5%) of the price.
    #[must_use]
    pub fn near_the_money(&self, pct: Decimal) -> Vec<&OptionSnapshot> {
        let width = self.underlying_price * pct;
        self.options
            .iter()
            .filter(|o| (o.contract.strike - self.underlying_price).abs() < width)
            .collect()
    }

    /// Whether a strike gets the "near current price" marker.
    #[must_use]
    pub fn is_near_price(&self, strike: Decimal, band: Decimal) -> bool {
        (strike - self.underlying_price).abs() < band
    }
}

/// Snapshot whose strike is nearest `price`; ties go to the lower strike.
///
/// Input must be sorted by strike ascending.
pub fn closest_to<'a, I>(sorted: I, price: Decimal) -> Option<&'a OptionSnapshot>
where
    I: IntoIterator<Item = &'a OptionSnapshot>,
{
    let mut best: Option<(&OptionSnapshot, Decimal)> = None;
    for opt in sorted {
        let dist = (opt.contract.strike - price).abs();
        match best {
            Some((_, d)) if dist >= d => {}
            _ => best = Some((opt, dist)),
        }
    }
    best.map(|(o, _)| o)
}
