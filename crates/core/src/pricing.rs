//! Single-contract option arithmetic.
//!
//! Intrinsic/time value split, moneyness labels, expiry payoffs, and the
//! scenario tables printed by the call and put lessons. All prices are per
//! share.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::OptionRight;

/// Value of exercising now: max(S − K, 0) for calls, max(K − S, 0) for puts.
#[must_use]
pub fn intrinsic_value(right: OptionRight, underlying: Decimal, strike: Decimal) -> Decimal {
    let raw = match right {
        OptionRight::Call => underlying - strike,
        OptionRight::Put => strike - underlying,
    };
    raw.max(Decimal::ZERO)
}

/// Portion of the premium not explained by intrinsic value, floored at zero.
#[must_use]
pub fn time_value(option_price: Decimal, intrinsic: Decimal) -> Decimal {
    (option_price - intrinsic).max(Decimal::ZERO)
}

/// Option value at expiration for a given stock price.
#[must_use]
pub fn expiry_value(right: OptionRight, price_at_expiry: Decimal, strike: Decimal) -> Decimal {
    intrinsic_value(right, price_at_expiry, strike)
}

/// In/at/out-of-the-money classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Moneyness {
    Itm,
    Atm,
    Otm,
}

impl Moneyness {
    /// Classify a strike against the underlying.
    ///
    /// `Atm` when |underlying − strike| ≤ tolerance (a negative tolerance
    /// counts as zero), otherwise `Itm`/`Otm` by side.
    #[must_use]
    pub fn classify(
        right: OptionRight,
        underlying: Decimal,
        strike: Decimal,
        tolerance: Decimal,
    ) -> Self {
        let tolerance = tolerance.max(Decimal::ZERO);
        if (underlying - strike).abs() <= tolerance {
            return Self::Atm;
        }
        let in_the_money = match right {
            OptionRight::Call => strike < underlying,
            OptionRight::Put => strike > underlying,
        };
        if in_the_money {
            Self::Itm
        } else {
            Self::Otm
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Itm => "ITM",
            Self::Atm => "ATM",
            Self::Otm => "OTM",
        }
    }

    /// One-line description used in the moneyness lesson.
    #[must_use]
    pub fn typical_premium(&self) -> &'static str {
        match self {
            Self::Itm => "HIGH (has intrinsic value)",
            Self::Atm => "MEDIUM (mostly time value)",
            Self::Otm => "LOW (only time value)",
        }
    }
}

impl std::fmt::Display for Moneyness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Signed distance of the strike from the underlying, in percent.
///
/// Returns `None` for a non-positive underlying price.
#[must_use]
pub fn moneyness_distance_pct(strike: Decimal, underlying: Decimal) -> Option<Decimal> {
    if underlying <= Decimal::ZERO {
        return None;
    }
    Some((strike - underlying) / underlying * Decimal::ONE_HUNDRED)
}

/// Linear time-decay estimate: −time_value / days, per day.
///
/// A teaching approximation only; real theta is not linear.
#[must_use]
pub fn naive_theta(time_value: Decimal, days_to_expiry: i64) -> Option<Decimal> {
    if days_to_expiry <= 0 {
        return None;
    }
    Some(-time_value / Decimal::from(days_to_expiry))
}

/// Breakeven stock price at expiry for a long option.
#[must_use]
pub fn long_option_breakeven(right: OptionRight, strike: Decimal, premium: Decimal) -> Decimal {
    match right {
        OptionRight::Call => strike + premium,
        OptionRight::Put => strike - premium,
    }
}

/// Intrinsic/time split of one quoted option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueBreakdown {
    pub intrinsic: Decimal,
    pub time_value: Decimal,
    pub moneyness: Moneyness,
    pub theta_per_day: Option<Decimal>,
}

impl ValueBreakdown {
    #[must_use]
    pub fn compute(
        right: OptionRight,
        underlying: Decimal,
        strike: Decimal,
        option_price: Decimal,
        days_to_expiry: i64,
        tolerance: Decimal,
    ) -> Self {
        let intrinsic = intrinsic_value(right, underlying, strike);
        let time_value = time_value(option_price, intrinsic);
        Self {
            intrinsic,
            time_value,
            moneyness: Moneyness::classify(right, underlying, strike, tolerance),
            theta_per_day: naive_theta(time_value, days_to_expiry),
        }
    }
}

/// One row of a long-option P&L table at expiration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayoffScenario {
    pub label: &'static str,
    pub stock_price: Decimal,
    pub option_value: Decimal,
    pub pnl_per_share: Decimal,
    pub pnl_pct: Option<Decimal>,
}

impl PayoffScenario {
    #[must_use]
    pub fn at(
        label: &'static str,
        right: OptionRight,
        stock_price: Decimal,
        strike: Decimal,
        premium: Decimal,
    ) -> Self {
        let option_value = expiry_value(right, stock_price, strike);
        let pnl_per_share = option_value - premium;
        let pnl_pct = if premium.is_zero() {
            None
        } else {
            Some(pnl_per_share / premium * Decimal::ONE_HUNDRED)
        };
        Self {
            label,
            stock_price,
            option_value,
            pnl_per_share,
            pnl_pct,
        }
    }
}

/// The six scenarios of the call lesson, from a drop to a big rally.
#[must_use]
pub fn long_call_scenarios(
    current_price: Decimal,
    strike: Decimal,
    premium: Decimal,
) -> Vec<PayoffScenario> {
    let breakeven = long_option_breakeven(OptionRight::Call, strike, premium);
    let ten = Decimal::TEN;
    let five = Decimal::from(5);
    [
        ("Stock drops to", current_price - ten),
        ("Stock stays same", current_price),
        ("Stock up slightly", strike + premium / Decimal::TWO),
        ("Stock at breakeven", breakeven),
        ("Stock up nicely", breakeven + five),
        ("Stock up big", breakeven + ten),
    ]
    .into_iter()
    .map(|(label, price)| PayoffScenario::at(label, OptionRight::Call, price, strike, premium))
    .collect()
}

/// The six scenarios of the put lesson, from a rally to a big drop.
#[must_use]
pub fn long_put_scenarios(
    current_price: Decimal,
    strike: Decimal,
    premium: Decimal,
) -> Vec<PayoffScenario> {
    let breakeven = long_option_breakeven(OptionRight::Put, strike, premium);
    let ten = Decimal::TEN;
    let five = Decimal::from(5);
    [
        ("Stock up big", current_price + ten),
        ("Stock up slightly", current_price + five),
        ("Stock stays same", current_price),
        ("Stock at breakeven", breakeven),
        ("Stock down nicely", breakeven - five),
        ("Stock down big", breakeven - ten),
    ]
    .into_iter()
    .map(|(label, price)| PayoffScenario::at(label, OptionRight::Put, price, strike, premium))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn call_intrinsic_is_zero_at_or_above_strike() {
        assert_eq!(intrinsic_value(OptionRight::Call, dec!(100), dec!(100)), dec!(0));
        assert_eq!(intrinsic_value(OptionRight::Call, dec!(95), dec!(100)), dec!(0));
        assert_eq!(intrinsic_value(OptionRight::Call, dec!(110), dec!(100)), dec!(10));
    }

    #[test]
    fn put_intrinsic_is_zero_at_or_below_strike() {
        assert_eq!(intrinsic_value(OptionRight::Put, dec!(100), dec!(100)), dec!(0));
        assert_eq!(intrinsic_value(OptionRight::Put, dec!(105), dec!(100)), dec!(0));
        assert_eq!(intrinsic_value(OptionRight::Put, dec!(90), dec!(100)), dec!(10));
    }

    #[test]
    fn time_value_is_floored_at_zero() {
        assert_eq!(time_value(dec!(12.50), dec!(10)), dec!(2.50));
        // Quote below intrinsic (stale or crossed) must not go negative.
        assert_eq!(time_value(dec!(9.80), dec!(10)), dec!(0));
        assert_eq!(time_value(dec!(3), dec!(0)), dec!(3));
    }

    #[test]
    fn atm_within_tolerance_on_both_sides() {
        for right in [OptionRight::Call, OptionRight::Put] {
            assert_eq!(
                Moneyness::classify(right, dec!(450), dec!(452), dec!(2)),
                Moneyness::Atm
            );
            assert_eq!(
                Moneyness::classify(right, dec!(450), dec!(448), dec!(2)),
                Moneyness::Atm
            );
        }
    }

    #[test]
    fn itm_otm_by_side_outside_tolerance() {
        let s = dec!(450);
        let tol = dec!(2);
        assert_eq!(Moneyness::classify(OptionRight::Call, s, dec!(440), tol), Moneyness::Itm);
        assert_eq!(Moneyness::classify(OptionRight::Call, s, dec!(460), tol), Moneyness::Otm);
        assert_eq!(Moneyness::classify(OptionRight::Put, s, dec!(460), tol), Moneyness::Itm);
        assert_eq!(Moneyness::classify(OptionRight::Put, s, dec!(440), tol), Moneyness::Otm);
    }

    #[test]
    fn zero_and_negative_tolerance_only_match_exact_strike() {
        let s = dec!(450);
        assert_eq!(Moneyness::classify(OptionRight::Call, s, s, dec!(0)), Moneyness::Atm);
        assert_eq!(Moneyness::classify(OptionRight::Call, s, s, dec!(-1)), Moneyness::Atm);
        assert_eq!(
            Moneyness::classify(OptionRight::Call, s, dec!(450.01), dec!(-1)),
            Moneyness::Otm
        );
        assert_eq!(Moneyness::Itm.to_string(), "ITM");
    }

    #[test]
    fn naive_theta_spreads_time_value_linearly() {
        assert_eq!(naive_theta(dec!(3.00), 30), Some(dec!(-0.1)));
        assert_eq!(naive_theta(dec!(3.00), 0), None);
        assert_eq!(naive_theta(dec!(3.00), -2), None);
    }

    #[test]
    fn breakdown_of_itm_call() {
        let b = ValueBreakdown::compute(
            OptionRight::Call,
            dec!(455),
            dec!(450),
            dec!(8),
            30,
            dec!(2),
        );
        assert_eq!(b.intrinsic, dec!(5));
        assert_eq!(b.time_value, dec!(3));
        assert_eq!(b.moneyness, Moneyness::Itm);
        assert_eq!(b.theta_per_day, Some(dec!(-0.1)));
    }

    #[test]
    fn long_breakevens() {
        assert_eq!(long_option_breakeven(OptionRight::Call, dec!(450), dec!(3)), dec!(453));
        assert_eq!(long_option_breakeven(OptionRight::Put, dec!(450), dec!(3)), dec!(447));
    }

    #[test]
    fn call_scenarios_lose_premium_below_strike_and_break_even() {
        let rows = long_call_scenarios(dec!(450), dec!(450), dec!(3));
        assert_eq!(rows.len(), 6);

        assert_eq!(rows[0].stock_price, dec!(440));
        assert_eq!(rows[0].pnl_per_share, dec!(-3));
        assert_eq!(rows[0].pnl_pct, Some(dec!(-100)));

        let breakeven = &rows[3];
        assert_eq!(breakeven.stock_price, dec!(453));
        assert_eq!(breakeven.pnl_per_share, dec!(0));

        let big = &rows[5];
        assert_eq!(big.option_value, dec!(13));
        assert_eq!(big.pnl_per_share, dec!(10));
    }

    #[test]
    fn put_scenarios_mirror_calls() {
        let rows = long_put_scenarios(dec!(450), dec!(450), dec!(3));
        assert_eq!(rows[0].stock_price, dec!(460));
        assert_eq!(rows[0].option_value, dec!(0));
        assert_eq!(rows[3].stock_price, dec!(447));
        assert_eq!(rows[3].pnl_per_share, dec!(0));
        assert_eq!(rows[5].stock_price, dec!(437));
        assert_eq!(rows[5].pnl_per_share, dec!(10));
    }

    #[test]
    fn zero_premium_has_no_percentage() {
        let row = PayoffScenario::at("free", OptionRight::Call, dec!(10), dec!(5), dec!(0));
        assert_eq!(row.pnl_pct, None);
        assert_eq!(row.pnl_per_share, dec!(5));
    }

    #[test]
    fn distance_pct_sign_follows_strike() {
        assert_eq!(moneyness_distance_pct(dec!(110), dec!(100)), Some(dec!(10)));
        assert_eq!(moneyness_distance_pct(dec!(90), dec!(100)), Some(dec!(-10)));
        assert_eq!(moneyness_distance_pct(dec!(90), dec!(0)), None);
    }
}
