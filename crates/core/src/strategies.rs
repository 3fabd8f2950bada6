//! Stock-plus-option strategies: covered call and protective put.
//!
//! Both assume one contract against `shares` (normally 100) of stock bought
//! at `purchase_price`. Premiums are per share.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

const SHARES_PER_CONTRACT: i64 = 100;

/// Where a premium figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PremiumSource {
    /// The provider's quote (mid or last) for the chosen strike.
    Quoted,
    /// Rule-of-thumb estimate, used when the strike has no quote.
    Estimated,
}

impl PremiumSource {
    /// Prefix for printed premiums ("~" marks an estimate).
    #[must_use]
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Quoted => "",
            Self::Estimated => "~",
        }
    }
}

/// Rough covered-call premium: max($0.50, 10% of the OTM distance).
#[must_use]
pub fn estimate_covered_call_premium(stock_price: Decimal, strike: Decimal) -> Decimal {
    ((strike - stock_price) * dec!(0.10)).max(dec!(0.50))
}

/// Rough protective-put premium: max($1.00, 15% of the OTM distance plus a
/// 2%-per-year time charge on the stock price).
#[must_use]
pub fn estimate_protective_put_premium(
    stock_price: Decimal,
    strike: Decimal,
    days_to_expiry: i64,
) -> Decimal {
    let days = Decimal::from(days_to_expiry.max(0));
    let time_charge = days / dec!(365) * stock_price * dec!(0.02);
    ((stock_price - strike) * dec!(0.15) + time_charge).max(dec!(1.00))
}

/// Pick the quoted premium if there is one, else the estimate.
#[must_use]
pub fn resolve_premium(quoted: Option<Decimal>, estimate: Decimal) -> (Decimal, PremiumSource) {
    match quoted {
        Some(p) if p > Decimal::ZERO => (p, PremiumSource::Quoted),
        _ => (estimate, PremiumSource::Estimated),
    }
}

/// What happens to a covered call at expiration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CoveredCallOutcome {
    KeepSharesAndPremium,
    CalledAway,
}

impl CoveredCallOutcome {
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Self::KeepSharesAndPremium => "Keep shares + premium, can sell another call",
            Self::CalledAway => "Shares called away at strike, keep premium",
        }
    }
}

/// Long stock, short one call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoveredCall {
    pub purchase_price: Decimal,
    pub strike: Decimal,
    pub premium: Decimal,
    pub shares: Decimal,
}

impl CoveredCall {
    #[must_use]
    pub fn new(purchase_price: Decimal, strike: Decimal, premium: Decimal) -> Self {
        Self {
            purchase_price,
            strike,
            premium,
            shares: Decimal::from(SHARES_PER_CONTRACT),
        }
    }

    /// Stock price at which the position neither gains nor loses.
    #[must_use]
    pub fn breakeven(&self) -> Decimal {
        self.purchase_price - self.premium
    }

    #[must_use]
    pub fn premium_income(&self) -> Decimal {
        self.premium * self.shares
    }

    #[must_use]
    pub fn stock_cost(&self) -> Decimal {
        self.purchase_price * self.shares
    }

    /// Profit when the shares are called away at the strike.
    #[must_use]
    pub fn max_profit(&self) -> Decimal {
        (self.strike - self.purchase_price + self.premium) * self.shares
    }

    #[must_use]
    pub fn return_if_called_pct(&self) -> Decimal {
        if self.stock_cost().is_zero() {
            return Decimal::ZERO;
        }
        self.max_profit() / self.stock_cost() * Decimal::ONE_HUNDRED
    }

    /// `return_if_called_pct` scaled to a 365-day year.
    #[must_use]
    pub fn annualized_return_pct(&self, days_to_expiry: i64) -> Option<Decimal> {
        if days_to_expiry <= 0 {
            return None;
        }
        Some(self.return_if_called_pct() * dec!(365) / Decimal::from(days_to_expiry))
    }

    #[must_use]
    pub fn outcome_at(&self, price_at_expiry: Decimal) -> CoveredCallOutcome {
        if price_at_expiry >= self.strike {
            CoveredCallOutcome::CalledAway
        } else {
            CoveredCallOutcome::KeepSharesAndPremium
        }
    }

    /// Total P&L at expiry; upside is capped at the strike.
    #[must_use]
    pub fn pnl_at(&self, price_at_expiry: Decimal) -> Decimal {
        (price_at_expiry.min(self.strike) - self.purchase_price + self.premium) * self.shares
    }

    /// Drop 5%, flat, at strike, 5% above strike.
    #[must_use]
    pub fn scenarios(&self) -> Vec<(&'static str, Decimal, CoveredCallOutcome)> {
        [
            ("Stock drops to", self.purchase_price * dec!(0.95)),
            ("Stock stays flat", self.purchase_price),
            ("Stock at strike", self.strike),
            ("Stock above strike", self.strike * dec!(1.05)),
        ]
        .into_iter()
        .map(|(label, price)| (label, price, self.outcome_at(price)))
        .collect()
    }
}

/// P&L split of a protective put at one expiry price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtectivePutPnl {
    pub stock_pnl: Decimal,
    pub put_value: Decimal,
    pub net_pnl: Decimal,
}

/// Long stock, long one put.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtectivePut {
    pub purchase_price: Decimal,
    pub strike: Decimal,
    pub premium: Decimal,
    pub shares: Decimal,
}

impl ProtectivePut {
    #[must_use]
    pub fn new(purchase_price: Decimal, strike: Decimal, premium: Decimal) -> Self {
        Self {
            purchase_price,
            strike,
            premium,
            shares: Decimal::from(SHARES_PER_CONTRACT),
        }
    }

    /// Stock price needed to recover the insurance cost.
    #[must_use]
    pub fn breakeven(&self) -> Decimal {
        self.purchase_price + self.premium
    }

    #[must_use]
    pub fn insurance_cost(&self) -> Decimal {
        self.premium * self.shares
    }

    #[must_use]
    pub fn position_value(&self) -> Decimal {
        self.purchase_price * self.shares
    }

    /// Worst case: the stock falls to (or through) the strike.
    #[must_use]
    pub fn max_loss(&self) -> Decimal {
        ((self.purchase_price - self.strike).max(Decimal::ZERO) + self.premium) * self.shares
    }

    #[must_use]
    pub fn max_loss_pct(&self) -> Decimal {
        if self.position_value().is_zero() {
            return Decimal::ZERO;
        }
        self.max_loss() / self.position_value() * Decimal::ONE_HUNDRED
    }

    /// Strike distance below the purchase price, in percent.
    #[must_use]
    pub fn protection_depth_pct(&self) -> Decimal {
        if self.purchase_price.is_zero() {
            return Decimal::ZERO;
        }
        (self.purchase_price - self.strike) / self.purchase_price * Decimal::ONE_HUNDRED
    }

    #[must_use]
    pub fn pnl_at(&self, price_at_expiry: Decimal) -> ProtectivePutPnl {
        let stock_pnl = (price_at_expiry - self.purchase_price) * self.shares;
        let put_value = (self.strike - price_at_expiry).max(Decimal::ZERO) * self.shares;
        ProtectivePutPnl {
            stock_pnl,
            put_value,
            net_pnl: stock_pnl + put_value - self.insurance_cost(),
        }
    }

    #[must_use]
    pub fn cost_per_day(&self, days_to_expiry: i64) -> Option<Decimal> {
        if days_to_expiry <= 0 {
            return None;
        }
        Some(self.insurance_cost() / Decimal::from(days_to_expiry))
    }

    /// Crash, drop, at strike, flat, up 10%, up 30%.
    #[must_use]
    pub fn scenarios(&self) -> Vec<(&'static str, Decimal, ProtectivePutPnl)> {
        let p = self.purchase_price;
        [
            ("CRASH: Stock drops 30%", p * dec!(0.70)),
            ("DROP: Stock drops 15%", p * dec!(0.85)),
            ("At strike price", self.strike),
            ("Flat: No change", p),
            ("UP: Stock gains 10%", p * dec!(1.10)),
            ("MOON: Stock gains 30%", p * dec!(1.30)),
        ]
        .into_iter()
        .map(|(label, price)| (label, price, self.pnl_at(price)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covered_call_breakeven_is_purchase_minus_premium() {
        let cc = CoveredCall::new(dec!(180), dec!(185), dec!(2.50));
        assert_eq!(cc.breakeven(), dec!(177.50));
        assert_eq!(cc.premium_income(), dec!(250));
    }

    #[test]
    fn covered_call_profit_capped_at_strike() {
        let cc = CoveredCall::new(dec!(180), dec!(185), dec!(2.50));
        assert_eq!(cc.max_profit(), dec!(750));
        assert_eq!(cc.pnl_at(dec!(200)), dec!(750));
        assert_eq!(cc.pnl_at(dec!(185)), dec!(750));
        assert_eq!(cc.pnl_at(dec!(177.50)), dec!(0));
        assert_eq!(cc.outcome_at(dec!(185)), CoveredCallOutcome::CalledAway);
        assert_eq!(cc.outcome_at(dec!(184.99)), CoveredCallOutcome::KeepSharesAndPremium);
    }

    #[test]
    fn covered_call_returns() {
        let cc = CoveredCall::new(dec!(100), dec!(105), dec!(1));
        // (5 + 1) * 100 / 10_000 = 6%
        assert_eq!(cc.return_if_called_pct(), dec!(6));
        assert_eq!(cc.annualized_return_pct(365), Some(dec!(6)));
        assert_eq!(cc.annualized_return_pct(0), None);
    }

    #[test]
    fn covered_call_scenarios_cover_both_outcomes() {
        let cc = CoveredCall::new(dec!(100), dec!(105), dec!(1));
        let rows = cc.scenarios();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].1, dec!(95.00));
        assert_eq!(rows[0].2, CoveredCallOutcome::KeepSharesAndPremium);
        assert_eq!(rows[2].2, CoveredCallOutcome::CalledAway);
        assert_eq!(rows[3].1, dec!(110.25));
    }

    #[test]
    fn protective_put_breakeven_is_purchase_plus_premium() {
        let pp = ProtectivePut::new(dec!(180), dec!(170), dec!(3));
        assert_eq!(pp.breakeven(), dec!(183));
        assert_eq!(pp.insurance_cost(), dec!(300));
    }

    #[test]
    fn protective_put_loss_is_bounded() {
        let pp = ProtectivePut::new(dec!(180), dec!(170), dec!(3));
        assert_eq!(pp.max_loss(), dec!(1300));
        // Far below the strike the net loss stops growing.
        assert_eq!(pp.pnl_at(dec!(50)).net_pnl, dec!(-1300));
        assert_eq!(pp.pnl_at(dec!(170)).net_pnl, dec!(-1300));
        let up = pp.pnl_at(dec!(200));
        assert_eq!(up.put_value, dec!(0));
        assert_eq!(up.net_pnl, dec!(1700));
    }

    #[test]
    fn protective_put_itm_strike_floors_loss_at_premium() {
        let pp = ProtectivePut::new(dec!(100), dec!(105), dec!(6));
        assert_eq!(pp.max_loss(), dec!(600));
        assert_eq!(pp.max_loss_pct(), dec!(6));
    }

    #[test]
    fn protective_put_cost_per_day() {
        let pp = ProtectivePut::new(dec!(100), dec!(95), dec!(3));
        assert_eq!(pp.cost_per_day(60), Some(dec!(5)));
        assert_eq!(pp.cost_per_day(0), None);
        assert_eq!(pp.protection_depth_pct(), dec!(5));
    }

    #[test]
    fn premium_estimates_have_floors() {
        assert_eq!(estimate_covered_call_premium(dec!(100), dec!(101)), dec!(0.50));
        assert_eq!(estimate_covered_call_premium(dec!(100), dec!(110)), dec!(1.00));
        assert_eq!(estimate_protective_put_premium(dec!(100), dec!(99), 0), dec!(1.00));
        // 10 * 0.15 + 365/365 * 100 * 0.02 = 3.5
        assert_eq!(estimate_protective_put_premium(dec!(100), dec!(90), 365), dec!(3.5));
    }

    #[test]
    fn resolve_premium_prefers_positive_quote() {
        assert_eq!(
            resolve_premium(Some(dec!(2.10)), dec!(1)),
            (dec!(2.10), PremiumSource::Quoted)
        );
        assert_eq!(resolve_premium(Some(dec!(0)), dec!(1)), (dec!(1), PremiumSource::Estimated));
        assert_eq!(resolve_premium(None, dec!(1)), (dec!(1), PremiumSource::Estimated));
    }
}
