//! Position sizing, stop-loss and profit-target ladder for long options.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Thresholds for the sizing and exit rules. All values are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskRules {
    /// Share of the portfolio put at risk on one trade.
    pub max_risk_pct: Decimal,
    /// Loss of premium that triggers the stop.
    pub stop_loss_pct: Decimal,
    /// Gain at which half the contracts are sold.
    pub take_half_pct: Decimal,
    /// Gain at which everything is sold.
    pub take_all_pct: Decimal,
}

impl Default for RiskRules {
    fn default() -> Self {
        Self {
            max_risk_pct: dec!(2),
            stop_loss_pct: dec!(50),
            take_half_pct: dec!(50),
            take_all_pct: dec!(100),
        }
    }
}

/// What the ladder says to do with an open long option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitAction {
    StopLoss { quantity: u32 },
    TakeHalf { quantity: u32 },
    TakeAll { quantity: u32 },
    Hold,
}

impl ExitAction {
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::StopLoss { quantity } => format!("Stop loss hit: close all {quantity}"),
            Self::TakeHalf { quantity } => format!("First target hit: sell {quantity}, let the rest run"),
            Self::TakeAll { quantity } => format!("Second target hit: sell remaining {quantity}"),
            Self::Hold => "Hold: no rule triggered".to_string(),
        }
    }
}

/// Dollar risk allowed on a single trade.
#[must_use]
pub fn max_risk_per_trade(portfolio_value: Decimal, risk_pct: Decimal) -> Decimal {
    (portfolio_value * risk_pct / Decimal::ONE_HUNDRED).max(Decimal::ZERO)
}

/// Whole contracts affordable within the per-trade risk budget.
#[must_use]
pub fn max_contracts(portfolio_value: Decimal, risk_pct: Decimal, premium: Decimal) -> u32 {
    let per_contract = premium * Decimal::ONE_HUNDRED;
    if per_contract <= Decimal::ZERO {
        return 0;
    }
    let n = (max_risk_per_trade(portfolio_value, risk_pct) / per_contract).floor();
    n.to_u32().unwrap_or(u32::MAX)
}

/// Premium level at which to cut the trade.
#[must_use]
pub fn stop_loss_price(entry: Decimal, loss_pct: Decimal) -> Decimal {
    entry * (Decimal::ONE_HUNDRED - loss_pct) / Decimal::ONE_HUNDRED
}

/// Premium levels for the two profit targets.
#[must_use]
pub fn profit_targets(entry: Decimal, rules: &RiskRules) -> (Decimal, Decimal) {
    let at = |pct: Decimal| entry * (Decimal::ONE_HUNDRED + pct) / Decimal::ONE_HUNDRED;
    (at(rules.take_half_pct), at(rules.take_all_pct))
}

/// Premium P&L in percent of entry.
fn pnl_pct(entry: Decimal, current: Decimal) -> Decimal {
    if entry.is_zero() {
        return Decimal::ZERO;
    }
    (current - entry) / entry * Decimal::ONE_HUNDRED
}

/// Walk the stop and target rules for a long option position.
#[must_use]
pub fn check_exit(entry: Decimal, current: Decimal, quantity: u32, rules: &RiskRules) -> ExitAction {
    if quantity == 0 {
        return ExitAction::Hold;
    }
    let pnl = pnl_pct(entry, current);

    if -pnl >= rules.stop_loss_pct {
        tracing::debug!(pnl_pct = %pnl, threshold = %rules.stop_loss_pct, "Stop loss triggered");
        return ExitAction::StopLoss { quantity };
    }

    if pnl >= rules.take_all_pct {
        tracing::debug!(pnl_pct = %pnl, "Second profit target hit");
        return ExitAction::TakeAll { quantity };
    }

    // A single contract cannot be halved; it rides to the second target.
    if pnl >= rules.take_half_pct && quantity > 1 {
        tracing::debug!(pnl_pct = %pnl, sell_quantity = quantity / 2, "First profit target hit");
        return ExitAction::TakeHalf {
            quantity: quantity / 2,
        };
    }

    ExitAction::Hold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizing_matches_ten_thousand_dollar_example() {
        assert_eq!(max_risk_per_trade(dec!(10000), dec!(2)), dec!(200));
        assert_eq!(max_risk_per_trade(dec!(10000), dec!(1)), dec!(100));
        // $200 budget, $2.00 premium = $200 per contract
        assert_eq!(max_contracts(dec!(10000), dec!(2), dec!(2)), 1);
        assert_eq!(max_contracts(dec!(10000), dec!(2), dec!(0.50)), 4);
        assert_eq!(max_contracts(dec!(10000), dec!(2), dec!(5)), 0);
        assert_eq!(max_contracts(dec!(10000), dec!(2), dec!(0)), 0);
    }

    #[test]
    fn stop_and_targets_from_entry() {
        assert_eq!(stop_loss_price(dec!(3.00), dec!(50)), dec!(1.50));
        let (half, all) = profit_targets(dec!(3.00), &RiskRules::default());
        assert_eq!(half, dec!(4.50));
        assert_eq!(all, dec!(6.00));
    }

    #[test]
    fn stop_loss_triggers_at_threshold() {
        let rules = RiskRules::default();
        assert_eq!(
            check_exit(dec!(3.00), dec!(1.50), 2, &rules),
            ExitAction::StopLoss { quantity: 2 }
        );
        assert_eq!(check_exit(dec!(3.00), dec!(1.60), 2, &rules), ExitAction::Hold);
    }

    #[test]
    fn first_target_sells_half() {
        let rules = RiskRules::default();
        assert_eq!(
            check_exit(dec!(3.00), dec!(4.80), 4, &rules),
            ExitAction::TakeHalf { quantity: 2 }
        );
        // One contract holds through the first target.
        assert_eq!(check_exit(dec!(3.00), dec!(4.80), 1, &rules), ExitAction::Hold);
    }

    #[test]
    fn second_target_closes_all() {
        let rules = RiskRules::default();
        assert_eq!(
            check_exit(dec!(3.00), dec!(6.60), 3, &rules),
            ExitAction::TakeAll { quantity: 3 }
        );
    }

    #[test]
    fn empty_position_holds() {
        assert_eq!(
            check_exit(dec!(3.00), dec!(0.10), 0, &RiskRules::default()),
            ExitAction::Hold
        );
    }
}
