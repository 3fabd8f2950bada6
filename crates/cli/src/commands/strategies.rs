//! `options-lab strategies`: greeks, income and hedging strategies, paper
//! trading and risk management.
//!
//! ## Example Usage
//!
//! ```bash
//! # Menu
//! options-lab strategies
//!
//! # Covered call walkthrough on another stock
//! options-lab strategies --lesson 2 --symbol MSFT
//! ```
//!
//! Orders are only ever sent to the paper endpoint; the client refuses them
//! when `alpaca.paper` is false.

use anyhow::Result;
use clap::Args;
use options_lab_alpaca::{parse_occ_symbol, AlpacaError};
use options_lab_core::chain::{ChainFilter, ATM_SEARCH_PCT};
use options_lab_core::report::{money, money_grouped, signed_pct, Report};
use options_lab_core::risk::{
    check_exit, max_contracts, max_risk_per_trade, profit_targets, stop_loss_price,
};
use options_lab_core::strategies::{
    estimate_covered_call_premium, estimate_protective_put_premium, resolve_premium,
    PremiumSource,
};
use options_lab_core::{
    AppConfig, Broker, CoveredCall, OptionContract, OptionRight, OptionSnapshot, OptionsChain,
    OrderSide, ProtectivePut,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{info, warn};

use super::{example_window, LessonContext};
use crate::prompt;

/// Distance from the money (dollars) for the greeks ITM/OTM examples.
const GREEKS_EXAMPLE_BAND: Decimal = Decimal::TEN;

/// Strikes shown in the covered call and protective put tables.
const STRIKES_SHOWN: usize = 5;

/// Portfolio used for the worked sizing numbers.
const EXAMPLE_PORTFOLIO: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Premium used for the worked contract count.
const EXAMPLE_SIZING_PREMIUM: Decimal = Decimal::TWO;

/// Contracts in the worked exit ladder.
const EXAMPLE_LADDER_QTY: u32 = 4;

/// Arguments for the strategies command.
#[derive(Args, Debug, Clone)]
pub struct StrategiesArgs {
    /// Lesson to run (1-7, 7 runs the educational ones); shows the menu when omitted
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=7))]
    pub lesson: Option<u8>,

    /// Underlying for every lesson (defaults to lessons.symbol and lessons.strategy_symbol)
    #[arg(short, long)]
    pub symbol: Option<String>,
}

const MENU: &str = "
Choose a lesson:

1. The Greeks (Delta, Theta, Vega, Gamma)
2. Covered Call Strategy
3. Protective Put Strategy
4. Place a Paper Trade
5. View Your Positions
6. Risk Management
7. Run All Educational Lessons (1, 2, 3, 6)
0. Exit
";

pub async fn run(args: StrategiesArgs, ctx: LessonContext<'_>, broker: &dyn Broker) -> Result<()> {
    let lessons = &ctx.config.lessons;
    let pick = |default: &str| {
        args.symbol
            .as_deref()
            .map_or_else(|| default.to_string(), str::to_uppercase)
    };
    let symbol = pick(&lessons.symbol);
    let strategy_symbol = pick(&lessons.strategy_symbol);

    let choice = match args.lesson {
        Some(n) => n.to_string(),
        None => {
            let mut header = Report::new();
            header
                .blank()
                .double_rule()
                .centered("ADVANCED OPTIONS TRADING STRATEGIES")
                .double_rule();
            print!("{}{MENU}", header.finish());
            prompt::ask("\nEnter your choice (0-7): ")?
        }
    };

    match choice.as_str() {
        "1" => print!("{}", greeks(ctx, &symbol).await?),
        "2" => print!("{}", covered_call(ctx, &strategy_symbol).await?),
        "3" => print!("{}", protective_put(ctx, &strategy_symbol).await?),
        "4" => paper_trade(ctx, broker, &symbol).await?,
        "5" => print!("{}", positions(ctx.config, broker).await?),
        "6" => print!("{}", risk_management(ctx.config)),
        "7" => {
            print!("{}", greeks(ctx, &symbol).await?);
            prompt::pause("Press Enter for next lesson...")?;
            print!("{}", covered_call(ctx, &strategy_symbol).await?);
            prompt::pause("Press Enter for next lesson...")?;
            print!("{}", protective_put(ctx, &strategy_symbol).await?);
            prompt::pause("Press Enter for next lesson...")?;
            print!("{}", risk_management(ctx.config));
        }
        "0" => println!("Happy learning! Remember: paper trade first!"),
        _ => println!("Invalid choice."),
    }
    Ok(())
}

/// Greeks primer with one ITM, ATM and OTM call from the front expiry.
pub async fn greeks(ctx: LessonContext<'_>, symbol: &str) -> Result<String> {
    info!(symbol, "Greeks lesson");
    let mut r = Report::new();
    r.banner("LESSON: THE GREEKS - Measuring Option Risk");
    r.text(GREEKS_PRIMER);

    let price = ctx.current_price(symbol).await?;
    let window = example_window(price);
    let filter = ChainFilter::expiring_within(ctx.today, ctx.config.lessons.days_to_expiry)
        .with_right(OptionRight::Call)
        .with_strikes(Some(price - window), Some(price + window))
        .with_limit(200);
    let chain = ctx.snapshot_chain(symbol, price, &filter).await?;

    r.blank().line(format!("REAL EXAMPLES ({symbol} at {}):", money(price)));
    let Some(expiry) = chain.expirations().first().copied() else {
        r.line("No call options found near the current price.");
        return Ok(r.finish());
    };
    let front = OptionsChain::new(
        symbol,
        price,
        chain
            .side(OptionRight::Call, Some(expiry))
            .into_iter()
            .cloned()
            .collect(),
    );
    r.line(format!("Calls expiring {expiry}")).blank();
    r.line(format!(
        "{:<12} {:<10} {:<14} {}",
        "Type", "Strike", "Delta", "Behavior"
    ));
    r.rule();

    let examples = [
        (
            "ITM Call",
            front.first_itm_example(OptionRight::Call, GREEKS_EXAMPLE_BAND),
            "~0.70-0.90",
            "Moves almost like the stock",
        ),
        (
            "ATM Call",
            front.atm(OptionRight::Call, None),
            "~0.50",
            "Moves about half as much as the stock",
        ),
        (
            "OTM Call",
            front.first_otm_example(OptionRight::Call, GREEKS_EXAMPLE_BAND),
            "~0.10-0.30",
            "Small moves, mostly time value",
        ),
    ];
    for (label, example, typical, behavior) in examples {
        let Some(example) = example else {
            r.line(format!("{label:<12} (none listed in this window)"));
            continue;
        };
        let delta = example
            .greeks
            .map_or_else(|| typical.to_string(), |g| format!("{:.2}", g.delta));
        r.line(format!(
            "{:<12} {:<10} {:<14} {}",
            label,
            money(example.contract.strike),
            delta,
            behavior
        ));
    }
    r.blank()
        .line("Deltas are the provider's when quoted, otherwise typical ranges (marked ~).");
    Ok(r.finish())
}

fn premium_for(option: &OptionSnapshot, estimate: Decimal) -> (Decimal, PremiumSource) {
    resolve_premium(option.premium(), estimate)
}

/// Covered call walkthrough on the furthest expiry inside the lesson window.
pub async fn covered_call(ctx: LessonContext<'_>, symbol: &str) -> Result<String> {
    info!(symbol, "Covered call lesson");
    let mut r = Report::new();
    r.banner("STRATEGY: COVERED CALL (Income Generation)");
    r.text(COVERED_CALL_INTRO);

    let price = ctx.current_price(symbol).await?;
    let filter = ChainFilter::expiring_within(ctx.today, ctx.config.lessons.days_to_expiry)
        .with_right(OptionRight::Call)
        .with_strikes(Some(price), Some(price * dec!(1.15)))
        .with_limit(200);
    let chain = ctx.snapshot_chain(symbol, price, &filter).await?;

    r.blank().line(format!("Current {symbol} Price: {}", money(price)));
    let Some(expiry) = chain.expirations().last().copied() else {
        r.line("No call options found above the current price.");
        return Ok(r.finish());
    };
    let days = (expiry - ctx.today).num_days();
    let calls: Vec<&OptionSnapshot> = chain
        .side(OptionRight::Call, Some(expiry))
        .into_iter()
        .filter(|o| o.contract.strike > price)
        .take(STRIKES_SHOWN)
        .collect();
    let Some(first) = calls.first() else {
        r.line("No call options found above the current price.");
        return Ok(r.finish());
    };

    r.blank().line(format!("Calls to sell, expiring {expiry} ({days} days):"));
    r.line(format!(
        "{:<10} {:<18} {:<12} {:<12} {:<10} {}",
        "Strike", "Distance", "Premium", "Max Profit", "If Called", "Annualized"
    ));
    r.rule();
    let mut estimated = false;
    for call in &calls {
        let strike = call.contract.strike;
        let (premium, source) = premium_for(call, estimate_covered_call_premium(price, strike));
        estimated |= source == PremiumSource::Estimated;
        let cc = CoveredCall::new(price, strike, premium);
        let distance = format!(
            "+{} ({:.1}%)",
            money(strike - price),
            ((strike - price) / price * dec!(100)).round_dp(1)
        );
        let annualized = cc
            .annualized_return_pct(days)
            .map_or_else(|| "n/a".to_string(), |p| format!("{:.1}%", p.round_dp(1)));
        r.line(format!(
            "{:<10} {:<18} {:<12} {:<12} {:<10} {}",
            money(strike),
            distance,
            format!("{}{}", source.marker(), money(cc.premium_income())),
            money(cc.max_profit()),
            format!("{:.1}%", cc.return_if_called_pct().round_dp(1)),
            annualized
        ));
    }
    if estimated {
        r.line("~ = estimated premium (no live quote for that strike)");
    }

    let strike = first.contract.strike;
    let (premium, source) = premium_for(first, estimate_covered_call_premium(price, strike));
    let cc = CoveredCall::new(price, strike, premium);
    let marker = source.marker();

    r.blank().line("EXAMPLE TRADE:");
    r.line(format!(
        "Step 1: Buy 100 shares of {symbol} at {} = {}",
        money(price),
        money_grouped(cc.stock_cost())
    ));
    r.line(format!(
        "Step 2: Sell 1 {} call, collect {marker}{} premium",
        money(strike),
        money(cc.premium_income())
    ));
    r.line(format!(
        "Breakeven: {} (purchase price minus premium)",
        money(cc.breakeven())
    ));
    r.line(format!(
        "Max profit if called: {}{} ({:.1}%)",
        marker,
        money(cc.max_profit()),
        cc.return_if_called_pct().round_dp(1)
    ));

    r.blank().line("SCENARIOS AT EXPIRATION:");
    r.line(format!(
        "{:<20} {:<12} {:<14} {}",
        "Scenario", "Stock Price", "Total P/L", "Result"
    ));
    r.rule();
    for (label, at, outcome) in cc.scenarios() {
        r.line(format!(
            "{:<20} {:<12} {:<14} {}",
            label,
            money(at),
            money(cc.pnl_at(at)),
            outcome.describe()
        ));
    }

    r.blank().text(COVERED_CALL_NOTES);
    Ok(r.finish())
}

/// Protective put walkthrough on the furthest expiry inside the window.
pub async fn protective_put(ctx: LessonContext<'_>, symbol: &str) -> Result<String> {
    info!(symbol, "Protective put lesson");
    let mut r = Report::new();
    r.banner("STRATEGY: PROTECTIVE PUT (Portfolio Insurance)");
    r.text(PROTECTIVE_PUT_INTRO);

    let price = ctx.current_price(symbol).await?;
    let filter = ChainFilter::expiring_within(ctx.today, ctx.config.lessons.protective_put_days)
        .with_right(OptionRight::Put)
        .with_strikes(Some(price * dec!(0.85)), Some(price))
        .with_limit(200);
    let chain = ctx.snapshot_chain(symbol, price, &filter).await?;

    r.blank().line(format!("Current {symbol} Price: {}", money(price)));
    let Some(expiry) = chain.expirations().last().copied() else {
        r.line("No put options found below the current price.");
        return Ok(r.finish());
    };
    let days = (expiry - ctx.today).num_days();
    let mut puts: Vec<&OptionSnapshot> = chain
        .side(OptionRight::Put, Some(expiry))
        .into_iter()
        .filter(|o| o.contract.strike < price)
        .collect();
    puts.reverse();
    puts.truncate(STRIKES_SHOWN);
    let Some(example) = puts.get(2).or_else(|| puts.last()).copied() else {
        r.line("No put options found below the current price.");
        return Ok(r.finish());
    };

    r.blank().line(format!("Puts to buy, expiring {expiry} ({days} days):"));
    r.line(format!(
        "{:<10} {:<14} {:<12} {}",
        "Strike", "Protection", "Cost", "Max Loss"
    ));
    r.rule();
    let mut estimated = false;
    for put in &puts {
        let strike = put.contract.strike;
        let (premium, source) =
            premium_for(put, estimate_protective_put_premium(price, strike, days));
        estimated |= source == PremiumSource::Estimated;
        let pp = ProtectivePut::new(price, strike, premium);
        r.line(format!(
            "{:<10} {:<14} {:<12} {} ({:.1}%)",
            money(strike),
            format!("{:.1}% below", pp.protection_depth_pct().round_dp(1)),
            format!("{}{}", source.marker(), money(pp.insurance_cost())),
            money(pp.max_loss()),
            pp.max_loss_pct().round_dp(1)
        ));
    }
    if estimated {
        r.line("~ = estimated premium (no live quote for that strike)");
    }

    let strike = example.contract.strike;
    let (premium, source) =
        premium_for(example, estimate_protective_put_premium(price, strike, days));
    let pp = ProtectivePut::new(price, strike, premium);
    let marker = source.marker();

    r.blank().line("EXAMPLE:");
    r.line(format!(
        "Own 100 shares of {symbol} at {} = {}",
        money(price),
        money_grouped(pp.position_value())
    ));
    r.line(format!(
        "Buy 1 {} put for {marker}{}",
        money(strike),
        money(pp.insurance_cost())
    ));

    r.blank().line("SCENARIOS AT EXPIRATION:");
    r.line(format!(
        "{:<24} {:<12} {:<12} {:<12} {}",
        "Scenario", "Stock Price", "Stock P/L", "Put Value", "Net P/L"
    ));
    r.rule();
    for (label, at, pnl) in pp.scenarios() {
        r.line(format!(
            "{:<24} {:<12} {:<12} {:<12} {}",
            label,
            money(at),
            money(pnl.stock_pnl),
            money(pnl.put_value),
            money(pnl.net_pnl)
        ));
    }

    r.blank().line("KEY INSIGHTS:");
    r.line(format!(
        "1. Maximum loss: {marker}{} ({:.1}%) no matter how far {symbol} falls",
        money(pp.max_loss()),
        pp.max_loss_pct().round_dp(1)
    ));
    r.line(format!(
        "2. Without the put you could lose the full {}",
        money_grouped(pp.position_value())
    ));
    let per_day = pp
        .cost_per_day(days)
        .map_or_else(|| "n/a".to_string(), money);
    r.line(format!(
        "3. Insurance cost: {marker}{} for {days} days ({per_day} per day)",
        money(pp.insurance_cost())
    ));
    r.line(format!(
        "4. Breakeven: {} (stock must rise to cover the put)",
        money(pp.breakeven())
    ));

    r.blank().text(PROTECTIVE_PUT_NOTES);
    Ok(r.finish())
}

/// Paper trade report plus the contract that would be bought.
#[derive(Debug)]
pub struct TradeSetup {
    pub report: String,
    pub contract: Option<OptionContract>,
}

/// Account overview and a one-contract ATM call setup.
pub async fn paper_trade_setup(
    ctx: LessonContext<'_>,
    broker: &dyn Broker,
    symbol: &str,
) -> Result<TradeSetup> {
    info!(symbol, "Paper trade setup");
    let mut r = Report::new();
    r.banner("PAPER TRADING: Your First Options Trade");

    let account = broker.account().await?;
    r.line(format!("Account Status: {}", account.status));
    r.line(format!("Buying Power: {}", money_grouped(account.buying_power)));
    r.line(format!("Cash: {}", money_grouped(account.cash)));
    if let Some(level) = account.options_trading_level {
        r.line(format!("Options Trading Level: {level}"));
    }
    if !ctx.config.alpaca.paper {
        r.blank()
            .line("WARNING: alpaca.paper is false. Orders will be refused; switch to paper trading to practice.");
    }

    let price = ctx.current_price(symbol).await?;
    let filter = ChainFilter::expiring_within(ctx.today, ctx.config.lessons.days_to_expiry)
        .with_right(OptionRight::Call)
        .near_price(price, ATM_SEARCH_PCT)
        .with_limit(100);
    let chain = ctx.snapshot_chain(symbol, price, &filter).await?;

    let Some(atm) = chain.atm(OptionRight::Call, None) else {
        r.blank().line("No call options found near the current price.");
        return Ok(TradeSetup {
            report: r.finish(),
            contract: None,
        });
    };

    r.blank().rule().line("TRADE SETUP:").rule();
    r.line("Strategy: Buy 1 ATM Call (bullish bet)");
    r.line(format!("Underlying: {symbol} at {}", money(price)));
    r.line(format!("Contract: {}", atm.contract.symbol));
    r.line(format!("Strike: {}", money(atm.contract.strike)));
    r.line(format!(
        "Expiration: {} ({} days)",
        atm.contract.expiry,
        atm.contract.days_to_expiry(ctx.today)
    ));
    match atm.premium() {
        Some(p) => {
            r.line(format!(
                "Quoted premium: {} (about {} for 1 contract)",
                money(p),
                money(p * atm.contract.multiplier)
            ));
            if let (Some(bid), Some(ask)) = (atm.bid, atm.ask) {
                r.line(format!("Bid/Ask: {} / {}", money(bid), money(ask)));
            }
        }
        None => {
            r.line("No live quote; a market order fills at whatever the market offers.");
        }
    }
    r.line("Max loss: the premium paid");
    r.blank().text(PAPER_NOTICE);

    Ok(TradeSetup {
        report: r.finish(),
        contract: Some(atm.contract.clone()),
    })
}

/// Submit one market buy and describe what happened.
pub async fn submit_paper_trade(broker: &dyn Broker, contract: &OptionContract) -> String {
    let mut r = Report::new();
    match broker
        .submit_market_order(&contract.symbol, Decimal::ONE, OrderSide::Buy)
        .await
    {
        Ok(order) => {
            info!(order_id = %order.id, symbol = %order.symbol, "Paper order submitted");
            r.blank().line("ORDER SUBMITTED!");
            r.line(format!("Order ID: {}", order.id));
            r.line(format!("Status: {}", order.status));
            r.line(format!("Symbol: {}", order.symbol));
            r.line(format!("Quantity: {}", order.qty.normalize()));
            r.line(format!("Side: {}", order.side));
            r.blank().text(AFTER_ORDER);
        }
        Err(e) => {
            warn!(error = %e, "Paper order failed");
            r.blank().line(format!("Error placing order: {e}"));
            r.blank().line("Common issues:");
            let hints = match e.downcast_ref::<AlpacaError>() {
                Some(alpaca) => alpaca.hint(),
                None => vec![
                    "Market is closed (options trade 9:30 AM - 4:00 PM ET)",
                    "Insufficient buying power",
                    "Options trading not enabled on account",
                ],
            };
            for hint in hints {
                r.line(format!("- {hint}"));
            }
        }
    }
    r.finish()
}

async fn paper_trade(ctx: LessonContext<'_>, broker: &dyn Broker, symbol: &str) -> Result<()> {
    let setup = paper_trade_setup(ctx, broker, symbol).await?;
    print!("{}", setup.report);
    let Some(contract) = setup.contract else {
        return Ok(());
    };

    let answer = prompt::ask("\nProceed with paper trade? (yes/no): ")?;
    if prompt::is_yes(&answer) {
        print!("{}", submit_paper_trade(broker, &contract).await);
    } else {
        println!("\nTrade cancelled. Good decision to be cautious!");
    }
    Ok(())
}

/// Open positions with their exit-rule status, then open orders.
pub async fn positions(config: &AppConfig, broker: &dyn Broker) -> Result<String> {
    let mut r = Report::new();
    r.banner("YOUR CURRENT POSITIONS");

    let positions = broker.positions().await?;
    if positions.is_empty() {
        r.line("No open positions.");
    } else {
        r.line(format!(
            "{:<22} {:>6} {:>11} {:>11}  {}",
            "Symbol", "Qty", "Avg Entry", "Current", "P/L"
        ));
        r.rule();
        for p in &positions {
            r.line(format!(
                "{:<22} {:>6} {:>11} {:>11}  {} ({})",
                p.symbol,
                p.qty.normalize(),
                money(p.avg_entry_price),
                money(p.current_price),
                money(p.unrealized_pl),
                signed_pct(p.pnl_pct())
            ));
        }

        r.blank().line(format!(
            "EXIT RULES (stop at -{}%, half at +{}%, all at +{}%):",
            config.risk.stop_loss_pct.normalize(),
            config.risk.take_half_pct.normalize(),
            config.risk.take_all_pct.normalize()
        ));
        // The ladder is for long options; stock rows have no exit rule.
        let long_options = positions
            .iter()
            .filter(|p| p.qty > Decimal::ZERO && parse_occ_symbol(&p.symbol).is_ok());
        for p in long_options {
            let qty = p.qty.trunc().to_u32().unwrap_or(0);
            let action = check_exit(p.avg_entry_price, p.current_price, qty, &config.risk);
            r.line(format!("  {}: {}", p.symbol, action.describe()));
        }
    }

    let orders = broker.open_orders().await?;
    r.blank().line("OPEN ORDERS:");
    if orders.is_empty() {
        r.line("No open orders.");
    } else {
        for o in &orders {
            r.line(format!(
                "  {:<22} {:<5} {:>4}  {}",
                o.symbol,
                o.side,
                o.qty.normalize(),
                o.status
            ));
        }
    }
    Ok(r.finish())
}

/// The risk rules with worked numbers from the configured thresholds.
#[must_use]
pub fn risk_management(config: &AppConfig) -> String {
    let rules = &config.risk;
    let low = max_risk_per_trade(EXAMPLE_PORTFOLIO, Decimal::ONE);
    let high = max_risk_per_trade(EXAMPLE_PORTFOLIO, rules.max_risk_pct);
    let contracts = max_contracts(EXAMPLE_PORTFOLIO, rules.max_risk_pct, EXAMPLE_SIZING_PREMIUM);
    let entry = config.lessons.example_premium;
    let stop = stop_loss_price(entry, rules.stop_loss_pct);
    let (half, all) = profit_targets(entry, rules);

    let mut r = Report::new();
    r.banner("RISK MANAGEMENT: The Most Important Lesson");

    r.line("1. POSITION SIZING");
    r.line(format!(
        "   Never risk more than 1-{}% of your portfolio on a single trade",
        rules.max_risk_pct.normalize()
    ));
    r.line(format!("   Example: {} portfolio", money_grouped(EXAMPLE_PORTFOLIO)));
    r.line(format!("   - Max risk per trade: {}-{}", money(low), money(high)));
    r.line(format!(
        "   - Buying {} options ({} per contract): max {contracts} contract(s)",
        money(EXAMPLE_SIZING_PREMIUM),
        money(EXAMPLE_SIZING_PREMIUM * dec!(100))
    ));

    r.blank().text(DIVERSIFICATION);

    r.blank().line("3. STOP LOSSES");
    r.line(format!(
        "   Exit if the option loses {}% of its value",
        rules.stop_loss_pct.normalize()
    ));
    r.line(format!("   Bought at {}: stop at {}", money(entry), money(stop)));
    r.line("   Don't hope and pray - cut losses early");

    r.blank().line("4. PROFIT TARGETS");
    r.line(format!(
        "   Sell half at +{}% ({}), the rest at +{}% ({})",
        rules.take_half_pct.normalize(),
        money(half),
        rules.take_all_pct.normalize(),
        money(all)
    ));
    r.line("   Don't be greedy - take profits");
    r.blank().line(format!(
        "   Exit ladder for {EXAMPLE_LADDER_QTY} contracts bought at {}:",
        money(entry)
    ));
    for current in [stop, entry, half, all] {
        let action = check_exit(entry, current, EXAMPLE_LADDER_QTY, rules);
        r.line(format!("   - Premium at {}: {}", money(current), action.describe()));
    }

    r.blank().text(MISTAKES_AND_PRACTICE);
    r.finish()
}

const GREEKS_PRIMER: &str = "\
The Greeks measure how an option's price responds to different factors.

DELTA: How much the option moves when the stock moves $1
  - Calls: 0 to 1.0, Puts: 0 to -1.0
  - ATM options sit near 0.50 (or -0.50 for puts)
  - Also a rough probability of finishing in the money

THETA: How much value the option loses each day
  - Always negative for option buyers
  - Accelerates in the final weeks before expiry

VEGA: How much the option moves when implied volatility moves 1%
  - Higher for longer-dated and ATM options
  - Buy when volatility is low, sell when it is high

GAMMA: How fast delta changes as the stock moves
  - Highest for ATM options close to expiry
  - High gamma means fast, unpredictable swings
";

const COVERED_CALL_INTRO: &str = "\
A COVERED CALL means you own 100 shares and SELL a call against them.

How it works:
- You collect the premium immediately
- If the stock stays below the strike, you keep the premium and the shares
- If the stock rises above the strike, your shares are sold at the strike

Best for: stocks you own and expect to stay flat or rise slowly.
";

const COVERED_CALL_NOTES: &str = "\
PROS:
+ Generate income from stocks you already own
+ Premium cushions small drops in the stock
+ Can be repeated every month

CONS:
- Upside is capped at the strike
- Still exposed to large drops in the stock
- Shares may be called away
";

const PROTECTIVE_PUT_INTRO: &str = "\
A PROTECTIVE PUT means you own 100 shares and BUY a put to limit losses.

How it works:
- The put gives you the right to sell at the strike
- If the stock crashes, the put gains value and offsets the loss
- If the stock rises, you keep the upside minus the cost of the put

Best for: protecting gains or holding through uncertain events.
";

const PROTECTIVE_PUT_NOTES: &str = "\
PROS:
+ Losses are capped no matter how far the stock falls
+ You keep all the upside above the breakeven
+ Peace of mind through earnings and market shocks

CONS:
- The insurance costs money and expires
- Constant protection gets expensive
- Deeper protection (higher strike) costs more
";

const PAPER_NOTICE: &str = "\
This is a PAPER TRADE - no real money is at risk.
Use it to practice order entry and to watch how premiums move.
";

const AFTER_ORDER: &str = "\
What to do next:
1. Check the position with lesson 5 (View Your Positions)
2. Watch how the premium moves with the stock
3. Decide your exit before the premium halves or doubles
";

const DIVERSIFICATION: &str = "\
2. DIVERSIFICATION
   Don't put all your money in one trade
   Spread across different stocks and strategies
   Mix short-term and long-term expirations
";

const MISTAKES_AND_PRACTICE: &str = "\
5. AVOID COMMON MISTAKES
   - Buying cheap far-OTM options hoping for a jackpot
   - Holding through expiration without a plan
   - Trading illiquid options with wide bid/ask spreads
   - Risking money you can't afford to lose

6. PAPER TRADE FIRST
   Practice for at least 1-3 months
   Track every trade and review what worked
   Only use real money after consistent paper results
";
