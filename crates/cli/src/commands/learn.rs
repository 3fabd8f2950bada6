//! `options-lab learn`: the five basics lessons.
//!
//! ## Example Usage
//!
//! ```bash
//! # Menu
//! options-lab learn
//!
//! # One lesson against another underlying
//! options-lab learn --lesson 2 --symbol QQQ
//! ```

use anyhow::Result;
use chrono::Duration;
use clap::Args;
use options_lab_core::chain::{ChainFilter, StrikeRow, ATM_SEARCH_PCT};
use options_lab_core::pricing::{
    intrinsic_value, long_call_scenarios, long_option_breakeven, long_put_scenarios,
    Moneyness, PayoffScenario, ValueBreakdown,
};
use options_lab_core::report::{money, Report};
use options_lab_core::{OptionRight, OptionSnapshot, OptionsChain};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;

use super::LessonContext;
use crate::prompt;

/// Strike window for the moneyness lesson, as a fraction of price.
const MONEYNESS_WINDOW_PCT: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Days past each decay horizon searched for a listed expiration.
const HORIZON_SLACK_DAYS: i64 = 7;

/// Arguments for the learn command.
#[derive(Args, Debug, Clone)]
pub struct LearnArgs {
    /// Lesson to run (1-6, 6 runs them all); shows the menu when omitted
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=6))]
    pub lesson: Option<u8>,

    /// Underlying to learn with (defaults to lessons.symbol)
    #[arg(short, long)]
    pub symbol: Option<String>,
}

const MENU: &str = "
Choose a lesson:

1. Exploring the Options Chain
2. Understanding Call Options
3. Understanding Put Options
4. ITM vs ATM vs OTM
5. Time Decay (Theta)
6. Run All Lessons
0. Exit
";

pub async fn run(args: LearnArgs, ctx: LessonContext<'_>) -> Result<()> {
    let symbol = args
        .symbol
        .map(|s| s.to_uppercase())
        .unwrap_or_else(|| ctx.config.lessons.symbol.clone());

    let choice = match args.lesson {
        Some(n) => n.to_string(),
        None => {
            let mut header = Report::new();
            header
                .blank()
                .double_rule()
                .centered("OPTIONS TRADING LEARNING PROGRAM")
                .centered(format!("Using {symbol} as example"))
                .double_rule();
            print!("{}{MENU}", header.finish());
            prompt::ask("\nEnter your choice (0-6): ")?
        }
    };

    match choice.as_str() {
        "1" => print!("{}", options_chain(ctx, &symbol).await?),
        "2" => print!("{}", long_option(ctx, &symbol, OptionRight::Call).await?),
        "3" => print!("{}", long_option(ctx, &symbol, OptionRight::Put).await?),
        "4" => print!("{}", moneyness(ctx, &symbol).await?),
        "5" => print!("{}", time_decay(ctx, &symbol).await?),
        "6" => run_all(ctx, &symbol).await?,
        "0" => println!("Happy learning! Remember: paper trade first!"),
        _ => println!("Invalid choice."),
    }
    Ok(())
}

async fn run_all(ctx: LessonContext<'_>, symbol: &str) -> Result<()> {
    print!("{}", options_chain(ctx, symbol).await?);
    prompt::pause("Press Enter to continue to Lesson 2...")?;
    print!("{}", long_option(ctx, symbol, OptionRight::Call).await?);
    prompt::pause("Press Enter to continue to Lesson 3...")?;
    print!("{}", long_option(ctx, symbol, OptionRight::Put).await?);
    prompt::pause("Press Enter to continue to Lesson 4...")?;
    print!("{}", moneyness(ctx, symbol).await?);
    prompt::pause("Press Enter to continue to Lesson 5...")?;
    print!("{}", time_decay(ctx, symbol).await?);
    print!("{}", congratulations());
    Ok(())
}

/// Lesson 1: a side-by-side chain for the nearest expiration.
pub async fn options_chain(ctx: LessonContext<'_>, symbol: &str) -> Result<String> {
    info!(symbol, "Lesson 1: options chain");
    let lessons = &ctx.config.lessons;
    let mut r = Report::new();
    r.banner(format!("LESSON 1: Exploring Options Chain for {symbol}"));

    let price = ctx.current_price(symbol).await?;
    r.line(format!("Current {symbol} price: {}", money(price))).blank();

    let filter = ChainFilter::expiring_within(ctx.today, lessons.days_to_expiry)
        .near_price(price, ATM_SEARCH_PCT)
        .with_limit(100);
    let chain = ctx.contract_chain(symbol, price, &filter).await?;
    let grouped = chain.by_expiry();
    let Some((expiry, slice)) = grouped.iter().next() else {
        r.line("No options found. Check if options trading is enabled for your account.");
        return Ok(r.finish());
    };

    r.line(format!("Options expiring on: {expiry}"));
    r.line(format!("Days until expiration: {}", (*expiry - ctx.today).num_days()));
    r.blank().rule();
    r.line(format!("{:^39} | {:^39}", "CALLS", "PUTS"));
    r.line(format!(
        "{:<10} {:<28} | {:<10} {:<28}",
        "Strike", "Symbol", "Strike", "Symbol"
    ));
    r.rule();
    for row in slice.rows_around(price, lessons.chain_rows) {
        r.line(chain_row(&chain, &row, lessons.atm_band));
    }
    r.blank()
        .line("* = Near current price (ATM - At The Money)")
        .blank()
        .line("Key Insight: Options near the current price (ATM) are most actively traded");
    Ok(r.finish())
}

fn chain_row(chain: &OptionsChain, row: &StrikeRow<'_>, band: Decimal) -> String {
    let mark = if chain.is_near_price(row.strike, band) { "*" } else { " " };
    let cell = |side: Option<&OptionSnapshot>| match side {
        Some(o) => format!("{mark}{:<9} {:<28}", money(o.contract.strike), o.contract.symbol),
        None => format!("{:<38}", ""),
    };
    format!("{} | {}", cell(row.call), cell(row.put))
}

/// Lessons 2 and 3: one long call or put, its quote and expiry payoffs.
pub async fn long_option(
    ctx: LessonContext<'_>,
    symbol: &str,
    right: OptionRight,
) -> Result<String> {
    let lessons = &ctx.config.lessons;
    let (number, title, name) = match right {
        OptionRight::Call => (2, "CALL OPTIONS (The Right to BUY)", "Call"),
        OptionRight::Put => (3, "PUT OPTIONS (The Right to SELL)", "Put"),
    };
    info!(symbol, lesson = number, "Long option lesson");

    let mut r = Report::new();
    r.banner(format!("LESSON {number}: {title}"));
    r.text(match right {
        OptionRight::Call => CALL_INTRO,
        OptionRight::Put => PUT_INTRO,
    });

    let price = ctx.current_price(symbol).await?;
    let filter = ChainFilter::expiring_within(ctx.today, lessons.days_to_expiry)
        .with_right(right)
        .near_price(price, ATM_SEARCH_PCT)
        .with_limit(100);
    let chain = ctx.snapshot_chain(symbol, price, &filter).await?;

    r.blank().line(format!("Current {symbol} Price: {}", money(price)));
    let Some(atm) = chain.atm(right, None) else {
        r.line(format!("No {} options found near {}.", name.to_lowercase(), money(price)));
        return Ok(r.finish());
    };
    let strike = atm.contract.strike;
    let days = atm.contract.days_to_expiry(ctx.today);

    r.blank().line(format!("Example ATM {name} Option:"));
    r.line(format!("  Symbol: {}", atm.contract.symbol));
    r.line(format!("  Strike Price: {}", money(strike)));
    r.line(format!("  Expiration: {} ({days} days)", atm.contract.expiry));

    if let Some(quoted) = atm.premium() {
        let b = ValueBreakdown::compute(
            right,
            price,
            strike,
            quoted,
            days,
            lessons.moneyness_tolerance,
        );
        r.blank().line("LIVE QUOTE BREAKDOWN:");
        r.line(format!(
            "  Premium: {} per share ({} per contract)",
            money(quoted),
            money(quoted * atm.contract.multiplier)
        ));
        if let (Some(bid), Some(ask)) = (atm.bid, atm.ask) {
            r.line(format!("  Bid/Ask: {} / {}", money(bid), money(ask)));
        }
        r.line(format!("  Intrinsic value: {}", money(b.intrinsic)));
        r.line(format!("  Time value: {}", money(b.time_value)));
        r.line(format!("  Moneyness: {}", b.moneyness.label()));
        if let Some(theta) = b.theta_per_day {
            r.line(format!("  Naive decay: ~{} per day if it fell evenly to expiry", money(theta)));
        }
        if let Some(iv) = atm.implied_volatility {
            r.line(format!("  Implied volatility: {:.1}%", iv * 100.0));
        }
        if let Some(g) = atm.greeks {
            r.line(format!("  Delta: {:.2}  Theta: {:.3}", g.delta, g.theta));
        }
    } else {
        r.blank().line("(No live quote for this contract right now; using the example premium below.)");
    }

    let premium = lessons.example_premium;
    let breakeven = long_option_breakeven(right, strike, premium);
    r.blank().line(format!(
        "PROFIT/LOSS SCENARIOS (assuming premium of {} per share):",
        money(premium)
    ));
    r.line(format!(
        "Cost to buy 1 contract: {} x 100 = {}",
        money(premium),
        money(premium * dec!(100))
    ));
    r.blank().line(match right {
        OptionRight::Call => format!(
            "Breakeven = Strike + Premium = {} + {} = {}",
            money(strike),
            money(premium),
            money(breakeven)
        ),
        OptionRight::Put => format!(
            "Breakeven = Strike - Premium = {} - {} = {}",
            money(strike),
            money(premium),
            money(breakeven)
        ),
    });

    let scenarios = match right {
        OptionRight::Call => long_call_scenarios(price, strike, premium),
        OptionRight::Put => long_put_scenarios(price, strike, premium),
    };
    r.blank().line(format!(
        "{:<25} {:<12} {:<14} {:<14} {:>8}",
        "Scenario", "Stock Price", "Option Value", "Profit/Loss", "Return"
    ));
    r.rule();
    for s in &scenarios {
        r.line(scenario_row(s));
    }

    r.blank().text(match right {
        OptionRight::Call => CALL_INSIGHTS,
        OptionRight::Put => PUT_INSIGHTS,
    });
    Ok(r.finish())
}

fn scenario_row(s: &PayoffScenario) -> String {
    let pct = s
        .pnl_pct
        .map_or_else(|| "n/a".to_string(), |p| format!("{:.1}%", p.round_dp(1)));
    format!(
        "{:<25} {:<12} {:<14} {:<14} {:>8}",
        s.label,
        money(s.stock_price),
        money(s.option_value),
        money(s.pnl_per_share * dec!(100)),
        pct
    )
}

/// Lesson 4: one ITM, one ATM and one OTM call side by side.
pub async fn moneyness(ctx: LessonContext<'_>, symbol: &str) -> Result<String> {
    info!(symbol, "Lesson 4: moneyness");
    let lessons = &ctx.config.lessons;
    let mut r = Report::new();
    r.banner("LESSON 4: ITM vs ATM vs OTM");

    let price = ctx.current_price(symbol).await?;
    r.line(format!("Current {symbol} Price: {}", money(price))).blank();

    let filter = ChainFilter::expiring_within(ctx.today, lessons.days_to_expiry)
        .with_right(OptionRight::Call)
        .near_price(price, MONEYNESS_WINDOW_PCT)
        .with_limit(100);
    let chain = ctx.contract_chain(symbol, price, &filter).await?;

    let band = lessons.atm_band;
    let examples = [
        (
            "ITM (In)",
            Moneyness::Itm,
            chain.first_itm_example(OptionRight::Call, band),
        ),
        ("ATM (At)", Moneyness::Atm, chain.atm(OptionRight::Call, None)),
        (
            "OTM (Out)",
            Moneyness::Otm,
            chain.first_otm_example(OptionRight::Call, band),
        ),
    ];
    r.line(format!(
        "{:<15} {:<10} {:<20} {}",
        "Type", "Strike", "Intrinsic Value", "Typical Premium"
    ));
    r.rule();
    for (label, class, example) in examples {
        let Some(example) = example else {
            r.line(format!("{label:<15} (none listed in this window)"));
            continue;
        };
        let strike = example.contract.strike;
        let intrinsic = intrinsic_value(OptionRight::Call, price, strike);
        r.line(format!(
            "{:<15} {:<10} {:<20} {}",
            label,
            money(strike),
            money(intrinsic),
            class.typical_premium()
        ));
    }

    r.blank().text(MONEYNESS_NOTES);
    Ok(r.finish())
}

/// Lesson 5: ATM call premium at each decay horizon.
pub async fn time_decay(ctx: LessonContext<'_>, symbol: &str) -> Result<String> {
    info!(symbol, "Lesson 5: time decay");
    let lessons = &ctx.config.lessons;
    let mut r = Report::new();
    r.banner("LESSON 5: TIME DECAY (Theta)");
    r.text(DECAY_INTRO);

    let price = ctx.current_price(symbol).await?;
    r.line(format!("Comparing ATM {symbol} calls at different expirations:")).blank();
    r.line(format!(
        "{:<16} {:<10} {:<12} {:<12} {:<14}",
        "Days to Expiry", "Strike", "Premium", "Time Value", "Decay/Day"
    ));
    r.rule();

    for &horizon in &lessons.decay_horizons {
        let from = ctx.today + Duration::days(horizon);
        let mut filter = ChainFilter::expiring_on(from)
            .with_right(OptionRight::Call)
            .near_price(price, ATM_SEARCH_PCT)
            .with_limit(100);
        filter.expiration_lte = Some(from + Duration::days(HORIZON_SLACK_DAYS));

        let chain = ctx.snapshot_chain(symbol, price, &filter).await?;
        let nearest = chain.expirations().first().copied();
        let Some(atm) = nearest.and_then(|exp| chain.atm(OptionRight::Call, Some(exp))) else {
            r.line(format!("{horizon:<16} (no listed expiration)"));
            continue;
        };

        let days = atm.contract.days_to_expiry(ctx.today);
        let strike = atm.contract.strike;
        match atm.premium() {
            Some(premium) => {
                let b = ValueBreakdown::compute(
                    OptionRight::Call,
                    price,
                    strike,
                    premium,
                    days,
                    lessons.moneyness_tolerance,
                );
                let decay = b.theta_per_day.map_or_else(|| "-".to_string(), money);
                r.line(format!(
                    "{:<16} {:<10} {:<12} {:<12} {:<14}",
                    days,
                    money(strike),
                    money(premium),
                    money(b.time_value),
                    decay
                ));
            }
            None => {
                r.line(format!("{:<16} {:<10} {:<12}", days, money(strike), "no quote"));
            }
        }
    }

    r.blank().text(DECAY_INSIGHTS);
    Ok(r.finish())
}

#[must_use]
pub fn congratulations() -> String {
    let mut r = Report::new();
    r.banner("CONGRATULATIONS! You've completed the basics!");
    r.text(NEXT_STEPS);
    r.finish()
}

const CALL_INTRO: &str = "\
A CALL option gives you the RIGHT (not obligation) to BUY stock at a specific price.

Think of it like a coupon:
- You pay a small fee (premium) for a coupon
- The coupon lets you buy something at a fixed price
- If the price goes up, your coupon becomes valuable!
";

const PUT_INTRO: &str = "\
A PUT option gives you the RIGHT (not obligation) to SELL stock at a specific price.

Think of it like insurance:
- You pay a premium for protection
- If the stock price falls, you can still sell at the higher strike price
- Used to profit from price drops OR protect your stock holdings
";

const CALL_INSIGHTS: &str = "\
KEY INSIGHTS:
1. Maximum loss = Premium paid (100% of investment)
2. Maximum profit = Unlimited (stock can go up infinitely)
3. Need stock to move ABOVE breakeven to profit
4. Leverage: Small stock moves = Large % gains/losses
";

const PUT_INSIGHTS: &str = "\
KEY INSIGHTS:
1. Maximum loss = Premium paid
2. Maximum profit = Strike - Premium (if stock goes to $0)
3. Need stock to move BELOW breakeven to profit
4. Can be used as insurance for stocks you own
";

const MONEYNESS_NOTES: &str = "\
DEFINITIONS:

ITM (In The Money):
  - Call: Strike < Current Price
  - Put: Strike > Current Price
  - Has intrinsic value
  - More expensive, less risky, lower % returns

ATM (At The Money):
  - Strike ~ Current Price
  - Most time value
  - Balanced risk/reward
  - Most liquid

OTM (Out of The Money):
  - Call: Strike > Current Price
  - Put: Strike < Current Price
  - Zero intrinsic value (only time value)
  - Cheaper, more risky, higher % returns potential
  - Can expire worthless

TRADE-OFFS:
  ITM: Stock needs to move less to profit, but costs more up front
  ATM: Balanced between cost and probability
  OTM: Cheapest, but the stock needs a bigger move before expiry
";

const DECAY_INTRO: &str = "\
Options lose value over time, even if the stock price doesn't move.
This is called TIME DECAY or THETA.
";

const DECAY_INSIGHTS: &str = "\
KEY INSIGHTS:
1. Longer expiration = Higher premium (more time value)
2. Time decay accelerates as expiration approaches
3. Last 30 days: Fastest decay (theta is highest)
4. Option buyers: Time is your enemy
5. Option sellers: Time is your friend

Decay/Day spreads the time value evenly over the days left. Real decay is
slower early on and much faster in the final weeks.

Strategy Tip:
- Buying options? Choose 30-60+ days to expiration
- Selling options? Choose 30-45 days, close early
";

const NEXT_STEPS: &str = "\
Next Steps:
1. Review these concepts multiple times
2. Try paper trading with small positions
3. Learn about the Greeks (Delta, Gamma, Theta, Vega)
4. Study basic strategies (covered calls, protective puts)
5. Practice risk management

Remember: Start with paper trading and never risk more than you can afford to lose!
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{self, FakeMarket};
    use options_lab_core::AppConfig;

    fn config() -> AppConfig {
        AppConfig::default()
    }

    #[tokio::test]
    async fn chain_table_marks_the_money() {
        let market = FakeMarket::new();
        let config = config();
        let ctx = LessonContext::new(&market, &config, fixtures::today());

        let text = options_chain(ctx, "SPY").await.unwrap();
        assert!(text.contains("LESSON 1: Exploring Options Chain for SPY"));
        assert!(text.contains("Current SPY price: $450.00"));
        assert!(text.contains("Options expiring on: 2025-06-06"));
        assert!(text.contains("Days until expiration: 4"));
        assert!(text.contains("*$450.00   SPY250606C00450000"));
        assert!(text.contains(" $440.00   SPY250606C00440000"));
    }

    #[tokio::test]
    async fn chain_table_with_nothing_listed_says_so() {
        let market = FakeMarket::new();
        let mut config = config();
        // The first listed expiration is four days out.
        config.lessons.days_to_expiry = 1;
        let ctx = LessonContext::new(&market, &config, fixtures::today());

        let text = options_chain(ctx, "SPY").await.unwrap();
        assert!(text.contains("No options found."));
    }

    #[tokio::test]
    async fn call_lesson_breaks_down_the_quote() {
        let market = FakeMarket::new();
        let config = config();
        let ctx = LessonContext::new(&market, &config, fixtures::today());

        let text = long_option(ctx, "SPY", OptionRight::Call).await.unwrap();
        assert!(text.contains("LESSON 2: CALL OPTIONS"));
        assert!(text.contains("Strike Price: $450.00"));
        assert!(text.contains("Expiration: 2025-06-06 (4 days)"));
        // bid 1.20 / ask 1.30
        assert!(text.contains("Premium: $1.25 per share ($125.00 per contract)"));
        assert!(text.contains("Moneyness: ATM"));
        assert!(text.contains("Breakeven = Strike + Premium = $450.00 + $3.00 = $453.00"));
        assert!(text.contains("Stock up big"));
    }

    #[tokio::test]
    async fn put_lesson_uses_put_breakeven() {
        let market = FakeMarket::new();
        let config = config();
        let ctx = LessonContext::new(&market, &config, fixtures::today());

        let text = long_option(ctx, "SPY", OptionRight::Put).await.unwrap();
        assert!(text.contains("LESSON 3: PUT OPTIONS"));
        assert!(text.contains("Breakeven = Strike - Premium = $450.00 - $3.00 = $447.00"));
        assert!(text.contains("Stock down big"));
    }

    #[tokio::test]
    async fn unquoted_contract_still_shows_scenarios() {
        let market = FakeMarket::unquoted();
        let config = config();
        let ctx = LessonContext::new(&market, &config, fixtures::today());

        let text = long_option(ctx, "SPY", OptionRight::Call).await.unwrap();
        assert!(text.contains("No live quote"));
        assert!(!text.contains("LIVE QUOTE BREAKDOWN"));
        assert!(text.contains("PROFIT/LOSS SCENARIOS"));
    }

    #[tokio::test]
    async fn moneyness_examples_skip_the_atm_band() {
        let market = FakeMarket::new();
        let config = config();
        let ctx = LessonContext::new(&market, &config, fixtures::today());

        let text = moneyness(ctx, "SPY").await.unwrap();
        assert!(text.contains("ITM (In)        $430.00    $20.00               HIGH"));
        assert!(text.contains("ATM (At)        $450.00    $0.00                MEDIUM"));
        assert!(text.contains("OTM (Out)       $460.00    $0.00                LOW"));
    }

    #[tokio::test]
    async fn nearest_strike_is_the_atm_row_even_off_grid() {
        let market = FakeMarket::new();
        let config = config();
        let ctx = LessonContext::new(&market, &config, fixtures::today());

        // IWM sits halfway between strikes, outside the ATM tolerance.
        let text = moneyness(ctx, "IWM").await.unwrap();
        assert!(text.contains("ATM (At)        $205.00    $2.50                MEDIUM"));
        assert!(text.contains("ITM (In)        $185.00    $22.50               HIGH"));
        assert!(text.contains("OTM (Out)       $215.00    $0.00                LOW"));
    }

    #[tokio::test]
    async fn decay_table_finds_an_expiry_per_horizon() {
        let market = FakeMarket::new();
        let config = config();
        let ctx = LessonContext::new(&market, &config, fixtures::today());

        let text = time_decay(ctx, "SPY").await.unwrap();
        // Horizons 7/30/60/90 land on the 11/32/60/95-day expirations.
        for days in [11, 32, 60, 95] {
            let premium = fixtures::time_value(days) + dec!(0.05);
            let row = format!("{:<16} {:<10} {:<12}", days, "$450.00", money(premium));
            assert!(text.contains(&row), "missing row for {days} days:\n{text}");
        }
        assert!(!text.contains("no listed expiration"));
    }

    #[test]
    fn congratulations_lists_next_steps() {
        let text = congratulations();
        assert!(text.contains("CONGRATULATIONS"));
        assert!(text.contains("Start with paper trading"));
    }
}
