//! `options-lab scan`: IV scanners, chain analyzer, earnings notes and a
//! quick reference.
//!
//! Without `--lesson` the menu loops until `0` or end of input; a failing
//! choice prints its error and returns to the menu.

use anyhow::Result;
use chrono::Duration;
use clap::Args;
use options_lab_core::chain::ChainFilter;
use options_lab_core::report::{money, Report};
use options_lab_core::scanner::{
    fetch_iv_rank, strategy_idea, strike_label, within_analysis_window, ChainOutlook,
};
use options_lab_core::{IvRegime, OptionRight, OptionsChain, ScanDirection, Scanner};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;

use super::{print_failure, LessonContext};
use crate::prompt;

/// Strike window for the analyzer and earnings listings, as a fraction of price.
const LISTING_WINDOW_PCT: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Expirations listed by the analyzer.
const EXPIRATIONS_SHOWN: usize = 5;

/// Days that count as "this week" for the earnings analyzer.
const NEAR_TERM_DAYS: i64 = 7;

/// Outer edge of the earnings analyzer's longer-dated bucket.
const FAR_TERM_DAYS: i64 = 45;

/// Arguments for the scan command.
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Tool to run once (1-6); loops over the menu when omitted
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=6))]
    pub lesson: Option<u8>,

    /// Symbol for the chain and earnings analyzers (prompted when omitted)
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// Days to expiration for the chain analyzer (prompted when omitted)
    #[arg(short, long)]
    pub days: Option<i64>,
}

const MENU: &str = "
1. High IV Scanner (Find options to SELL)
2. Low IV Scanner (Find options to BUY)
3. Analyze Specific Options Chain
4. Earnings Play Analyzer
5. Quick Reference Guide
6. Custom Watchlist Scan
0. Exit
";

pub async fn run(args: ScanArgs, ctx: LessonContext<'_>) -> Result<()> {
    if let Some(n) = args.lesson {
        let text = handle(&n.to_string(), ctx, &args, &mut prompt::ask).await?;
        print!("{text}");
        return Ok(());
    }

    loop {
        let mut header = Report::new();
        header
            .blank()
            .double_rule()
            .centered("OPTIONS SCANNER & ANALYZER")
            .double_rule();
        print!("{}{MENU}", header.finish());

        let Some(choice) = prompt::ask_line("\nEnter your choice (0-6): ")? else {
            break;
        };
        match choice.as_str() {
            "0" => {
                println!("\nHappy trading! Remember: Practice with paper trading first!");
                break;
            }
            "1" | "2" | "3" | "4" | "5" | "6" => {
                match handle(&choice, ctx, &args, &mut prompt::ask).await {
                    Ok(text) => print!("{text}"),
                    Err(e) => print_failure(&e),
                }
                prompt::pause("Press Enter to return to the menu...")?;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
    Ok(())
}

/// Run one menu choice, reading any follow-up answers from `ask`.
async fn handle(
    choice: &str,
    ctx: LessonContext<'_>,
    args: &ScanArgs,
    ask: &mut dyn FnMut(&str) -> Result<String>,
) -> Result<String> {
    let scanner = &ctx.config.scanner;
    match choice {
        "1" | "2" => {
            let direction = if choice == "1" {
                ScanDirection::HighIv
            } else {
                ScanDirection::LowIv
            };
            println!(
                "\nScanning {} symbols, this may take a minute...",
                scanner.watchlist.len()
            );
            Ok(scan_report(ctx, &scanner.watchlist, direction).await)
        }
        "3" => {
            let Some(symbol) =
                symbol_or_prompt(args, ask, "Enter symbol to analyze (e.g., AAPL): ")?
            else {
                return Ok(NO_SYMBOL.to_string());
            };
            let default_days = ctx.config.lessons.days_to_expiry;
            let days = match args.days {
                Some(d) if d > 0 => d,
                _ => prompt::parse_days(
                    &ask(&format!("Days to expiration (default {default_days}): "))?,
                    default_days,
                ),
            };
            analyze_chain(ctx, &symbol, days).await
        }
        "4" => match symbol_or_prompt(args, ask, "Enter symbol with upcoming earnings: ")? {
            Some(symbol) => earnings_play(ctx, &symbol).await,
            None => Ok(NO_SYMBOL.to_string()),
        },
        "5" => Ok(quick_reference()),
        "6" => {
            let answer = ask("Enter symbols separated by spaces (e.g., AAPL TSLA MSFT): ")?;
            let symbols = prompt::parse_symbols(&answer);
            if symbols.is_empty() {
                return Ok("No symbols entered.\n".to_string());
            }
            let direction = watchlist_direction(&ask("Scan for (1) High IV or (2) Low IV? ")?);
            Ok(scan_report(ctx, &symbols, direction).await)
        }
        _ => Ok("Invalid choice. Please try again.\n".to_string()),
    }
}

const NO_SYMBOL: &str = "No symbol entered.\n";

/// Custom watchlists scan high IV only on an explicit "1".
fn watchlist_direction(answer: &str) -> ScanDirection {
    if answer.trim() == "1" {
        ScanDirection::HighIv
    } else {
        ScanDirection::LowIv
    }
}

fn symbol_or_prompt(
    args: &ScanArgs,
    ask: &mut dyn FnMut(&str) -> Result<String>,
    question: &str,
) -> Result<Option<String>> {
    let symbol = match &args.symbol {
        Some(s) => s.clone(),
        None => ask(question)?,
    };
    let symbol = symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Ok(None);
    }
    Ok(Some(symbol))
}

/// Run the scanner over `symbols` and tabulate the ranked candidates.
pub async fn scan_report(
    ctx: LessonContext<'_>,
    symbols: &[String],
    direction: ScanDirection,
) -> String {
    info!(count = symbols.len(), ?direction, "Scanning watchlist");
    let found = Scanner::new(ctx.data, &ctx.config.scanner)
        .scan(symbols, direction, ctx.today)
        .await;

    let mut r = Report::new();
    r.banner(direction.title());
    r.text(match direction {
        ScanDirection::HighIv => HIGH_IV_INTRO,
        ScanDirection::LowIv => LOW_IV_INTRO,
    });
    r.blank().line(format!(
        "Scanned {} symbols, {} passed the filters.",
        symbols.len(),
        found.len()
    ));

    if found.is_empty() {
        r.blank().line(match direction {
            ScanDirection::HighIv => "No high IV opportunities found in the scanned symbols.",
            ScanDirection::LowIv => "No low IV opportunities found in the scanned symbols.",
        });
        return r.finish();
    }

    r.blank().line(format!(
        "{:<8} {:<10} {:<9} {:<11} {:<12} {:<8} {}",
        "Symbol", "Price", "IV Rank", "ATM Strike", "Expiry", "ATM IV", "Strategy Idea"
    ));
    r.rule();
    for c in &found {
        let atm_iv = c
            .implied_volatility
            .map_or_else(|| "-".to_string(), |iv| format!("{:.1}%", iv * 100.0));
        r.line(format!(
            "{:<8} {:<10} {:<9} {:<11} {:<12} {:<8} {}",
            c.symbol,
            money(c.price),
            format!("{:.1}%", c.iv_rank),
            money(c.atm_strike),
            c.expiry.to_string(),
            atm_iv,
            strategy_idea(c, direction)
        ));
    }

    r.blank().text(match direction {
        ScanDirection::HighIv => HIGH_IV_NOTES,
        ScanDirection::LowIv => LOW_IV_NOTES,
    });
    r.finish()
}

/// IV regime, expirations, strike labels and strategy bias for one symbol.
pub async fn analyze_chain(ctx: LessonContext<'_>, symbol: &str, days: i64) -> Result<String> {
    info!(symbol, days, "Analyzing chain");
    let lessons = &ctx.config.lessons;
    let scanner = &ctx.config.scanner;
    let mut r = Report::new();
    r.banner(format!("OPTIONS CHAIN ANALYSIS: {symbol}"));

    let price = ctx.current_price(symbol).await?;
    r.line(format!("Current Price: {}", money(price)));

    let iv_rank = fetch_iv_rank(
        ctx.data,
        symbol,
        ctx.today,
        scanner.bar_lookback_days,
        scanner.rank_window,
    )
    .await?;
    match iv_rank {
        Some(rank) => {
            r.line(format!("IV Rank (approx): {rank:.1}%"));
            r.line(format!("Status: {}", IvRegime::from_rank(rank).status_line()));
        }
        None => {
            r.line("IV Rank: not enough price history");
        }
    }

    let mut contracts = Vec::new();
    for right in [OptionRight::Call, OptionRight::Put] {
        let filter = ChainFilter::expiring_within(ctx.today, days)
            .with_right(right)
            .near_price(price, LISTING_WINDOW_PCT)
            .with_limit(100);
        contracts.extend(ctx.data.option_contracts(symbol, &filter).await?);
    }
    if contracts.is_empty() {
        r.blank().line("No options available for this symbol.");
        return Ok(r.finish());
    }
    let chain = OptionsChain::from_contracts(symbol, price, contracts);
    let expirations = chain.expirations();

    r.blank().line(format!("Available Expirations: {}", expirations.len()));
    for exp in expirations.iter().take(EXPIRATIONS_SHOWN) {
        r.line(format!("  {exp} ({} days)", (*exp - ctx.today).num_days()));
    }

    let Some(&first) = expirations.first() else {
        return Ok(r.finish());
    };
    r.section(format!("ANALYSIS FOR {first} EXPIRATION"));
    r.line(format!(
        "{:<10} {:<10} {:<15} {}",
        "Type", "Strike", "Moneyness", "Symbol"
    ));
    r.rule();
    for right in [OptionRight::Call, OptionRight::Put] {
        let label = match right {
            OptionRight::Call => "CALL",
            OptionRight::Put => "PUT",
        };
        for o in chain
            .side(right, Some(first))
            .into_iter()
            .filter(|o| within_analysis_window(o.contract.strike, price))
        {
            let strike = o.contract.strike;
            r.line(format!(
                "{:<10} {:<10} {:<15} {}",
                label,
                money(strike),
                strike_label(right, strike, price, lessons.moneyness_tolerance),
                o.contract.symbol
            ));
        }
        r.blank();
    }

    let atm_call = chain.atm(OptionRight::Call, Some(first));
    let atm_put = chain.atm(OptionRight::Put, Some(first));
    r.section("STRATEGY RECOMMENDATIONS");
    match ChainOutlook::from_rank(iv_rank) {
        ChainOutlook::HighIv => {
            r.line(format!(
                "Given HIGH IV ({:.1}%):",
                iv_rank.unwrap_or_default()
            ));
            r.line("1. SELL premium strategies:");
            if let Some(put) = atm_put {
                let target = (put.contract.strike - price * dec!(0.05)).round_dp(2);
                r.line(format!("   - Sell OTM puts (around {})", money(target)));
            }
            r.line("   - Sell covered calls if you own the stock");
            r.line("   - Iron condors for a neutral outlook");
            r.line("2. AVOID buying options (expensive)");
        }
        ChainOutlook::LowIv => {
            r.line(format!(
                "Given LOW IV ({:.1}%):",
                iv_rank.unwrap_or_default()
            ));
            r.line("1. BUY options strategies:");
            if let Some(call) = atm_call {
                r.line(format!(
                    "   - Buy ATM calls ({}) if bullish",
                    money(call.contract.strike)
                ));
            }
            if let Some(put) = atm_put {
                r.line(format!(
                    "   - Buy ATM puts ({}) if bearish",
                    money(put.contract.strike)
                ));
            }
            r.line("   - Debit spreads to reduce cost");
            r.line("2. AVOID selling premium (cheap)");
        }
        ChainOutlook::Medium => {
            r.line("Given MEDIUM IV:");
            r.line("1. Balanced approach:");
            r.line("   - Credit spreads or debit spreads");
            r.line("   - Match the strategy to your directional view");
        }
    }
    Ok(r.finish())
}

/// Near-term versus longer-dated listings around an earnings date.
pub async fn earnings_play(ctx: LessonContext<'_>, symbol: &str) -> Result<String> {
    info!(symbol, "Earnings analyzer");
    let mut r = Report::new();
    r.banner(format!("EARNINGS PLAY ANALYZER: {symbol}"));
    r.text(EARNINGS_WARNING);

    let price = ctx.current_price(symbol).await?;
    r.blank().line(format!("Current Price: {}", money(price)));

    let near = ChainFilter::expiring_within(ctx.today, NEAR_TERM_DAYS)
        .with_right(OptionRight::Call)
        .near_price(price, LISTING_WINDOW_PCT)
        .with_limit(100);
    let far = ChainFilter::expiring_within(
        ctx.today + Duration::days(NEAR_TERM_DAYS + 1),
        FAR_TERM_DAYS - NEAR_TERM_DAYS - 1,
    )
    .with_right(OptionRight::Call)
    .near_price(price, LISTING_WINDOW_PCT)
    .with_limit(100);

    let near = ctx.data.option_contracts(symbol, &near).await?;
    let far = ctx.data.option_contracts(symbol, &far).await?;
    r.line(format!(
        "Near-term calls (next {NEAR_TERM_DAYS} days): {}",
        near.len()
    ));
    r.line(format!(
        "Longer-dated calls ({}-{FAR_TERM_DAYS} days): {}",
        NEAR_TERM_DAYS + 1,
        far.len()
    ));
    if near.is_empty() {
        r.line("No weekly expirations listed; earnings trades usually use the first expiry after the report.");
    }

    r.blank().text(EARNINGS_STRATEGIES);
    Ok(r.finish())
}

#[must_use]
pub fn quick_reference() -> String {
    let mut r = Report::new();
    r.banner("OPTIONS QUICK REFERENCE GUIDE");
    r.text(QUICK_REFERENCE);
    r.finish()
}

const HIGH_IV_INTRO: &str = "\
Looking for stocks with elevated implied volatility...
High IV = Expensive options = Good time to SELL premium
";

const LOW_IV_INTRO: &str = "\
Looking for stocks with low implied volatility...
Low IV = Cheap options = Good time to BUY options
";

const HIGH_IV_NOTES: &str = "\
INTERPRETATION:
- IV Rank > 75%: Very high, premium is rich
- IV Rank 50-75%: Elevated, consider selling strategies
- Covered calls and cash-secured puts collect that premium
- Watch for earnings or news that explains the volatility
";

const LOW_IV_NOTES: &str = "\
INTERPRETATION:
- IV Rank < 25%: Options are cheap relative to recent history
- Good time for long calls, long puts and debit spreads
- A volatility expansion lifts the value of options you own
- Give trades time: choose 30-60+ days to expiration
";

const EARNINGS_WARNING: &str = "\
WARNING: Earnings trades are risky!
- IV usually rises before earnings and collapses right after (IV crush)
- Even a correct directional call can lose money after the crush
";

const EARNINGS_STRATEGIES: &str = "\
EARNINGS STRATEGIES:

1. Sell premium BEFORE earnings (IV crush play):
   - Sell strangles or iron condors a few days before the report
   - Profit if the stock moves less than the market expects

2. Buy straddle (big move play):
   - Buy an ATM call and an ATM put
   - Needs a move larger than the combined premium

3. Avoid earnings entirely (safest):
   - Close positions before the report
   - Re-enter once volatility settles

TIP: Paper trade several earnings cycles before using real money.
";

const QUICK_REFERENCE: &str = "\
WHEN TO BUY OPTIONS:
- IV Rank below 25%
- Expecting a big move soon
- Want limited risk with leverage

WHEN TO SELL OPTIONS:
- IV Rank above 50%
- Expecting sideways or slow movement
- Want to collect income

STRATEGY CHEAT SHEET:
Bullish:  Long call, bull call spread, cash-secured put
Bearish:  Long put, bear put spread
Neutral:  Iron condor, covered call, short strangle
Volatile: Long straddle, long strangle
Hedge:    Protective put, collar

RISK RULES:
- Risk 1-2% of the portfolio per trade
- Exit losers at -50% of premium
- Take profits at +50% to +100%
- Close or roll before the final week

IV RANK GUIDE:
- 0-25%:   Low, options are cheap
- 25-50%:  Normal
- 50-75%:  Elevated
- 75-100%: Very high, options are expensive
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{self, FakeMarket};
    use options_lab_core::AppConfig;
    use std::collections::VecDeque;

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    /// Answers handed out in order; blank once exhausted.
    fn scripted(list: &[&str]) -> impl FnMut(&str) -> Result<String> {
        let mut answers: VecDeque<String> = list.iter().map(ToString::to_string).collect();
        move |_| Ok(answers.pop_front().unwrap_or_default())
    }

    fn no_args() -> ScanArgs {
        ScanArgs {
            lesson: None,
            symbol: None,
            days: None,
        }
    }

    #[test]
    fn watchlist_scans_high_only_on_one() {
        assert_eq!(watchlist_direction("1"), ScanDirection::HighIv);
        assert_eq!(watchlist_direction(" 1 "), ScanDirection::HighIv);
        assert_eq!(watchlist_direction("2"), ScanDirection::LowIv);
        assert_eq!(watchlist_direction(""), ScanDirection::LowIv);
        assert_eq!(watchlist_direction("3"), ScanDirection::LowIv);
    }

    #[tokio::test]
    async fn custom_watchlist_blank_answer_scans_low_iv() {
        let market = FakeMarket::quiet();
        let config = AppConfig::default();
        let ctx = LessonContext::new(&market, &config, fixtures::today());

        let mut ask = scripted(&["aapl", ""]);
        let text = handle("6", ctx, &no_args(), &mut ask).await.unwrap();
        assert!(text.contains("LOW IV SCANNER"));
        assert!(text.contains("Scanned 1 symbols, 1 passed the filters."));
        assert!(text.contains("Long Call/Put"));
    }

    #[tokio::test]
    async fn custom_watchlist_one_scans_high_iv() {
        let market = FakeMarket::new();
        let config = AppConfig::default();
        let ctx = LessonContext::new(&market, &config, fixtures::today());

        let mut ask = scripted(&["SPY AAPL", "1"]);
        let text = handle("6", ctx, &no_args(), &mut ask).await.unwrap();
        assert!(text.contains("HIGH IV SCANNER"));
        assert!(text.contains("Scanned 2 symbols, 2 passed the filters."));
    }

    #[tokio::test]
    async fn custom_watchlist_without_symbols() {
        let market = FakeMarket::new();
        let config = AppConfig::default();
        let ctx = LessonContext::new(&market, &config, fixtures::today());

        let mut ask = scripted(&["   "]);
        let text = handle("6", ctx, &no_args(), &mut ask).await.unwrap();
        assert_eq!(text, "No symbols entered.\n");
    }

    #[tokio::test]
    async fn analyzer_choice_prompts_for_symbol_and_days() {
        let market = FakeMarket::new();
        let config = AppConfig::default();
        let ctx = LessonContext::new(&market, &config, fixtures::today());

        let mut ask = scripted(&["spy", "2"]);
        let text = handle("3", ctx, &no_args(), &mut ask).await.unwrap();
        assert!(text.contains("OPTIONS CHAIN ANALYSIS: SPY"));
        assert!(text.contains("No options available for this symbol."));

        let mut ask = scripted(&[""]);
        let text = handle("3", ctx, &no_args(), &mut ask).await.unwrap();
        assert_eq!(text, "No symbol entered.\n");
    }

    #[tokio::test]
    async fn symbol_flag_skips_the_prompt() {
        let market = FakeMarket::new();
        let config = AppConfig::default();
        let ctx = LessonContext::new(&market, &config, fixtures::today());
        let args = ScanArgs {
            symbol: Some("spy".to_string()),
            ..no_args()
        };

        let mut ask = scripted(&[]);
        let text = handle("4", ctx, &args, &mut ask).await.unwrap();
        assert!(text.contains("EARNINGS PLAY ANALYZER: SPY"));
    }

    #[tokio::test]
    async fn reference_and_unknown_choices() {
        let market = FakeMarket::new();
        let config = AppConfig::default();
        let ctx = LessonContext::new(&market, &config, fixtures::today());

        let mut ask = scripted(&[]);
        let text = handle("5", ctx, &no_args(), &mut ask).await.unwrap();
        assert!(text.contains("OPTIONS QUICK REFERENCE GUIDE"));
        let text = handle("9", ctx, &no_args(), &mut ask).await.unwrap();
        assert_eq!(text, "Invalid choice. Please try again.\n");
    }

    #[tokio::test]
    async fn high_iv_scan_skips_failing_symbols() {
        let market = FakeMarket::new();
        let config = AppConfig::default();
        let ctx = LessonContext::new(&market, &config, fixtures::today());

        let text = scan_report(ctx, &symbols(&["SPY", "NOPE", "AAPL"]), ScanDirection::HighIv).await;
        assert!(text.contains("HIGH IV SCANNER"));
        assert!(text.contains("Scanned 3 symbols, 2 passed the filters."));
        assert!(text.contains("SPY      $450.00    100.0%    $450.00"));
        assert!(text.contains("25.0%    Cash-Secured Put"));
        assert!(text.contains("INTERPRETATION"));
    }

    #[tokio::test]
    async fn low_iv_scan_applies_its_price_band() {
        let market = FakeMarket::quiet();
        let config = AppConfig::default();
        let ctx = LessonContext::new(&market, &config, fixtures::today());

        // SPY is above the $300 low-IV ceiling.
        let text = scan_report(ctx, &symbols(&["SPY", "AAPL"]), ScanDirection::LowIv).await;
        assert!(text.contains("Scanned 2 symbols, 1 passed the filters."));
        assert!(text.contains("AAPL"));
        assert!(text.contains("Long Call/Put"));
    }

    #[tokio::test]
    async fn empty_scan_says_so() {
        let market = FakeMarket::new();
        let config = AppConfig::default();
        let ctx = LessonContext::new(&market, &config, fixtures::today());

        let text = scan_report(ctx, &symbols(&["AAPL"]), ScanDirection::LowIv).await;
        assert!(text.contains("No low IV opportunities found"));
    }

    #[tokio::test]
    async fn analyzer_labels_strikes_and_recommends_selling() {
        let market = FakeMarket::new();
        let config = AppConfig::default();
        let ctx = LessonContext::new(&market, &config, fixtures::today());

        let text = analyze_chain(ctx, "SPY", 30).await.unwrap();
        assert!(text.contains("Status: VERY HIGH IV - Good for selling"));
        assert!(text.contains("Available Expirations: 4"));
        assert!(text.contains("2025-06-06 (4 days)"));
        assert!(text.contains("ANALYSIS FOR 2025-06-06 EXPIRATION"));
        assert!(text.contains("CALL       $430.00    ITM -4.4%       SPY250606C00430000"));
        assert!(text.contains("CALL       $450.00    ATM"));
        assert!(text.contains("PUT        $430.00    OTM +4.4%"));
        assert!(text.contains("Given HIGH IV (100.0%)"));
        assert!(text.contains("Sell OTM puts (around $427.50)"));
    }

    #[tokio::test]
    async fn analyzer_recommends_buying_in_quiet_markets() {
        let market = FakeMarket::quiet();
        let config = AppConfig::default();
        let ctx = LessonContext::new(&market, &config, fixtures::today());

        let text = analyze_chain(ctx, "SPY", 30).await.unwrap();
        assert!(text.contains("Status: LOW IV - Good for buying"));
        let rank = fetch_iv_rank(
            &market,
            "SPY",
            fixtures::today(),
            config.scanner.bar_lookback_days,
            config.scanner.rank_window,
        )
        .await
        .unwrap()
        .unwrap();
        assert!(text.contains(&format!("Given LOW IV ({rank:.1}%):")));
        assert!(text.contains("Buy ATM calls ($450.00) if bullish"));
        assert!(text.contains("Buy ATM puts ($450.00) if bearish"));
    }

    #[tokio::test]
    async fn analyzer_with_no_listings() {
        let market = FakeMarket::new();
        let config = AppConfig::default();
        let ctx = LessonContext::new(&market, &config, fixtures::today());

        // The first listed expiration is four days out.
        let text = analyze_chain(ctx, "SPY", 2).await.unwrap();
        assert!(text.contains("No options available for this symbol."));
    }

    #[tokio::test]
    async fn earnings_counts_near_and_far_listings() {
        let market = FakeMarket::new();
        let config = AppConfig::default();
        let ctx = LessonContext::new(&market, &config, fixtures::today());

        let text = earnings_play(ctx, "SPY").await.unwrap();
        assert!(text.contains("Near-term calls (next 7 days): 9"));
        assert!(text.contains("Longer-dated calls (8-45 days): 36"));
        assert!(text.contains("IV crush"));
    }

    #[test]
    fn quick_reference_has_the_rank_guide() {
        let text = quick_reference();
        assert!(text.contains("OPTIONS QUICK REFERENCE GUIDE"));
        assert!(text.contains("IV RANK GUIDE"));
    }
}
