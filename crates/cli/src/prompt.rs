//! Line-based prompts on stdin.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

/// Print `question` without a newline and read one trimmed line.
///
/// `None` once stdin is closed.
pub fn ask_line(question: &str) -> Result<Option<String>> {
    print!("{question}");
    io::stdout().flush().context("failed to flush stdout")?;

    let mut input = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut input)
        .context("failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

/// Like [`ask_line`], with end of input read as an empty answer.
pub fn ask(question: &str) -> Result<String> {
    Ok(ask_line(question)?.unwrap_or_default())
}

/// Wait for Enter.
pub fn pause(message: &str) -> Result<()> {
    ask(&format!("\n{message}"))?;
    Ok(())
}

/// Whether an answer is an explicit "yes".
#[must_use]
pub fn is_yes(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("yes")
}

/// Whitespace-separated symbols, uppercased.
#[must_use]
pub fn parse_symbols(answer: &str) -> Vec<String> {
    answer.split_whitespace().map(str::to_uppercase).collect()
}

/// A positive day count, or `default` for blank or invalid input.
#[must_use]
pub fn parse_days(answer: &str, default: i64) -> i64 {
    match answer.trim().parse::<i64>() {
        Ok(days) if days > 0 => days,
        _ => default,
    }
}
