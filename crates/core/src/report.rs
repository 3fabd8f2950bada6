//! Plain-text report building shared by the lesson printers.

use rust_decimal::Decimal;

pub const WIDTH: usize = 80;

/// `$1234.50`, or `-$12.00` for negatives.
#[must_use]
pub fn money(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${:.2}", rounded.abs())
    }
}

/// `$1,234,567.89` with thousands separators.
#[must_use]
pub fn money_grouped(value: Decimal) -> String {
    let plain = format!("{:.2}", value.round_dp(2).abs());
    let (int_part, frac) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value.is_sign_negative() && !value.round_dp(2).is_zero() { "-" } else { "" };
    format!("{sign}${grouped}.{frac}")
}

/// `+12.5%` style with one decimal.
#[must_use]
pub fn signed_pct(value: Decimal) -> String {
    let rounded = value.round_dp(1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("{rounded:.1}%")
    } else {
        format!("+{:.1}%", rounded.abs())
    }
}

/// Accumulates report lines.
#[derive(Debug, Default)]
pub struct Report {
    out: String,
}

impl Report {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    /// Multi-line prose block, printed as-is.
    pub fn text(&mut self, block: &str) -> &mut Self {
        self.out.push_str(block);
        if !block.ends_with('\n') {
            self.out.push('\n');
        }
        self
    }

    pub fn double_rule(&mut self) -> &mut Self {
        self.line("=".repeat(WIDTH))
    }

    pub fn rule(&mut self) -> &mut Self {
        self.line("-".repeat(WIDTH))
    }

    /// Blank line, then the title framed by double rules.
    pub fn banner(&mut self, title: impl AsRef<str>) -> &mut Self {
        self.blank().double_rule().line(title).double_rule().blank()
    }

    /// Title over a double rule.
    pub fn section(&mut self, title: impl AsRef<str>) -> &mut Self {
        self.blank().double_rule().line(title).double_rule()
    }

    /// Title centred with a left margin.
    pub fn centered(&mut self, title: impl AsRef<str>) -> &mut Self {
        let title = title.as_ref();
        let pad = WIDTH.saturating_sub(title.chars().count()) / 2;
        self.line(format!("{}{}", " ".repeat(pad), title))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }
}
