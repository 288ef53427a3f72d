//! Display formatting shared by cell renderers and stat cards.

use std::fmt::Display;

use chrono::{DateTime, Utc};

use crate::value::TIMESTAMP_FORMAT;

/// Shown for absent values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Currency code used for money.
pub const CURRENCY: &str = "LKR";

/// Groups the digits of an integer with commas: `1234567` → `1,234,567`.
#[must_use]
pub fn thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let grouped = group_digits(&digits);
    if n < 0 { format!("-{grouped}") } else { grouped }
}

/// Money with two decimals: `1234.5` → `LKR 1,234.50`.
#[must_use]
pub fn currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{CURRENCY} {sign}{}.{cents}", group_digits(whole))
}

/// Short count: `950` → `950`, `1240` → `1.2K`, `3_400_000` → `3.4M`.
#[must_use]
pub fn compact(n: f64) -> String {
    let abs = n.abs();
    let (scaled, suffix) = if abs >= 1e9 {
        (n / 1e9, "B")
    } else if abs >= 1e6 {
        (n / 1e6, "M")
    } else if abs >= 1e3 {
        (n / 1e3, "K")
    } else {
        return format!("{n:.0}");
    };
    let text = format!("{scaled:.1}");
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{text}{suffix}")
}

/// Fraction as a percentage with one decimal: `0.125` → `12.5%`.
#[must_use]
pub fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Absolute timestamp in the cell format.
#[must_use]
pub fn timestamp(at: &DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Calendar date only.
#[must_use]
pub fn date(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Time elapsed since `at`: `just now`, `5m ago`, `3h ago`, `2d ago`;
/// anything older than 30 days (or in the future) falls back to the date.
#[must_use]
pub fn relative(at: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(*at);
    if elapsed.num_seconds() < 0 {
        return date(at);
    }
    match elapsed.num_seconds() {
        0..60 => "just now".to_string(),
        60..3_600 => format!("{}m ago", elapsed.num_minutes()),
        3_600..86_400 => format!("{}h ago", elapsed.num_hours()),
        _ if elapsed.num_days() <= 30 => format!("{}d ago", elapsed.num_days()),
        _ => date(at),
    }
}

/// Displays `value`, or [`NOT_AVAILABLE`] when absent.
#[must_use]
pub fn or_na<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
