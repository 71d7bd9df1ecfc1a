//! Display formatting for amounts, dates and account numbers.

use chrono::{DateTime, NaiveDate, Utc};
use num_format::{Locale, ToFormattedString};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::accounts::{parse_decimal, parse_timestamp_millis};
use crate::constants::{DISPLAY_DECIMAL_PRECISION, UNKNOWN_VALUE_PLACEHOLDER, VISIBLE_ACCOUNT_DIGITS};
use crate::goals::clamp_progress;

const MASK: &str = "••••";

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency.to_ascii_uppercase().as_str() {
        "USD" | "CAD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        _ => None,
    }
}

/// Digits after the decimal point for a currency.
fn minor_units(currency: &str) -> u32 {
    match currency.to_ascii_uppercase().as_str() {
        "JPY" | "KRW" | "VND" | "CLP" | "ISK" => 0,
        _ => DISPLAY_DECIMAL_PRECISION,
    }
}

/// Formats an amount with grouping and the currency's minor units, e.g. `-$1,234.50`.
///
/// Currencies without a known symbol get the code as a suffix: `1,000.00 CHF`,
/// `12,500 JPY`.
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    let scale = minor_units(currency);
    let rounded = amount.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let abs = rounded.abs();
    let whole = abs.trunc();
    let grouped = whole.to_u128().unwrap_or(0).to_formatted_string(&Locale::en);
    let number = if scale == 0 {
        grouped
    } else {
        let cents = ((abs - whole) * Decimal::ONE_HUNDRED).to_u32().unwrap_or(0);
        format!("{}.{:02}", grouped, cents)
    };

    match currency_symbol(currency) {
        Some(symbol) => format!("{}{}{}", sign, symbol, number),
        None => format!("{}{} {}", sign, number, currency.to_ascii_uppercase()),
    }
}

/// Formats a balance sent as a string; malformed values show a placeholder.
pub fn format_balance(balance: &str, currency: &str) -> String {
    parse_decimal(balance)
        .map(|amount| format_currency(amount, currency))
        .unwrap_or_else(|| UNKNOWN_VALUE_PLACEHOLDER.to_string())
}

/// Whole-number percentage, clamped to 0-100.
pub fn format_percentage(value: f64) -> String {
    format!("{:.0}%", clamp_progress(value))
}

/// Formats a `YYYY-MM-DD` date as `Mar 1, 2024`. Other input is returned as is.
pub fn format_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(|date| date.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Relative description of when an account last synced.
pub fn format_last_synced(last_synced_at: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(synced) = last_synced_at
        .and_then(parse_timestamp_millis)
        .and_then(DateTime::<Utc>::from_timestamp_millis)
    else {
        return "Never synced".to_string();
    };

    let elapsed = now.signed_duration_since(synced);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if hours < 1 {
        plural(minutes, "minute")
    } else if days < 1 {
        plural(hours, "hour")
    } else if days < 7 {
        plural(days, "day")
    } else {
        synced.format("%b %-d, %Y").to_string()
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

/// Masks an account number down to its last four digits: `•••• 1234`.
pub fn mask_account_number(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return MASK.to_string();
    }
    let start = digits.len().saturating_sub(VISIBLE_ACCOUNT_DIGITS);
    let visible: String = digits[start..].iter().collect();
    format!("{} {}", MASK, visible)
}
