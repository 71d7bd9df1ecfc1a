//! Account domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::accounts_constants::account_types;
use crate::{errors::ValidationError, Error, Result};

/// The account types the client knows how to filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Checking,
    Savings,
    CreditCard,
    Investment,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => account_types::CHECKING,
            AccountType::Savings => account_types::SAVINGS,
            AccountType::CreditCard => account_types::CREDIT_CARD,
            AccountType::Investment => account_types::INVESTMENT,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            account_types::CHECKING => Ok(AccountType::Checking),
            account_types::SAVINGS => Ok(AccountType::Savings),
            account_types::CREDIT_CARD => Ok(AccountType::CreditCard),
            account_types::INVESTMENT => Ok(AccountType::Investment),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown account type '{}'",
                other
            )))),
        }
    }
}

/// Read-only projection of a linked account as returned by the API.
///
/// `account_type` stays a raw string so that values this client does not
/// recognise still round-trip and can be listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Account {
    pub id: String,
    pub institution_name: String,
    #[serde(default)]
    pub custom_name: Option<String>,
    pub account_type: String,
    #[serde(default)]
    pub account_number_masked: String,
    pub balance: String,
    #[serde(default)]
    pub currency: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub last_synced_at: Option<String>,
}

impl Account {
    /// Name shown in lists: the user's custom name when set, else the institution.
    pub fn display_name(&self) -> &str {
        self.custom_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.institution_name)
    }

    /// The account type, if it is one the client recognises.
    pub fn known_type(&self) -> Option<AccountType> {
        self.account_type.parse().ok()
    }

    /// Parses the balance string. Returns `None` for malformed values.
    pub fn parsed_balance(&self) -> Option<Decimal> {
        parse_decimal(&self.balance)
    }

    /// Last sync time in milliseconds since the Unix epoch.
    ///
    /// Missing and unparseable timestamps are both `None`.
    pub fn last_synced_millis(&self) -> Option<i64> {
        self.last_synced_at.as_deref().and_then(parse_timestamp_millis)
    }
}

/// Parses a decimal amount sent as a string ("1500", "-20.35", "1e3").
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Parses an ISO-8601 timestamp into epoch milliseconds.
///
/// Accepts RFC 3339 (with offset), naive date-times (assumed UTC) and bare dates.
pub fn parse_timestamp_millis(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc().timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc().timestamp_millis());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}
