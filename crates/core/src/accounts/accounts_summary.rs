use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::accounts_constants::is_liability_type;
use super::accounts_model::Account;
use crate::constants::DEFAULT_CURRENCY;

/// Header totals for the accounts page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AccountsSummary {
    pub total_count: usize,
    pub active_count: usize,
    /// Assets minus liabilities across active accounts, keyed by currency code.
    pub net_balances: BTreeMap<String, Decimal>,
    /// Active accounts whose balance could not be parsed.
    pub unparsed_count: usize,
}

/// Totals a list of accounts.
///
/// Credit card balances are treated as amounts owed, so their absolute value
/// is subtracted. Inactive accounts are counted but not summed. Balances in
/// different currencies are never added together.
pub fn summarize_accounts(accounts: &[Account]) -> AccountsSummary {
    let mut summary = AccountsSummary {
        total_count: accounts.len(),
        ..Default::default()
    };

    for account in accounts.iter().filter(|a| a.is_active) {
        summary.active_count += 1;
        let Some(balance) = account.parsed_balance() else {
            summary.unparsed_count += 1;
            continue;
        };
        let currency = account
            .currency
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
            .to_ascii_uppercase();
        let net = summary.net_balances.entry(currency).or_default();
        if is_liability_type(&account.account_type) {
            *net -= balance.abs();
        } else {
            *net += balance;
        }
    }

    summary
}
