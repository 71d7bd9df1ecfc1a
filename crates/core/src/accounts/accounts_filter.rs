//! Filtering and ordering of account lists for display.
//!
//! Everything here is a pure function of its inputs: the account slice is
//! never mutated and identical inputs always produce identical output.
//! Malformed data (unknown types, unparseable balances or timestamps) is
//! absorbed rather than reported.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::accounts_model::{Account, AccountType};
use crate::{errors::ValidationError, Error, Result};

/// Which account types pass the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountTypeFilter {
    #[default]
    All,
    Only(AccountType),
}

impl FromStr for AccountTypeFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "all" => Ok(AccountTypeFilter::All),
            other => other.parse().map(AccountTypeFilter::Only),
        }
    }
}

/// Which activity states pass the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl FromStr for StatusFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "inactive" => Ok(StatusFilter::Inactive),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown status filter '{}'",
                other
            )))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Sort order for the account list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    NameAsc,
    NameDesc,
    BalanceAsc,
    BalanceDesc,
    LastSyncedAsc,
    LastSyncedDesc,
    TypeAsc,
    TypeDesc,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::NameAsc => "name_asc",
            SortBy::NameDesc => "name_desc",
            SortBy::BalanceAsc => "balance_asc",
            SortBy::BalanceDesc => "balance_desc",
            SortBy::LastSyncedAsc => "last_synced_asc",
            SortBy::LastSyncedDesc => "last_synced_desc",
            SortBy::TypeAsc => "type_asc",
            SortBy::TypeDesc => "type_desc",
        }
    }

    pub fn direction(&self) -> SortDirection {
        match self {
            SortBy::NameAsc | SortBy::BalanceAsc | SortBy::LastSyncedAsc | SortBy::TypeAsc => {
                SortDirection::Ascending
            }
            SortBy::NameDesc | SortBy::BalanceDesc | SortBy::LastSyncedDesc | SortBy::TypeDesc => {
                SortDirection::Descending
            }
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "name_asc" => Ok(SortBy::NameAsc),
            "name_desc" => Ok(SortBy::NameDesc),
            "balance_asc" => Ok(SortBy::BalanceAsc),
            "balance_desc" => Ok(SortBy::BalanceDesc),
            "last_synced_asc" => Ok(SortBy::LastSyncedAsc),
            "last_synced_desc" => Ok(SortBy::LastSyncedDesc),
            "type_asc" => Ok(SortBy::TypeAsc),
            "type_desc" => Ok(SortBy::TypeDesc),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown sort order '{}'",
                other
            )))),
        }
    }
}

/// Search, filter and sort settings for an account list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountFilter {
    pub search: String,
    pub account_type: AccountTypeFilter,
    pub status: StatusFilter,
    pub sort_by: SortBy,
}

impl AccountFilter {
    /// Returns true if the account passes the search, type and status predicates.
    pub fn matches(&self, account: &Account) -> bool {
        matches_search(account, &self.search)
            && matches_type(account, self.account_type)
            && matches_status(account, self.status)
    }
}

/// Filters then sorts `accounts`, returning a new list.
pub fn apply_account_filter(accounts: &[Account], filter: &AccountFilter) -> Vec<Account> {
    let mut filtered = filter_accounts(accounts, filter);
    sort_accounts(&mut filtered, filter.sort_by);
    filtered
}

/// Keeps the accounts that pass every predicate, preserving input order.
pub fn filter_accounts(accounts: &[Account], filter: &AccountFilter) -> Vec<Account> {
    accounts
        .iter()
        .filter(|account| filter.matches(account))
        .cloned()
        .collect()
}

/// Sorts in place. The sort is stable, so equal keys keep their relative order.
///
/// Keys are computed once per account before sorting.
pub fn sort_accounts(accounts: &mut [Account], sort_by: SortBy) {
    let direction = sort_by.direction();
    match sort_by {
        SortBy::NameAsc | SortBy::NameDesc => accounts
            .sort_by_cached_key(|a| Directed::new(name_key(&a.institution_name), direction)),
        // Unparseable balances go last regardless of direction.
        SortBy::BalanceAsc | SortBy::BalanceDesc => accounts.sort_by_cached_key(|a| {
            let balance = a.parsed_balance();
            (balance.is_none(), Directed::new(balance.unwrap_or_default(), direction))
        }),
        SortBy::LastSyncedAsc | SortBy::LastSyncedDesc => {
            accounts.sort_by_cached_key(|a| Directed::new(sync_sort_key(a), direction))
        }
        SortBy::TypeAsc | SortBy::TypeDesc => {
            accounts.sort_by_cached_key(|a| Directed::new(a.account_type.clone(), direction))
        }
    }
}

fn matches_search(account: &Account, search: &str) -> bool {
    if search.trim().is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

    account.custom_name.as_deref().is_some_and(contains)
        || contains(&account.institution_name)
        || contains(&account.account_number_masked)
}

fn matches_type(account: &Account, filter: AccountTypeFilter) -> bool {
    match filter {
        AccountTypeFilter::All => true,
        AccountTypeFilter::Only(ty) => account.account_type == ty.as_str(),
    }
}

fn matches_status(account: &Account, filter: StatusFilter) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Active => account.is_active,
        StatusFilter::Inactive => !account.is_active,
    }
}

/// A sort key ordered according to a direction.
#[derive(Debug, PartialEq, Eq)]
struct Directed<K> {
    key: K,
    direction: SortDirection,
}

impl<K: Ord> Directed<K> {
    fn new(key: K, direction: SortDirection) -> Self {
        Self { key, direction }
    }
}

impl<K: Ord> Ord for Directed<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.direction.apply(self.key.cmp(&other.key))
    }
}

impl<K: Ord> PartialOrd for Directed<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Case-insensitive first, so "ally" and "Ally" sit together; raw order breaks ties.
fn name_key(name: &str) -> (String, String) {
    (name.to_lowercase(), name.to_string())
}

/// Never-synced accounts count as synced at the epoch in both directions.
fn sync_sort_key(account: &Account) -> i64 {
    account.last_synced_millis().unwrap_or(0)
}
