//! Accounts module - read models, list filtering and totals.

mod accounts_constants;
mod accounts_filter;
mod accounts_model;
mod accounts_summary;
mod accounts_traits;


// Re-export the public interface
pub use accounts_constants::*;
pub use accounts_filter::{
    apply_account_filter, filter_accounts, sort_accounts, AccountFilter, AccountTypeFilter,
    SortBy, SortDirection, StatusFilter,
};
pub use accounts_model::{parse_decimal, parse_timestamp_millis, Account, AccountType};
pub use accounts_summary::{summarize_accounts, AccountsSummary};
pub use accounts_traits::AccountReaderTrait;
