//! Account read-model trait.
//!
//! Accounts are owned by the remote service; the client only reads them.

use async_trait::async_trait;

use super::accounts_model::Account;
use crate::errors::Result;

/// Source of account records.
///
/// The HTTP client implements this against the REST API; tests use in-memory
/// implementations.
#[async_trait]
pub trait AccountReaderTrait: Send + Sync {
    /// Lists every account linked to the signed-in user.
    async fn list_accounts(&self) -> Result<Vec<Account>>;

    /// Retrieves an account by its ID.
    async fn get_account(&self, account_id: &str) -> Result<Account>;
}
