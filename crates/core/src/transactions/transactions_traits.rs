use async_trait::async_trait;

use super::transactions_model::{TransactionSumQuery, TransactionSumResponse};
use crate::errors::Result;

/// Remote lookup of summed transaction amounts per category.
#[async_trait]
pub trait TransactionSumProviderTrait: Send + Sync {
    async fn category_sum(&self, query: &TransactionSumQuery) -> Result<TransactionSumResponse>;
}
