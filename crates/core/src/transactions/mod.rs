//! Transactions module - aggregate lookups used by derived views.

mod transactions_model;
mod transactions_traits;

pub use transactions_model::{
    DateRange, ResponseStatus, TransactionSumData, TransactionSumQuery, TransactionSumResponse,
};
pub use transactions_traits::TransactionSumProviderTrait;
