//! Cashly Core - client-side read models and derived state.
//!
//! This crate holds the account and goal projections received from the
//! Cashly API, the pure logic that derives display state from them (list
//! filtering and sorting, goal progress), and the traits that the HTTP
//! client implements. It performs no I/O of its own.

pub mod accounts;
pub mod constants;
pub mod errors;
pub mod goals;
pub mod state;
pub mod transactions;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
