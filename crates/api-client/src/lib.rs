//! Cashly API client - typed access to the remote REST API.
//!
//! The client implements the read-model traits from `cashly-core`, so it can
//! be handed straight to the goal progress resolver or used to load account
//! lists for filtering.

pub mod client;

pub use client::{CashlyApiClient, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
