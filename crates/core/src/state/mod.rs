//! Client state - UI toggles and the signed-in session.

mod client_store;
mod state_model;

pub use client_store::{ClientStore, StaticToken, TokenSource};
pub use state_model::{ClientState, Session, Theme};
