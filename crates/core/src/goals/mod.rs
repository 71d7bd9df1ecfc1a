//! Goals module - read models, progress resolution, and traits.

mod goals_model;
mod goals_progress;
mod goals_traits;

pub use goals_model::{Goal, GoalProgress};
pub use goals_progress::{clamp_progress, stored_progress, GoalProgressResolver};
pub use goals_traits::GoalReaderTrait;
