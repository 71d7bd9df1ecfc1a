//! Goals domain models.

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::accounts::parse_decimal;

/// Read-only projection of a savings goal as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Goal {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target_amount: Option<String>,
    #[serde(default)]
    pub current_amount: Option<String>,
    /// Server-computed percentage. May fall outside 0-100.
    #[serde(default)]
    pub progress_percentage: Option<f64>,
    #[serde(default)]
    pub manual_contributions_total: Option<f64>,
    /// Category whose income is counted toward the goal when nothing else is known.
    #[serde(default)]
    pub inferred_category_id: Option<String>,
    #[serde(default)]
    pub target_date: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_archived: bool,
}

impl Goal {
    /// Target as a float, only when it is a positive number.
    pub fn positive_target(&self) -> Option<f64> {
        self.target_amount
            .as_deref()
            .and_then(parse_decimal)
            .and_then(|d| d.to_f64())
            .filter(|target| *target > 0.0)
    }

    /// Current amount as a float. Absent or malformed amounts are `None`.
    pub fn current_value(&self) -> Option<f64> {
        self.current_amount
            .as_deref()
            .and_then(parse_decimal)
            .and_then(|d| d.to_f64())
    }
}

/// Resolved progress for one goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal_id: String,
    pub goal_name: String,
    /// Always within 0-100.
    pub percentage: f64,
    /// Amount still needed to reach the target, never negative.
    pub remaining_amount: f64,
    pub is_completed: bool,
}
