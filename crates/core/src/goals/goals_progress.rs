//! Goal progress resolution.
//!
//! Progress is taken from the first source that is available, in order:
//! the server's percentage, the server's current amount, the manual
//! contribution total, and finally the positive sum of transactions in the
//! goal's inferred category. The result is always within 0-100.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use log::{debug, warn};

use super::goals_model::{Goal, GoalProgress};
use crate::constants::{MAX_PROGRESS_PERCENT, MIN_PROGRESS_PERCENT};
use crate::transactions::{DateRange, TransactionSumProviderTrait, TransactionSumQuery};

/// Clamps a percentage into 0-100. NaN becomes 0.
pub fn clamp_progress(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_PROGRESS_PERCENT;
    }
    value.clamp(MIN_PROGRESS_PERCENT, MAX_PROGRESS_PERCENT)
}

/// Progress derivable from the goal record alone, without any lookup.
///
/// Returns `Some(0.0)` when the target is missing or not positive, and `None`
/// when none of the stored sources apply.
pub fn stored_progress(goal: &Goal) -> Option<f64> {
    let Some(target) = goal.positive_target() else {
        return Some(MIN_PROGRESS_PERCENT);
    };

    if let Some(percentage) = goal.progress_percentage {
        return Some(clamp_progress(percentage));
    }
    if let Some(current) = goal.current_value().filter(|c| *c > 0.0) {
        return Some(clamp_progress(current / target * 100.0));
    }
    if let Some(manual) = goal.manual_contributions_total.filter(|m| *m > 0.0) {
        return Some(clamp_progress(manual / target * 100.0));
    }
    None
}

/// Resolves goal progress, falling back to a transaction-sum lookup.
///
/// Lookup failures are logged and resolve to 0; callers always get a number.
pub struct GoalProgressResolver {
    transaction_sums: Arc<dyn TransactionSumProviderTrait>,
}

impl GoalProgressResolver {
    pub fn new(transaction_sums: Arc<dyn TransactionSumProviderTrait>) -> Self {
        Self { transaction_sums }
    }

    /// Resolves progress using today's local date for the default window.
    pub async fn resolve(&self, goal: &Goal, range: Option<DateRange>) -> f64 {
        self.resolve_as_of(goal, range, Local::now().date_naive())
            .await
    }

    /// Resolves progress; `today` anchors the default year-to-date window.
    pub async fn resolve_as_of(
        &self,
        goal: &Goal,
        range: Option<DateRange>,
        today: NaiveDate,
    ) -> f64 {
        if let Some(progress) = stored_progress(goal) {
            return progress;
        }

        let category_id = goal
            .inferred_category_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty());
        let (Some(target), Some(category_id)) = (goal.positive_target(), category_id) else {
            return MIN_PROGRESS_PERCENT;
        };

        let range = range.unwrap_or_else(|| DateRange::year_to_date(today));
        let query = TransactionSumQuery::for_category(category_id, range);
        debug!(
            "Resolving goal {} progress from category {} between {} and {}",
            goal.id, category_id, range.from, range.to
        );

        match self.transaction_sums.category_sum(&query).await {
            Ok(response) => match response.total() {
                Some(total) => clamp_progress(total.max(0.0) / target * 100.0),
                None => {
                    warn!(
                        "Transaction sum for goal {} returned no usable total: {:?}",
                        goal.id, response.message
                    );
                    MIN_PROGRESS_PERCENT
                }
            },
            Err(e) => {
                warn!("Transaction sum lookup failed for goal {}: {}", goal.id, e);
                MIN_PROGRESS_PERCENT
            }
        }
    }

    /// Resolves every non-archived goal, one lookup at a time.
    pub async fn resolve_all(&self, goals: &[Goal], range: Option<DateRange>) -> Vec<GoalProgress> {
        let today = Local::now().date_naive();
        let mut results = Vec::with_capacity(goals.len());

        for goal in goals.iter().filter(|g| !g.is_archived) {
            let percentage = self.resolve_as_of(goal, range, today).await;
            let remaining_amount = goal
                .positive_target()
                .map(|target| (target * (1.0 - percentage / MAX_PROGRESS_PERCENT)).max(0.0))
                .unwrap_or(0.0);

            results.push(GoalProgress {
                goal_id: goal.id.clone(),
                goal_name: goal.name.clone(),
                percentage,
                remaining_amount,
                is_completed: goal.is_completed || percentage >= MAX_PROGRESS_PERCENT,
            });
        }

        results
    }
}
