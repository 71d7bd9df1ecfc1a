use crate::errors::Result;
use crate::goals::goals_model::Goal;
use async_trait::async_trait;

/// Source of goal records
#[async_trait]
pub trait GoalReaderTrait: Send + Sync {
    async fn list_goals(&self) -> Result<Vec<Goal>>;
    async fn get_goal(&self, goal_id: &str) -> Result<Goal>;
}
