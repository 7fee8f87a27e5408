use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::goals::goals_model::{GoalId, GoalStatus};

/// Projected position of one goal on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProjection {
    pub goal_id: GoalId,
    /// Completion date of the previous goal, or "now" for the first one
    pub start_date: NaiveDateTime,
    pub completion_date: NaiveDateTime,
    /// Fractional months of contributions still needed; 0 when nothing is
    /// left to save or nothing is being contributed
    pub months_needed: f64,
    pub status: GoalStatus,
    /// Saved share of the target in [0, 100]
    pub progress_percent: f64,
}

/// Aggregate view over the whole timeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineSummary {
    pub goal_count: usize,
    pub completed_count: usize,
    pub total_target: f64,
    pub total_saved: f64,
    /// Sum of positive monthly contributions
    pub total_monthly_contribution: f64,
    pub overall_progress_percent: f64,
    /// Completion date of the last goal in sequence
    pub final_completion_date: Option<NaiveDateTime>,
}
