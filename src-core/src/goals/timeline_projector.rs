//! Sequential goal timeline projection.
//!
//! Goals are funded one after another: each goal starts when the previous
//! one is projected to complete, and the first one starts now. The whole
//! timeline is always recomputed from scratch; there is no incremental state.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

use crate::goals::goal_progress_model::{GoalProjection, TimelineSummary};
use crate::goals::goals_model::{Goal, GoalStatus};

/// Project start date, completion date and status for every goal in order.
pub fn project(goals: &[Goal], now: NaiveDateTime) -> Vec<GoalProjection> {
    let mut cursor = now;
    let mut projections = Vec::with_capacity(goals.len());

    for goal in goals {
        let start_date = cursor;
        let months_needed = months_needed(goal);
        let completion_date = add_months(start_date, months_needed);
        cursor = completion_date;

        projections.push(GoalProjection {
            goal_id: goal.id,
            start_date,
            completion_date,
            months_needed,
            status: derive_status(goal, start_date, completion_date, now),
            progress_percent: progress_percent(goal),
        });
    }

    projections
}

/// Fractional months of contributions needed to close the gap.
///
/// Only positive when something is left to save and the contribution is
/// positive; every other sign combination yields 0.
pub fn months_needed(goal: &Goal) -> f64 {
    let remaining = goal.remaining_amount();
    if remaining > 0.0 && goal.monthly_contribution > 0.0 {
        remaining / goal.monthly_contribution
    } else {
        0.0
    }
}

fn derive_status(
    goal: &Goal,
    start_date: NaiveDateTime,
    completion_date: NaiveDateTime,
    now: NaiveDateTime,
) -> GoalStatus {
    if goal.target_amount > 0.0 && goal.current_amount >= goal.target_amount {
        GoalStatus::Completed
    } else if start_date <= now && now < completion_date {
        GoalStatus::Active
    } else {
        GoalStatus::Pending
    }
}

/// Saved share of the target, in [0, 100]. A non-positive target counts as
/// fully funded.
pub fn progress_percent(goal: &Goal) -> f64 {
    if goal.target_amount <= 0.0 {
        return 100.0;
    }
    (goal.current_amount / goal.target_amount * 100.0).clamp(0.0, 100.0)
}

/// Advance `start` by whole calendar months.
///
/// The fractional part of `months` is dropped rather than prorated into
/// days. A day of month that does not exist in the target month spills over
/// into the next one (Jan 31 + 1 month lands in early March). Results
/// outside the representable range saturate.
pub fn add_months(start: NaiveDateTime, months: f64) -> NaiveDateTime {
    let whole = months.trunc();
    if whole == 0.0 || whole.is_nan() {
        return start;
    }

    let saturated = if whole > 0.0 {
        NaiveDateTime::MAX
    } else {
        NaiveDateTime::MIN
    };

    if !whole.is_finite() || whole.abs() > i32::MAX as f64 {
        log::warn!(
            "Month offset {} out of calendar range, saturating projection",
            months
        );
        return saturated;
    }

    match shift_months(start, whole as i64) {
        Some(shifted) => shifted,
        None => {
            log::warn!(
                "Adding {} months to {} leaves the calendar range, saturating projection",
                whole,
                start
            );
            saturated
        }
    }
}

fn shift_months(start: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let month_index = i64::from(start.year()) * 12 + i64::from(start.month0()) + months;
    let year = i32::try_from(month_index.div_euclid(12)).ok()?;
    let month = u32::try_from(month_index.rem_euclid(12)).ok()? + 1;

    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let date = first_of_month.checked_add_days(Days::new(u64::from(start.day0())))?;
    Some(date.and_time(start.time()))
}

/// Aggregate totals over a goal list and its projection.
pub fn summarize(goals: &[Goal], projections: &[GoalProjection]) -> TimelineSummary {
    if goals.is_empty() {
        return TimelineSummary::default();
    }

    let total_target: f64 = goals.iter().map(|g| g.target_amount).sum();
    let total_saved: f64 = goals.iter().map(|g| g.current_amount).sum();
    let total_monthly_contribution: f64 = goals
        .iter()
        .map(|g| g.monthly_contribution)
        .filter(|c| *c > 0.0)
        .sum();

    let overall_progress_percent = if total_target <= 0.0 {
        100.0
    } else {
        let ratio = total_saved / total_target * 100.0;
        if ratio.is_nan() {
            // totals overflowed to infinity
            if total_saved >= total_target {
                100.0
            } else {
                0.0
            }
        } else {
            ratio.clamp(0.0, 100.0)
        }
    };

    TimelineSummary {
        goal_count: goals.len(),
        completed_count: projections
            .iter()
            .filter(|p| p.status == GoalStatus::Completed)
            .count(),
        total_target,
        total_saved,
        total_monthly_contribution,
        overall_progress_percent,
        final_completion_date: projections.last().map(|p| p.completion_date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::goals_model::{GoalId, NewGoal};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn goal(id: i64, target: f64, current: f64, monthly: f64) -> Goal {
        Goal::from_new(
            GoalId(id),
            NewGoal::new(format!("goal {}", id), target, monthly).with_current_amount(current),
        )
    }

    #[test]
    fn empty_list_projects_to_nothing() {
        assert!(project(&[], at(2025, 1, 1)).is_empty());
        assert_eq!(summarize(&[], &[]), TimelineSummary::default());
    }

    #[test]
    fn four_months_for_thousand_at_two_fifty() {
        let now = at(2025, 1, 15);
        let projections = project(&[goal(1, 1000.0, 0.0, 250.0)], now);

        assert_eq!(projections[0].months_needed, 4.0);
        assert_eq!(projections[0].start_date, now);
        assert_eq!(projections[0].completion_date, at(2025, 5, 15));
        assert_eq!(projections[0].status, GoalStatus::Active);
        assert_eq!(projections[0].progress_percent, 0.0);
    }

    #[test]
    fn funded_goal_is_completed_and_takes_no_time() {
        let now = at(2025, 1, 15);
        let projections = project(&[goal(1, 1000.0, 1000.0, 250.0)], now);

        assert_eq!(projections[0].months_needed, 0.0);
        assert_eq!(projections[0].completion_date, now);
        assert_eq!(projections[0].status, GoalStatus::Completed);
        assert_eq!(projections[0].progress_percent, 100.0);
    }

    #[test]
    fn goals_chain_through_the_cursor() {
        let now = at(2025, 1, 1);
        let goals = vec![
            goal(1, 600.0, 0.0, 100.0),
            goal(2, 1200.0, 200.0, 500.0),
            goal(3, 300.0, 0.0, 100.0),
        ];
        let projections = project(&goals, now);

        assert_eq!(projections[0].completion_date, at(2025, 7, 1));
        assert_eq!(projections[1].start_date, at(2025, 7, 1));
        assert_eq!(projections[1].months_needed, 2.0);
        assert_eq!(projections[1].completion_date, at(2025, 9, 1));
        assert_eq!(projections[2].start_date, at(2025, 9, 1));
        assert_eq!(projections[2].completion_date, at(2025, 12, 1));

        assert_eq!(projections[0].status, GoalStatus::Active);
        assert_eq!(projections[1].status, GoalStatus::Pending);
        assert_eq!(projections[2].status, GoalStatus::Pending);
    }

    #[test]
    fn fractional_months_are_truncated() {
        let now = at(2025, 1, 10);
        let projections = project(&[goal(1, 1000.0, 0.0, 400.0)], now);

        assert_eq!(projections[0].months_needed, 2.5);
        assert_eq!(projections[0].completion_date, at(2025, 3, 10));
    }

    #[test]
    fn month_overflow_rolls_into_next_year() {
        assert_eq!(add_months(at(2025, 11, 20), 3.0), at(2026, 2, 20));
        assert_eq!(add_months(at(2025, 6, 1), 30.0), at(2027, 12, 1));
    }

    #[test]
    fn missing_day_of_month_spills_forward() {
        assert_eq!(add_months(at(2025, 1, 31), 1.0), at(2025, 3, 3));
        assert_eq!(add_months(at(2024, 1, 31), 1.0), at(2024, 3, 2));
        assert_eq!(add_months(at(2025, 3, 31), 1.0), at(2025, 5, 1));
    }

    #[test]
    fn absurd_offsets_saturate() {
        assert_eq!(add_months(at(2025, 1, 1), 1e15), NaiveDateTime::MAX);
        assert_eq!(add_months(at(2025, 1, 1), f64::INFINITY), NaiveDateTime::MAX);
        assert_eq!(add_months(at(2025, 1, 1), f64::NAN), at(2025, 1, 1));
    }

    #[test]
    fn negative_or_zero_contribution_needs_no_months() {
        let now = at(2025, 1, 1);
        let projections = project(
            &[
                goal(1, 1000.0, 0.0, -50.0),
                goal(2, 1000.0, 0.0, 0.0),
                goal(3, 1000.0, 1500.0, 100.0),
            ],
            now,
        );

        assert!(projections.iter().all(|p| p.months_needed == 0.0));
        assert!(projections.iter().all(|p| p.completion_date == now));
        assert_eq!(projections[0].status, GoalStatus::Pending);
        assert_eq!(projections[2].status, GoalStatus::Completed);
    }

    #[test]
    fn zero_target_is_fully_funded_but_not_completed() {
        let g = goal(1, 0.0, 0.0, 0.0);
        assert_eq!(progress_percent(&g), 100.0);

        let projections = project(&[g], at(2025, 1, 1));
        assert_eq!(projections[0].months_needed, 0.0);
        assert_eq!(projections[0].status, GoalStatus::Pending);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(progress_percent(&goal(1, 100.0, 250.0, 0.0)), 100.0);
        assert_eq!(progress_percent(&goal(1, 100.0, -20.0, 0.0)), 0.0);
        assert_eq!(progress_percent(&goal(1, 200.0, 50.0, 0.0)), 25.0);
    }

    #[test]
    fn summary_totals() {
        let now = at(2025, 1, 1);
        let goals = vec![
            goal(1, 1000.0, 1000.0, 0.0),
            goal(2, 3000.0, 1000.0, 500.0),
            goal(3, 0.0, 0.0, -10.0),
        ];
        let projections = project(&goals, now);
        let summary = summarize(&goals, &projections);

        assert_eq!(summary.goal_count, 3);
        assert_eq!(summary.completed_count, 1);
        assert_eq!(summary.total_target, 4000.0);
        assert_eq!(summary.total_saved, 2000.0);
        assert_eq!(summary.total_monthly_contribution, 500.0);
        assert_eq!(summary.overall_progress_percent, 50.0);
        assert_eq!(summary.final_completion_date, Some(at(2025, 5, 1)));
    }

    #[test]
    fn summary_progress_stays_in_range_when_totals_overflow() {
        let now = at(2025, 1, 1);
        let goals = vec![goal(1, 1e308, 1e308, 0.0), goal(2, 1e308, 1e308, 0.0)];
        let summary = summarize(&goals, &project(&goals, now));

        assert!(summary.total_target.is_infinite());
        assert_eq!(summary.overall_progress_percent, 100.0);

        let goals = vec![goal(1, 1e308, 0.0, 0.0), goal(2, 1e308, 0.0, 0.0)];
        let summary = summarize(&goals, &project(&goals, now));
        assert_eq!(summary.overall_progress_percent, 0.0);
    }
}
