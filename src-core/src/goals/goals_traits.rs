use chrono::NaiveDateTime;

use crate::goals::goals_model::{Goal, GoalId, NewGoal};

/// Source of "now" for timeline projection
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Clock pinned to one instant, for tests and replays
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// Identifier-addressed access to the ordered goal list.
///
/// Mutations that reference an unknown identifier are no-ops and report
/// `false`.
pub trait GoalStoreTrait {
    fn goals(&self) -> &[Goal];
    fn create(&mut self, new_goal: NewGoal) -> GoalId;
    fn update(&mut self, goal: Goal) -> bool;
    fn delete(&mut self, goal_id: GoalId) -> bool;
    fn reorder(&mut self, source_id: GoalId, target_id: GoalId) -> bool;
}
