use std::collections::HashSet;

use crate::errors::{Error, Result};
use crate::goals::goal_progress_model::{GoalProjection, TimelineSummary};
use crate::goals::goals_bootstrap::load_goals_json;
use crate::goals::goals_model::{Goal, GoalId, NewGoal};
use crate::goals::goals_traits::{Clock, GoalStoreTrait};
use crate::goals::timeline_projector;

/// Canonical ordered list of goals.
///
/// All mutation goes through identifier-addressed operations, and each of
/// them reprojects the full timeline, so the derived `start_date`,
/// `completion_date` and `status` of every held goal are always current.
pub struct GoalStore<C: Clock> {
    goals: Vec<Goal>,
    projections: Vec<GoalProjection>,
    last_issued_id: i64,
    clock: C,
}

impl<C: Clock> GoalStore<C> {
    pub fn new(clock: C) -> Self {
        GoalStore {
            goals: Vec::new(),
            projections: Vec::new(),
            last_issued_id: 0,
            clock,
        }
    }

    /// Seed the store with existing records, keeping their order.
    ///
    /// Later records repeating an identifier are dropped, and records with a
    /// non-positive identifier get a fresh one.
    pub fn with_goals(goals: Vec<Goal>, clock: C) -> Self {
        let mut store = GoalStore::new(clock);
        store.last_issued_id = goals.iter().map(|g| g.id.0).max().unwrap_or(0).max(0);

        let reserved: HashSet<GoalId> = goals
            .iter()
            .map(|g| g.id)
            .filter(|id| id.0 > 0)
            .collect();
        let mut seen = HashSet::with_capacity(goals.len());
        for mut goal in goals {
            if goal.id.0 <= 0 {
                let fresh = store.issue_id(&reserved);
                log::warn!(
                    "Goal '{}' has invalid id {}, assigning {}",
                    goal.title,
                    goal.id,
                    fresh
                );
                goal.id = fresh;
            }
            if !seen.insert(goal.id) {
                log::warn!("Dropping goal '{}' with duplicate id {}", goal.title, goal.id);
                continue;
            }
            store.goals.push(goal);
        }

        store.refresh();
        store
    }

    /// Seed the store from an embedded JSON payload. A malformed payload
    /// yields an empty store.
    pub fn from_json(payload: &str, clock: C) -> Self {
        GoalStore::with_goals(load_goals_json(payload), clock)
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn projections(&self) -> &[GoalProjection] {
        &self.projections
    }

    pub fn get(&self, goal_id: GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == goal_id)
    }

    pub fn projection(&self, goal_id: GoalId) -> Option<&GoalProjection> {
        self.projections.iter().find(|p| p.goal_id == goal_id)
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn summary(&self) -> TimelineSummary {
        timeline_projector::summarize(&self.goals, &self.projections)
    }

    /// Append a goal under a freshly issued identifier.
    pub fn create(&mut self, new_goal: NewGoal) -> GoalId {
        let id = self.next_id();
        self.goals.push(Goal::from_new(id, new_goal));
        self.refresh();
        id
    }

    /// Replace the goal with the same identifier. Unknown identifiers are
    /// ignored.
    pub fn update(&mut self, goal: Goal) -> bool {
        let replaced = self.replace(goal);
        self.refresh();
        replaced
    }

    /// Like [`GoalStore::update`] but reports an unknown identifier.
    pub fn try_update(&mut self, goal: Goal) -> Result<()> {
        let goal_id = goal.id;
        if self.update(goal) {
            Ok(())
        } else {
            Err(Error::NotFound(goal_id))
        }
    }

    pub fn delete(&mut self, goal_id: GoalId) -> bool {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != goal_id);
        let removed = self.goals.len() != before;
        if !removed {
            log::debug!("Delete of unknown goal {} ignored", goal_id);
        }
        self.refresh();
        removed
    }

    /// Move `source_id` to the position currently held by `target_id`.
    ///
    /// Everything else keeps its relative order. No-op when the identifiers
    /// are equal or either is missing.
    pub fn reorder(&mut self, source_id: GoalId, target_id: GoalId) -> bool {
        let moved = self.move_goal(source_id, target_id);
        self.refresh();
        moved
    }

    /// Recompute the timeline against the clock's current time.
    pub fn refresh(&mut self) {
        let now = self.clock.now();
        self.projections = timeline_projector::project(&self.goals, now);

        for (goal, projection) in self.goals.iter_mut().zip(&self.projections) {
            goal.start_date = Some(projection.start_date);
            goal.completion_date = Some(projection.completion_date);
            goal.status = projection.status;
        }
    }

    fn replace(&mut self, goal: Goal) -> bool {
        match self.goals.iter_mut().find(|g| g.id == goal.id) {
            Some(slot) => {
                *slot = goal;
                true
            }
            None => {
                log::debug!("Update of unknown goal {} ignored", goal.id);
                false
            }
        }
    }

    fn move_goal(&mut self, source_id: GoalId, target_id: GoalId) -> bool {
        if source_id == target_id {
            return false;
        }
        let source_index = self.goals.iter().position(|g| g.id == source_id);
        let target_index = self.goals.iter().position(|g| g.id == target_id);

        match (source_index, target_index) {
            (Some(from), Some(to)) => {
                let goal = self.goals.remove(from);
                self.goals.insert(to, goal);
                true
            }
            _ => {
                log::debug!(
                    "Reorder of {} onto {} ignored, goal not found",
                    source_id,
                    target_id
                );
                false
            }
        }
    }

    fn next_id(&mut self) -> GoalId {
        self.issue_id(&HashSet::new())
    }

    /// Issue the id after the highest one seen so far. Once that counter is
    /// exhausted, fall back to the smallest positive id not held by a goal
    /// or listed in `reserved`.
    fn issue_id(&mut self, reserved: &HashSet<GoalId>) -> GoalId {
        if let Some(next) = self.last_issued_id.checked_add(1) {
            self.last_issued_id = next;
            return GoalId(next);
        }

        let taken: HashSet<GoalId> = self
            .goals
            .iter()
            .map(|g| g.id)
            .chain(reserved.iter().copied())
            .collect();
        // `taken` is finite, so a free id exists well below i64::MAX
        let mut candidate = 1;
        while taken.contains(&GoalId(candidate)) {
            candidate += 1;
        }
        log::warn!(
            "Goal id counter exhausted at {}, reusing free id {}",
            self.last_issued_id,
            candidate
        );
        GoalId(candidate)
    }
}

impl<C: Clock> GoalStoreTrait for GoalStore<C> {
    fn goals(&self) -> &[Goal] {
        GoalStore::goals(self)
    }

    fn create(&mut self, new_goal: NewGoal) -> GoalId {
        GoalStore::create(self, new_goal)
    }

    fn update(&mut self, goal: Goal) -> bool {
        GoalStore::update(self, goal)
    }

    fn delete(&mut self, goal_id: GoalId) -> bool {
        GoalStore::delete(self, goal_id)
    }

    fn reorder(&mut self, source_id: GoalId, target_id: GoalId) -> bool {
        GoalStore::reorder(self, source_id, target_id)
    }
}
