use crate::goals::goals_model::GoalId;
use crate::goals::goals_traits::GoalStoreTrait;

/// Read the dragged goal identifier out of a gesture payload.
///
/// Blank, non-numeric and zero payloads carry no goal.
pub fn parse_drag_payload(payload: &str) -> Option<GoalId> {
    match payload.trim().parse::<i64>() {
        Ok(0) | Err(_) => None,
        Ok(id) => Some(GoalId(id)),
    }
}

/// Tracks one drag gesture over the goal list and applies the drop.
#[derive(Debug, Default)]
pub struct DragReorderController {
    dragging: Option<GoalId>,
    hover_target: Option<GoalId>,
}

impl DragReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin dragging `goal_id`; returns the payload to attach to the gesture.
    pub fn start_drag(&mut self, goal_id: GoalId) -> String {
        self.dragging = Some(goal_id);
        self.hover_target = None;
        goal_id.to_string()
    }

    pub fn drag_over(&mut self, target_id: GoalId) {
        self.hover_target = Some(target_id);
    }

    pub fn drag_leave(&mut self) {
        self.hover_target = None;
    }

    pub fn dragging(&self) -> Option<GoalId> {
        self.dragging
    }

    pub fn hover_target(&self) -> Option<GoalId> {
        self.hover_target
    }

    pub fn cancel(&mut self) {
        self.dragging = None;
        self.hover_target = None;
    }

    /// Drop the dragged goal onto `target_id`.
    ///
    /// Returns whether the store order changed. Drops without a usable
    /// source, or onto the dragged goal itself, are ignored.
    pub fn drop_on<S: GoalStoreTrait + ?Sized>(
        &mut self,
        store: &mut S,
        payload: &str,
        target_id: GoalId,
    ) -> bool {
        self.cancel();

        let Some(source_id) = parse_drag_payload(payload) else {
            log::debug!("Ignoring drop on {} with payload '{}'", target_id, payload);
            return false;
        };
        if source_id == target_id {
            return false;
        }
        store.reorder(source_id, target_id)
    }
}
