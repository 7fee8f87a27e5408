pub mod drag_reorder;
pub mod goal_progress_model;
pub mod goals_bootstrap;
pub mod goals_model;
pub mod goals_store;
pub mod goals_traits;
pub mod timeline_projector;

pub use drag_reorder::{parse_drag_payload, DragReorderController};
pub use goal_progress_model::{GoalProjection, TimelineSummary};
pub use goals_bootstrap::{load_goals_json, parse_goals_json};
pub use goals_model::{Goal, GoalId, GoalStatus, GoalType, NewGoal};
pub use goals_store::GoalStore;
pub use goals_traits::{Clock, FixedClock, GoalStoreTrait, SystemClock};
pub use timeline_projector::{add_months, progress_percent, project, summarize};
