use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable numeric identifier of a goal within one store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(pub i64);

impl GoalId {
    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for GoalId {
    fn from(value: i64) -> Self {
        GoalId(value)
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category tag of a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    EmergencyFund,
    Retirement,
    Home,
    Education,
    Travel,
    Vehicle,
    DebtPayoff,
    Investment,
    #[serde(other)]
    Other,
}

/// Display status, derived from the timeline projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Pending,
    Active,
    Completed,
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GoalStatus::Pending => "pending",
            GoalStatus::Active => "active",
            GoalStatus::Completed => "completed",
        };
        f.write_str(label)
    }
}

/// A tracked financial goal.
///
/// `start_date`, `completion_date` and `status` are owned by the projection:
/// whatever a caller puts there is overwritten the next time the store
/// recomputes the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    #[serde(default)]
    pub monthly_contribution: f64,
    #[serde(default)]
    pub goal_type: Option<GoalType>,
    #[serde(default, with = "iso_datetime")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default, with = "iso_datetime")]
    pub completion_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: GoalStatus,
}

impl Goal {
    pub fn from_new(id: GoalId, new_goal: NewGoal) -> Self {
        Goal {
            id,
            title: new_goal.title,
            description: new_goal.description,
            target_amount: new_goal.target_amount,
            current_amount: new_goal.current_amount,
            monthly_contribution: new_goal.monthly_contribution,
            goal_type: new_goal.goal_type,
            start_date: None,
            completion_date: None,
            status: GoalStatus::Pending,
        }
    }

    /// Amount still missing to reach the target, never negative
    pub fn remaining_amount(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }
}

/// Goal data supplied by the author before an identifier is assigned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewGoal {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    #[serde(default)]
    pub monthly_contribution: f64,
    #[serde(default)]
    pub goal_type: Option<GoalType>,
}

impl NewGoal {
    pub fn new(title: impl Into<String>, target_amount: f64, monthly_contribution: f64) -> Self {
        NewGoal {
            title: title.into(),
            target_amount,
            monthly_contribution,
            ..Default::default()
        }
    }

    pub fn with_current_amount(mut self, current_amount: f64) -> Self {
        self.current_amount = current_amount;
        self
    }

    pub fn with_goal_type(mut self, goal_type: GoalType) -> Self {
        self.goal_type = Some(goal_type);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Derived dates travel as ISO strings. Both full timestamps and bare dates
/// are accepted; anything else is dropped since the store recomputes them.
mod iso_datetime {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(OUTPUT_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse))
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_utc());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(dt);
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0);
        }
        log::debug!("Ignoring unparseable goal date '{}'", raw);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn deserializes_reference_payload_shape() {
        let json = r#"{
            "id": 3,
            "title": "Emergency fund",
            "description": null,
            "target_amount": 5000,
            "current_amount": 1200.5,
            "monthly_contribution": 300,
            "goal_type": "emergency_fund",
            "start_date": "2025-01-01T00:00:00.000Z",
            "completion_date": "2025-06-01",
            "status": "active"
        }"#;

        let goal: Goal = serde_json::from_str(json).unwrap();
        assert_eq!(goal.id, GoalId(3));
        assert_eq!(goal.goal_type, Some(GoalType::EmergencyFund));
        assert_eq!(goal.status, GoalStatus::Active);
        assert_eq!(
            goal.start_date,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(
            goal.completion_date,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(0, 0, 0)
        );
    }

    #[test]
    fn unknown_goal_type_maps_to_other() {
        let goal: Goal =
            serde_json::from_str(r#"{"id": 1, "title": "Boat", "goal_type": "sailing"}"#).unwrap();
        assert_eq!(goal.goal_type, Some(GoalType::Other));
        assert_eq!(goal.status, GoalStatus::Pending);
        assert!(goal.start_date.is_none());
    }

    #[test]
    fn garbage_date_is_dropped() {
        assert!(iso_datetime::parse("next tuesday").is_none());
    }

    #[test]
    fn serializes_dates_as_iso_strings() {
        let mut goal = Goal::from_new(GoalId(7), NewGoal::new("Car", 10_000.0, 500.0));
        goal.start_date = NaiveDate::from_ymd_opt(2026, 3, 4)
            .unwrap()
            .and_hms_opt(10, 30, 0);

        let value = serde_json::to_value(&goal).unwrap();
        assert_eq!(value["start_date"], "2026-03-04T10:30:00.000");
        assert!(value["completion_date"].is_null());
        assert_eq!(value["status"], "pending");
        assert_eq!(value["id"], 7);
    }

    #[test]
    fn new_goal_builders_fill_optional_fields() {
        let new_goal = NewGoal::new("Down payment", 40_000.0, 1_500.0)
            .with_description("two bedroom")
            .with_goal_type(GoalType::Home)
            .with_current_amount(5_000.0);
        let goal = Goal::from_new(GoalId::from(12), new_goal);

        assert_eq!(goal.id.value(), 12);
        assert_eq!(goal.description.as_deref(), Some("two bedroom"));
        assert_eq!(goal.goal_type, Some(GoalType::Home));
        assert_eq!(goal.current_amount, 5_000.0);
        assert_eq!(goal.remaining_amount(), 35_000.0);

        let value = serde_json::to_value(&goal).unwrap();
        assert_eq!(value["goal_type"], "home");
    }

    #[test]
    fn remaining_amount_is_clamped() {
        let goal = Goal::from_new(
            GoalId(1),
            NewGoal::new("Done", 100.0, 10.0).with_current_amount(150.0),
        );
        assert_eq!(goal.remaining_amount(), 0.0);
    }
}
