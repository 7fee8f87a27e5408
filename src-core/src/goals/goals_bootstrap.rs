use serde_json::Value;

use crate::errors::{Result, ValidationError};
use crate::goals::goals_model::Goal;

/// Parse an embedded goals payload. The top level must be a JSON array.
pub fn parse_goals_json(payload: &str) -> Result<Vec<Goal>> {
    let value: Value = serde_json::from_str(payload)?;
    if !value.is_array() {
        return Err(ValidationError::InvalidInput(format!(
            "Goals payload must be an array, got {}",
            json_kind(&value)
        ))
        .into());
    }
    Ok(serde_json::from_value(value)?)
}

/// Parse an embedded goals payload, falling back to an empty list.
pub fn load_goals_json(payload: &str) -> Vec<Goal> {
    match parse_goals_json(payload) {
        Ok(goals) => goals,
        Err(e) => {
            log::warn!("Failed to load goals payload, starting empty: {}", e);
            Vec::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
