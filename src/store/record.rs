// Record helpers shared by store implementations
use serde_json::{Map, Value};
use uuid::Uuid;

use super::StoreError;

pub const ID_FIELD: &str = "id";
pub const CREATED_AT_FIELD: &str = "createdAt";
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// Path ids arrive as text; stored ids may be strings or numbers.
pub fn id_matches(record: &Value, id: &str) -> bool {
    match record.get(ID_FIELD) {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    }
}

pub fn id_text(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Next integer id when every record has an integer id, otherwise a uuid.
pub fn next_id(records: &[Value]) -> Value {
    let mut max: Option<i64> = None;
    for record in records {
        match record.get(ID_FIELD).and_then(Value::as_i64) {
            Some(id) => max = Some(max.map_or(id, |m| m.max(id))),
            None => return Value::String(Uuid::new_v4().simple().to_string()),
        }
    }
    match max {
        Some(m) => Value::from(m + 1),
        None => Value::String(Uuid::new_v4().simple().to_string()),
    }
}

pub fn into_object(value: Value) -> Result<Map<String, Value>, StoreError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidRecord(format!(
            "expected a JSON object, got {}",
            type_name(&other)
        ))),
    }
}

/// Shallow merge; `id` and `createdAt` are never taken from `changes`.
pub fn merge(target: &mut Map<String, Value>, changes: Map<String, Value>) {
    for (key, value) in changes {
        if key == ID_FIELD || key == CREATED_AT_FIELD {
            continue;
        }
        target.insert(key, value);
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
