use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Status every task starts in. Task workflow beyond creation lives in the
/// client; the backend only pins the starting point.
pub const INITIAL_STATUS: &str = "to-do";

/// A task as stored: whatever object the client submitted, kept as-is in
/// `details`, plus the two server-owned fields.
#[derive(Debug, Serialize)]
pub struct TaskRecord {
    pub id: Uuid,
    pub details: Map<String, Value>,
    pub status: String,
    #[serde(rename = "lastUpdate")]
    pub last_update: DateTime<Utc>,
}

impl TaskRecord {
    /// Builds a storable record from the fields the caller sent.
    ///
    /// `status` and `lastUpdate` belong to the server: any copies in the
    /// submitted object are dropped, and the record is stamped with
    /// [`INITIAL_STATUS`] and the current time.
    pub fn stamped(mut fields: Map<String, Value>) -> Self {
        fields.remove("status");
        fields.remove("lastUpdate");
        Self {
            id: Uuid::new_v4(),
            details: fields,
            status: INITIAL_STATUS.to_string(),
            last_update: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_stamping_overrides_reserved_fields() {
        let record = TaskRecord::stamped(fields(json!({
            "title": "Ship the release",
            "status": "done",
            "lastUpdate": "2020-01-01T00:00:00Z"
        })));

        assert_eq!(record.status, INITIAL_STATUS);
        assert_eq!(record.details.get("title"), Some(&json!("Ship the release")));
        assert!(record.details.get("status").is_none());
        assert!(record.details.get("lastUpdate").is_none());

        let age = Utc::now() - record.last_update;
        assert!(age.num_seconds().abs() < 60);
    }

    #[test]
    fn test_stamping_keeps_arbitrary_fields() {
        let record = TaskRecord::stamped(fields(json!({
            "title": "Write docs",
            "assignee": "dev@example.com",
            "tags": ["docs", "low"],
            "nested": { "a": 1 }
        })));

        assert_eq!(record.details.len(), 4);
        assert_eq!(record.details.get("tags"), Some(&json!(["docs", "low"])));
        assert_eq!(record.details.get("nested"), Some(&json!({ "a": 1 })));
    }

    #[test]
    fn test_stamped_ids_are_unique() {
        let a = TaskRecord::stamped(Map::new());
        let b = TaskRecord::stamped(Map::new());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serialized_field_names() {
        let record = TaskRecord::stamped(Map::new());
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("lastUpdate").is_some());
        assert_eq!(value.get("status"), Some(&json!(INITIAL_STATUS)));
    }
}
