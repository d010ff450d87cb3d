//! Records and batches
//!
//! A record is one Cosmos DB document as an arbitrary JSON object. Ferry never
//! interprets the payload beyond the `id` field and the reserved system fields.

use super::ids::DocumentId;
use serde_json::{Map, Value};

/// One logical document
pub type Record = Map<String, Value>;

/// Records fetched together by one pagination step
pub type Batch = Vec<Record>;

/// Name of the identifier field, also the partition key path of created containers
pub const ID_FIELD: &str = "id";

/// Extract and validate the identifier of a record
///
/// Cosmos DB ids are always strings; a numeric or missing `id` is rejected.
pub fn record_id(record: &Record) -> Result<DocumentId, String> {
    match record.get(ID_FIELD) {
        Some(Value::String(id)) => DocumentId::new(id.as_str()),
        Some(other) => Err(format!(
            "Field '{ID_FIELD}' must be a string, found {}",
            json_type_name(other)
        )),
        None => Err(format!("Record has no '{ID_FIELD}' field")),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_record_id_present() {
        let r = record(json!({"id": "a", "x": 1}));
        assert_eq!(record_id(&r).unwrap().as_str(), "a");
    }

    #[test]
    fn test_record_id_missing() {
        let r = record(json!({"x": 1}));
        let err = record_id(&r).unwrap_err();
        assert!(err.contains("no 'id'"));
    }

    #[test]
    fn test_record_id_wrong_type() {
        let r = record(json!({"id": 7}));
        let err = record_id(&r).unwrap_err();
        assert!(err.contains("number"));
    }

    #[test]
    fn test_record_id_invalid_characters() {
        let r = record(json!({"id": "../escape"}));
        assert!(record_id(&r).is_err());
    }
}
