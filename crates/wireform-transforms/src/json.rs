//! JSON-column transform

use serde_json::Value;
use wireform::Transform;

/// Converts between JSON text (wire) and structured values (internal)
///
/// Serialize emits compact JSON text, re-encoding strings that already hold
/// JSON and falling back to `"{}"` for anything unusable. Deserialize parses
/// JSON text, passes structured values through, and maps null to an empty
/// object.
pub struct JsonTransform;

fn encode(value: &Value) -> String {
	serde_json::to_string(value).unwrap_or_else(|_| "{}".to_owned())
}

impl Transform for JsonTransform {
	fn data_type(&self) -> &str {
		"json"
	}

	fn serialize(&self, value: Option<&Value>) -> Option<Value> {
		let text = match value {
			Some(v @ (Value::Object(_) | Value::Array(_))) => encode(v),
			Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
				Ok(parsed) => encode(&parsed),
				Err(_) => "{}".to_owned(),
			},
			_ => "{}".to_owned(),
		};
		Some(Value::String(text))
	}

	fn deserialize(&self, value: Option<&Value>) -> Option<Value> {
		let parsed = match value {
			Some(v @ (Value::Object(_) | Value::Array(_))) => v.clone(),
			Some(v @ (Value::Number(_) | Value::Bool(_))) => v.clone(),
			Some(Value::String(s)) => {
				serde_json::from_str(s).unwrap_or_else(|_| Value::Object(Default::default()))
			}
			_ => Value::Object(Default::default()),
		};
		Some(parsed)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn serialize_stringifies_structured_values() {
		let t = JsonTransform;
		assert_eq!(
			t.serialize(Some(&json!({ "a": 1 }))),
			Some(json!("{\"a\":1}")),
		);
		assert_eq!(t.serialize(Some(&json!([1, 2]))), Some(json!("[1,2]")));
	}

	#[test]
	fn serialize_reencodes_json_text_and_rejects_garbage() {
		let t = JsonTransform;
		assert_eq!(
			t.serialize(Some(&json!("{ \"a\": 1 }"))),
			Some(json!("{\"a\":1}")),
		);
		assert_eq!(t.serialize(Some(&json!("not json"))), Some(json!("{}")));
		assert_eq!(t.serialize(None), Some(json!("{}")));
		assert_eq!(t.serialize(Some(&Value::Null)), Some(json!("{}")));
	}

	#[test]
	fn deserialize_parses_text_and_passes_objects() {
		let t = JsonTransform;
		assert_eq!(
			t.deserialize(Some(&json!("{\"a\":1}"))),
			Some(json!({ "a": 1 })),
		);
		assert_eq!(
			t.deserialize(Some(&json!({ "a": 1 }))),
			Some(json!({ "a": 1 })),
		);
		assert_eq!(t.deserialize(Some(&Value::Null)), Some(json!({})));
		assert_eq!(t.deserialize(Some(&json!("broken {"))), Some(json!({})));
		assert_eq!(t.deserialize(None), Some(json!({})));
	}

	#[test]
	fn round_trips_structured_values() {
		let t = JsonTransform;
		let original = json!({ "nested": { "list": [1, 2, 3] } });
		let wire = t.serialize(Some(&original)).unwrap();
		assert_eq!(t.deserialize(Some(&wire)), Some(original));
	}
}
