//! String transform

use serde_json::Value;
use wireform::Transform;

/// Coerces any scalar to its string form
///
/// Serialize and deserialize map absent and null input to null; normalize
/// maps them to the empty string. Numbers and booleans are stringified;
/// structured values are rendered as compact JSON text.
pub struct StringTransform;

fn to_string_value(value: &Value) -> Value {
	match value {
		Value::String(_) => value.clone(),
		Value::Null => Value::Null,
		Value::Number(n) => Value::String(n.to_string()),
		Value::Bool(b) => Value::String(b.to_string()),
		other => Value::String(other.to_string()),
	}
}

impl Transform for StringTransform {
	fn data_type(&self) -> &str {
		"string"
	}

	fn serialize(&self, value: Option<&Value>) -> Option<Value> {
		Some(value.map_or(Value::Null, to_string_value))
	}

	fn deserialize(&self, value: Option<&Value>) -> Option<Value> {
		Some(value.map_or(Value::Null, to_string_value))
	}

	fn normalize(&self, value: Option<&Value>) -> Option<Value> {
		match value.map(to_string_value) {
			Some(Value::Null) | None => Some(Value::String(String::new())),
			Some(other) => Some(other),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn serialize_passes_strings_and_nullifies_absence() {
		let t = StringTransform;
		assert_eq!(t.serialize(Some(&json!("abc"))), Some(json!("abc")));
		assert_eq!(t.serialize(Some(&json!(""))), Some(json!("")));
		assert_eq!(t.serialize(None), Some(Value::Null));
		assert_eq!(t.serialize(Some(&Value::Null)), Some(Value::Null));
	}

	#[test]
	fn serialize_coerces_scalars() {
		let t = StringTransform;
		assert_eq!(t.serialize(Some(&json!(5))), Some(json!("5")));
		assert_eq!(t.serialize(Some(&json!(true))), Some(json!("true")));
	}

	#[test]
	fn deserialize_mirrors_serialize() {
		let t = StringTransform;
		assert_eq!(t.deserialize(Some(&json!("abc"))), Some(json!("abc")));
		assert_eq!(t.deserialize(Some(&json!(5))), Some(json!("5")));
		assert_eq!(t.deserialize(None), Some(Value::Null));
	}

	#[test]
	fn normalize_maps_absence_to_empty_string() {
		let t = StringTransform;
		assert_eq!(t.normalize(None), Some(json!("")));
		assert_eq!(t.normalize(Some(&Value::Null)), Some(json!("")));
		assert_eq!(t.normalize(Some(&json!("kept"))), Some(json!("kept")));
		assert_eq!(t.normalize(Some(&json!(5))), Some(json!("5")));
	}
}
