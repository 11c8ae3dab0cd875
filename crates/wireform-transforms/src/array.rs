//! Array transform

use serde_json::Value;
use wireform::Transform;

/// Coerces list-like input to a JSON array
///
/// Serialize and normalize pass arrays through and flatten everything else
/// to `[]`. Deserialize additionally handles JSON-encoded strings, CSV
/// strings, and objects (taking their values), matching the loose formats a
/// database column may hold.
pub struct ArrayTransform;

fn deserialize_value(value: &Value) -> Value {
	let widened = match value {
		Value::String(s) => {
			if s.trim().is_empty() {
				return Value::Array(Vec::new());
			}
			serde_json::from_str::<Value>(s).unwrap_or_else(|_| {
				Value::Array(
					s.split(',')
						.map(|part| Value::String(part.trim().to_owned()))
						.collect(),
				)
			})
		}
		other => other.clone(),
	};

	match widened {
		Value::Array(_) => widened,
		Value::Object(map) => Value::Array(map.into_iter().map(|(_, v)| v).collect()),
		_ => Value::Array(Vec::new()),
	}
}

impl Transform for ArrayTransform {
	fn data_type(&self) -> &str {
		"array"
	}

	fn serialize(&self, value: Option<&Value>) -> Option<Value> {
		match value {
			Some(v @ Value::Array(_)) => Some(v.clone()),
			_ => Some(Value::Array(Vec::new())),
		}
	}

	fn deserialize(&self, value: Option<&Value>) -> Option<Value> {
		Some(value.map_or_else(|| Value::Array(Vec::new()), deserialize_value))
	}

	fn normalize(&self, value: Option<&Value>) -> Option<Value> {
		match value {
			Some(v @ Value::Array(_)) => Some(v.clone()),
			_ => Some(Value::Array(Vec::new())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn serialize_passes_arrays_and_flattens_the_rest() {
		let t = ArrayTransform;
		assert_eq!(t.serialize(Some(&json!([1, 2]))), Some(json!([1, 2])));
		assert_eq!(t.serialize(Some(&json!("string"))), Some(json!([])));
		assert_eq!(t.serialize(Some(&json!({ "1": "" }))), Some(json!([])));
		assert_eq!(t.serialize(Some(&Value::Null)), Some(json!([])));
		assert_eq!(t.serialize(None), Some(json!([])));
	}

	#[test]
	fn deserialize_parses_json_encoded_strings() {
		let t = ArrayTransform;
		assert_eq!(
			t.deserialize(Some(&json!("[\"1\", \"0\"]"))),
			Some(json!(["1", "0"])),
		);
	}

	#[test]
	fn deserialize_splits_csv_strings() {
		let t = ArrayTransform;
		assert_eq!(t.deserialize(Some(&json!("1, 0"))), Some(json!(["1", "0"])));
		assert_eq!(t.deserialize(Some(&json!("  "))), Some(json!([])));
	}

	#[test]
	fn deserialize_takes_object_values() {
		let t = ArrayTransform;
		assert_eq!(
			t.deserialize(Some(&json!({ "1": "a", "2": "b" }))),
			Some(json!(["a", "b"])),
		);
	}

	#[test]
	fn deserialize_flattens_scalars() {
		let t = ArrayTransform;
		assert_eq!(t.deserialize(Some(&json!(false))), Some(json!([])));
		assert_eq!(t.deserialize(Some(&Value::Null)), Some(json!([])));
		assert_eq!(t.deserialize(None), Some(json!([])));
	}

	#[test]
	fn normalize_does_not_parse_strings() {
		let t = ArrayTransform;
		assert_eq!(t.normalize(Some(&json!("1, 0"))), Some(json!([])));
		assert_eq!(t.normalize(Some(&json!([1, 0]))), Some(json!([1, 0])));
	}
}
