//! Boolean transform

use serde_json::Value;
use wireform::Transform;

/// Coerces loose truthy input to a boolean
///
/// Booleans pass through; the strings `true`, `t`, `1`, and `y` (any case)
/// read as true; the number 1 reads as true; everything else, including
/// absent and null input, is false.
pub struct BooleanTransform;

fn to_bool_value(value: Option<&Value>) -> Value {
	let truthy = match value {
		Some(Value::Bool(b)) => *b,
		Some(Value::String(s)) => {
			matches!(s.to_ascii_lowercase().as_str(), "true" | "t" | "1" | "y")
		}
		Some(Value::Number(n)) => n.as_f64() == Some(1.0),
		_ => false,
	};
	Value::Bool(truthy)
}

impl Transform for BooleanTransform {
	fn data_type(&self) -> &str {
		"boolean"
	}

	fn serialize(&self, value: Option<&Value>) -> Option<Value> {
		Some(to_bool_value(value))
	}

	fn deserialize(&self, value: Option<&Value>) -> Option<Value> {
		Some(to_bool_value(value))
	}

	fn normalize(&self, value: Option<&Value>) -> Option<Value> {
		Some(to_bool_value(value))
	}
}
