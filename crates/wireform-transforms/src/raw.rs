//! Identity transform

use serde_json::Value;
use wireform::{Transform, pass_through};

/// Passes values through unchanged on every entry point
///
/// Useful for fields whose wire and internal representations already match,
/// or as a placeholder while a schema is being sketched out.
pub struct PassThroughTransform;

impl Transform for PassThroughTransform {
	fn data_type(&self) -> &str {
		"raw"
	}

	fn serialize(&self, value: Option<&Value>) -> Option<Value> {
		pass_through(value)
	}

	fn deserialize(&self, value: Option<&Value>) -> Option<Value> {
		pass_through(value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use wireform::Op;

	#[test]
	fn passes_everything_through() {
		let t = PassThroughTransform;
		for value in [json!(1), json!("x"), json!([1, 2]), json!({ "a": 1 }), Value::Null] {
			assert_eq!(t.serialize(Some(&value)), Some(value.clone()));
			assert_eq!(t.deserialize(Some(&value)), Some(value.clone()));
			assert_eq!(t.normalize(Some(&value)), Some(value));
		}
	}

	#[test]
	fn absent_stays_absent() {
		let t = PassThroughTransform;
		assert_eq!(t.apply(Op::Serialize, None), None);
		assert_eq!(t.apply(Op::Deserialize, None), None);
	}
}
