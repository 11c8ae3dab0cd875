//! Number transform

use serde_json::{Number, Value};
use wireform::Transform;

/// Coerces numeric-looking input to a JSON number
///
/// Numbers pass through, numeric strings parse, booleans map to 1/0, and
/// everything else (including NaN/infinite parses) becomes null. Integral
/// results are emitted as JSON integers.
pub struct NumberTransform;

fn from_f64(f: f64) -> Value {
	if f.is_finite() && f.fract() == 0.0 && (i64::MIN as f64..=i64::MAX as f64).contains(&f) {
		return Value::Number(Number::from(f as i64));
	}
	Number::from_f64(f).map_or(Value::Null, Value::Number)
}

fn to_number_value(value: &Value) -> Value {
	match value {
		Value::Number(_) => value.clone(),
		Value::String(s) => s.trim().parse::<f64>().map_or(Value::Null, from_f64),
		Value::Bool(b) => Value::Number(Number::from(i64::from(*b))),
		_ => Value::Null,
	}
}

impl Transform for NumberTransform {
	fn data_type(&self) -> &str {
		"number"
	}

	fn serialize(&self, value: Option<&Value>) -> Option<Value> {
		Some(value.map_or(Value::Null, to_number_value))
	}

	fn deserialize(&self, value: Option<&Value>) -> Option<Value> {
		Some(value.map_or(Value::Null, to_number_value))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case::integer(json!(42), json!(42))]
	#[case::float(json!(1.5), json!(1.5))]
	#[case::numeric_string(json!("42"), json!(42))]
	#[case::float_string(json!(" 1.5 "), json!(1.5))]
	#[case::bool_true(json!(true), json!(1))]
	#[case::bool_false(json!(false), json!(0))]
	#[case::word(json!("forty"), Value::Null)]
	#[case::empty_string(json!(""), Value::Null)]
	#[case::null(Value::Null, Value::Null)]
	#[case::object(json!({}), Value::Null)]
	fn coerces_both_directions(#[case] input: Value, #[case] expected: Value) {
		let t = NumberTransform;
		assert_eq!(t.serialize(Some(&input)), Some(expected.clone()));
		assert_eq!(t.deserialize(Some(&input)), Some(expected));
	}

	#[test]
	fn absent_becomes_null() {
		let t = NumberTransform;
		assert_eq!(t.serialize(None), Some(Value::Null));
		assert_eq!(t.deserialize(None), Some(Value::Null));
	}

	#[test]
	fn integral_floats_come_out_as_integers() {
		let t = NumberTransform;
		assert_eq!(t.deserialize(Some(&json!("3.0"))), Some(json!(3)));
	}

	#[test]
	fn infinities_become_null() {
		let t = NumberTransform;
		assert_eq!(t.deserialize(Some(&json!("inf"))), Some(Value::Null));
		assert_eq!(t.deserialize(Some(&json!("NaN"))), Some(Value::Null));
	}
}
