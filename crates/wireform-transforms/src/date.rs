//! Date transform

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Value, json};
use wireform::{Op, Transform};

/// Converts between RFC 3339 UTC strings (wire) and epoch milliseconds
/// (internal)
///
/// Serialize accepts epoch milliseconds or any parseable datetime string and
/// emits an RFC 3339 UTC string; deserialize accepts the same inputs and
/// emits epoch milliseconds. Unparseable input becomes null. When the field
/// is wholly absent, the default value is "now" in the representation
/// matching the entry point.
pub struct DateTransform;

fn parse(value: &Value) -> Option<DateTime<Utc>> {
	match value {
		Value::Number(n) => {
			let ms = n.as_i64()?;
			DateTime::from_timestamp_millis(ms)
		}
		Value::String(s) => DateTime::parse_from_rfc3339(s)
			.map(|dt| dt.with_timezone(&Utc))
			.or_else(|_| DateTime::parse_from_rfc2822(s).map(|dt| dt.with_timezone(&Utc)))
			.ok(),
		_ => None,
	}
}

fn to_wire(dt: DateTime<Utc>) -> Value {
	Value::String(dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn to_internal(dt: DateTime<Utc>) -> Value {
	json!(dt.timestamp_millis())
}

impl Transform for DateTransform {
	fn data_type(&self) -> &str {
		"date"
	}

	fn serialize(&self, value: Option<&Value>) -> Option<Value> {
		Some(value.and_then(parse).map_or(Value::Null, to_wire))
	}

	fn deserialize(&self, value: Option<&Value>) -> Option<Value> {
		Some(value.and_then(parse).map_or(Value::Null, to_internal))
	}

	fn default_value(&self, op: Op) -> Option<Value> {
		let now = Utc::now();
		match op {
			Op::Serialize => Some(to_wire(now)),
			Op::Deserialize | Op::Normalize => Some(to_internal(now)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const EPOCH_MS: i64 = 1_482_358_504_452; // 2016-12-21T22:15:04.452Z

	#[test]
	fn serialize_renders_epoch_millis_as_rfc3339() {
		let t = DateTransform;
		assert_eq!(
			t.serialize(Some(&json!(EPOCH_MS))),
			Some(json!("2016-12-21T22:15:04.452Z")),
		);
	}

	#[test]
	fn serialize_normalizes_offset_strings_to_utc() {
		let t = DateTransform;
		assert_eq!(
			t.serialize(Some(&json!("2016-12-21T23:15:04.452+01:00"))),
			Some(json!("2016-12-21T22:15:04.452Z")),
		);
	}

	#[test]
	fn deserialize_parses_to_epoch_millis() {
		let t = DateTransform;
		assert_eq!(
			t.deserialize(Some(&json!("2016-12-21T22:15:04.452Z"))),
			Some(json!(EPOCH_MS)),
		);
		assert_eq!(t.deserialize(Some(&json!(EPOCH_MS))), Some(json!(EPOCH_MS)));
	}

	#[test]
	fn garbage_becomes_null() {
		let t = DateTransform;
		assert_eq!(t.serialize(Some(&json!("not a date"))), Some(Value::Null));
		assert_eq!(t.deserialize(Some(&json!(true))), Some(Value::Null));
		assert_eq!(t.serialize(None), Some(Value::Null));
	}

	#[test]
	fn default_value_is_now_in_the_matching_representation() {
		let t = DateTransform;
		let wire = t.default_value(Op::Serialize).unwrap();
		assert!(wire.as_str().unwrap().ends_with('Z'));

		let internal = t.default_value(Op::Deserialize).unwrap();
		let now = Utc::now().timestamp_millis();
		let ms = internal.as_i64().unwrap();
		assert!((now - ms).abs() < 5_000);
	}

	#[test]
	fn wire_and_internal_forms_round_trip() {
		let t = DateTransform;
		let wire = t.serialize(Some(&json!(EPOCH_MS))).unwrap();
		assert_eq!(t.deserialize(Some(&wire)), Some(json!(EPOCH_MS)));
	}
}
