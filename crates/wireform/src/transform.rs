//! Per-field transform contract
//!
//! A [`Transform`] is the unit of value conversion attached to a single
//! attribute: a pure triplet of functions converting between the wire
//! representation (database rows, API payloads) and the internal
//! representation, plus a cheaper `normalize` coercion for raw input.
//!
//! Transforms are constructed once at schema-definition time, shared by
//! reference (`Arc`) across every schema that declares them, and never
//! mutated. They must be total over the declared universe of inputs,
//! including absent and null values, and must not panic for well-formed use;
//! a panicking transform propagates to the caller uncaught.
//!
//! Absence is modeled with `Option`: `None` means the key was missing from
//! the input record, `Some(Value::Null)` is an explicit null. A transform
//! returning `None` is coerced to null by the traversal engine before the
//! result is written.
//!
//! # Examples
//!
//! ```
//! use serde_json::{Value, json};
//! use wireform::{Op, Transform};
//!
//! struct Uppercase;
//!
//! impl Transform for Uppercase {
//! 	fn data_type(&self) -> &str {
//! 		"string"
//! 	}
//!
//! 	fn serialize(&self, value: Option<&Value>) -> Option<Value> {
//! 		value.and_then(Value::as_str).map(|s| json!(s.to_uppercase()))
//! 	}
//!
//! 	fn deserialize(&self, value: Option<&Value>) -> Option<Value> {
//! 		value.and_then(Value::as_str).map(|s| json!(s.to_lowercase()))
//! 	}
//! }
//!
//! let t = Uppercase;
//! assert_eq!(t.apply(Op::Serialize, Some(&json!("abc"))), Some(json!("ABC")));
//! assert_eq!(t.apply(Op::Normalize, Some(&json!("abc"))), Some(json!("abc")));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The three traversal entry points a transform can serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
	/// Internal representation to wire representation
	Serialize,
	/// Wire representation to internal representation
	Deserialize,
	/// Loose internal-only coercion of raw input
	Normalize,
}

/// A pure, stateless serialize/deserialize/normalize triplet for one data type
pub trait Transform: Send + Sync {
	/// Informational tag describing the value domain, e.g. `"string"`
	fn data_type(&self) -> &str;

	/// Convert an internal value into its wire form
	fn serialize(&self, value: Option<&Value>) -> Option<Value>;

	/// Convert a wire value into its internal form
	fn deserialize(&self, value: Option<&Value>) -> Option<Value>;

	/// Looser internal-only coercion; identity unless overridden
	fn normalize(&self, value: Option<&Value>) -> Option<Value> {
		pass_through(value)
	}

	/// Value used in place of a transform call when the field is wholly
	/// absent from input. `None` (the default) means no defaulting; date
	/// transforms use this to default to "now".
	fn default_value(&self, _op: Op) -> Option<Value> {
		None
	}

	/// Dispatch to the function matching the entry point
	fn apply(&self, op: Op, value: Option<&Value>) -> Option<Value> {
		match op {
			Op::Serialize => self.serialize(value),
			Op::Deserialize => self.deserialize(value),
			Op::Normalize => self.normalize(value),
		}
	}
}

/// Stateless identity used wherever a transform function is not supplied
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use wireform::pass_through;
///
/// assert_eq!(pass_through(Some(&json!(42))), Some(json!(42)));
/// assert_eq!(pass_through(None), None);
/// ```
pub fn pass_through(value: Option<&Value>) -> Option<Value> {
	value.cloned()
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	struct Identity;

	impl Transform for Identity {
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

	#[test]
	fn normalize_defaults_to_identity() {
		let t = Identity;
		assert_eq!(t.normalize(Some(&json!("x"))), Some(json!("x")));
		assert_eq!(t.normalize(None), None);
	}

	#[test]
	fn default_value_defaults_to_none() {
		let t = Identity;
		assert_eq!(t.default_value(Op::Serialize), None);
		assert_eq!(t.default_value(Op::Deserialize), None);
	}

	#[test]
	fn apply_dispatches_by_op() {
		let t = Identity;
		for op in [Op::Serialize, Op::Deserialize, Op::Normalize] {
			assert_eq!(t.apply(op, Some(&json!(1))), Some(json!(1)));
		}
	}

	#[test]
	fn pass_through_preserves_null() {
		assert_eq!(pass_through(Some(&Value::Null)), Some(Value::Null));
	}
}
