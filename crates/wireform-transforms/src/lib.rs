//! # wireform-transforms
//!
//! Built-in [`Transform`] implementations for the primitive data types most
//! schemas need: string, number, boolean, date, json, and array, plus a raw
//! pass-through. Each one is total over the full `Value` universe including
//! absent and null input, never panics, and coerces unusable input to the
//! type's null/empty form rather than erroring.
//!
//! All transforms are stateless unit structs; the convenience constructors
//! return them pre-wrapped in `Arc` for direct use in schema declarations.
//!
//! ## Examples
//!
//! ```
//! use serde_json::json;
//! use std::sync::Arc;
//! use wireform::{EntitySchema, Options, SchemaRegistry, Serializer};
//!
//! let mut registry = SchemaRegistry::new();
//! let user = registry.register(
//! 	EntitySchema::builder("user")
//! 		.primary_key("id", wireform_transforms::string())
//! 		.attribute("age", wireform_transforms::number())
//! 		.attribute("active", wireform_transforms::boolean())
//! 		.build()
//! 		.unwrap(),
//! );
//!
//! let serializer = Serializer::new(Arc::new(registry), user).unwrap();
//! let wire = serializer.serialize(
//! 	&json!({ "id": 7, "age": "28", "active": "y" }),
//! 	&Options::default(),
//! );
//! assert_eq!(wire, json!({ "id": "7", "age": 28, "active": true }));
//! ```

pub mod array;
pub mod boolean;
pub mod date;
pub mod json;
pub mod number;
pub mod raw;
pub mod string;

pub use array::ArrayTransform;
pub use boolean::BooleanTransform;
pub use date::DateTransform;
pub use json::JsonTransform;
pub use number::NumberTransform;
pub use raw::PassThroughTransform;
pub use string::StringTransform;

use std::sync::Arc;
use wireform::Transform;

/// String transform, pre-wrapped for schema declarations
pub fn string() -> Arc<dyn Transform> {
	Arc::new(StringTransform)
}

/// Number transform, pre-wrapped for schema declarations
pub fn number() -> Arc<dyn Transform> {
	Arc::new(NumberTransform)
}

/// Boolean transform, pre-wrapped for schema declarations
pub fn boolean() -> Arc<dyn Transform> {
	Arc::new(BooleanTransform)
}

/// Date transform, pre-wrapped for schema declarations
pub fn date() -> Arc<dyn Transform> {
	Arc::new(DateTransform)
}

/// JSON-column transform, pre-wrapped for schema declarations
pub fn json() -> Arc<dyn Transform> {
	Arc::new(JsonTransform)
}

/// Array transform, pre-wrapped for schema declarations
pub fn array() -> Arc<dyn Transform> {
	Arc::new(ArrayTransform)
}

/// Identity transform, pre-wrapped for schema declarations
pub fn raw() -> Arc<dyn Transform> {
	Arc::new(PassThroughTransform)
}
