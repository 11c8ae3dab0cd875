//! # wireform
//!
//! Schema-driven, bidirectional data-shape transformation: declare an
//! entity's fields and nested entities once, then convert between the wire
//! representation (database rows, API payloads) and the internal
//! representation in either direction, across arbitrarily nested and
//! recursive entity graphs.
//!
//! ## Components
//!
//! - **[`Transform`]**: the per-field serialize/deserialize/normalize
//!   contract for one data type
//! - **[`EntitySchema`]**: an ordered, named collection of attribute and
//!   relationship descriptors, built once and immutable
//! - **[`SchemaRegistry`]**: arena of schemas; relationships reference
//!   nested schemas by [`SchemaId`], so schema graphs may be mutually or
//!   self-referential
//! - **[`Serializer`]**: the recursive traversal engine, with key-remapping
//!   hooks, per-relationship delegation, and field-selection filtering
//!
//! Everything is synchronous, side-effect-free computation over immutable
//! inputs. Schemas, registries, and serializers are freely shared across
//! threads once built.
//!
//! ## Examples
//!
//! ```
//! use std::sync::Arc;
//! use serde_json::{Value, json};
//! use wireform::{EntitySchema, Op, Options, SchemaRegistry, Serializer, Transform, pass_through};
//!
//! struct NumberTransform;
//!
//! impl Transform for NumberTransform {
//! 	fn data_type(&self) -> &str {
//! 		"number"
//! 	}
//!
//! 	fn serialize(&self, value: Option<&Value>) -> Option<Value> {
//! 		value.filter(|v| v.is_number()).cloned()
//! 	}
//!
//! 	fn deserialize(&self, value: Option<&Value>) -> Option<Value> {
//! 		value.filter(|v| v.is_number()).cloned()
//! 	}
//! }
//!
//! let mut registry = SchemaRegistry::new();
//! let user = registry.register(
//! 	EntitySchema::builder("user")
//! 		.attribute("age", Arc::new(NumberTransform))
//! 		.build()?,
//! );
//!
//! let serializer = Serializer::new(Arc::new(registry), user)?;
//! let wire = serializer.serialize(&json!({ "age": 28, "stray": true }), &Options::default());
//! assert_eq!(wire, json!({ "age": 28 }));
//! # Ok::<(), wireform::SchemaError>(())
//! ```

pub mod error;
pub mod registry;
pub mod schema;
pub mod serializer;
pub mod transform;

pub use error::SchemaError;
pub use registry::{SchemaId, SchemaRegistry};
pub use schema::{
	Cardinality, EntitySchema, FieldDescriptor, FieldKind, KeyFn, KeyHooks, KeyWithValueFn,
	SchemaBuilder,
};
pub use serializer::{Options, Serializer};
pub use transform::{Op, Transform, pass_through};
