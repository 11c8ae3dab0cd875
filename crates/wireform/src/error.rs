//! Construction-time contract violations
//!
//! Schemas, registries, and serializers fail fast while they are being built.
//! Traversal itself has no error surface: every missing key, null value, and
//! absent relationship has a defined fallback, so the entry points return
//! `Value` rather than `Result`.

/// Errors raised while building schemas or binding serializers
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
	/// A field name was declared twice on the same schema
	#[error("duplicate field `{field}` on schema `{schema}`")]
	DuplicateField { schema: String, field: String },

	/// A field was declared with an empty name
	#[error("empty field name on schema `{schema}`")]
	EmptyFieldName { schema: String },

	/// A schema id does not belong to the registry
	#[error("schema id {0} is not present in the registry")]
	UnknownSchema(usize),

	/// A schema slot was declared but never defined
	#[error("schema slot {0} was declared but never defined")]
	UndefinedSchema(usize),

	/// A declared schema slot was defined twice
	#[error("schema slot {0} is already defined")]
	AlreadyDefined(usize),

	/// A nested-serializer override targets a field that is not a relationship
	#[error("`{field}` is not a relationship of schema `{schema}`")]
	UnknownRelationship { schema: String, field: String },
}
