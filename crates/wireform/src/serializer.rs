//! Recursive traversal engine
//!
//! A [`Serializer`] binds an entity schema from a registry and walks
//! JSON-like data against it, producing a freshly allocated result. The
//! three entry points, [`serialize`](Serializer::serialize),
//! [`deserialize`](Serializer::deserialize), and
//! [`normalize`](Serializer::normalize), share one control flow and differ
//! only in which transform function each field resolves.
//!
//! Per record, attributes are always processed before relationships, each in
//! declaration order. Per field: resolve the input key (hooks may remap it),
//! look up the raw value, run the transform or recurse into the nested
//! schema, coerce an absent result to null, resolve the output key, and
//! write. Relationships additionally default by cardinality: an absent or
//! null result becomes `null` for `one` and `[]` for `many`, while an empty
//! record under a `one` relationship recurses and yields a record of nulled
//! attributes.
//!
//! Strings, numbers, and booleans terminate traversal unchanged: a primitive
//! in relationship position is assumed to be a primary-key reference. Null
//! is terminal as well. Sequences map the operation over their elements,
//! dropping null element results (and only null: `0`, `false`, and `""`
//! survive).
//!
//! Traversal never fails for a well-formed schema; there is no `Result` in
//! the signatures. The engine holds no per-call state, so one instance is
//! safely shared across any number of concurrent callers. Recursion depth is
//! bounded by the depth of the input data, not by the schema graph.

use crate::error::SchemaError;
use crate::registry::{SchemaId, SchemaRegistry};
use crate::schema::{Cardinality, EntitySchema, FieldDescriptor, FieldKind, KeyHooks};
use crate::transform::Op;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::trace;

/// Field-selection filters for one traversal call
///
/// Evaluated independently per field: `exclude` is checked first; then, if
/// an include list is present (`only` or `include`), only its members are
/// processed; otherwise every field is. `only` is the legacy spelling of
/// `include` and takes precedence when both are given. Names not declared on
/// the schema are silently ignored. Filters apply to the top-level record
/// (and every element of a top-level sequence), not to nested-relationship
/// recursion.
///
/// # Examples
///
/// ```
/// use wireform::Options;
///
/// let options = Options::only(["posts"]);
/// assert!(options.selects("posts"));
/// assert!(!options.selects("author"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
	pub only: Option<Vec<String>>,
	pub include: Option<Vec<String>>,
	pub exclude: Option<Vec<String>>,
}

impl Options {
	/// Restrict processing to exactly these fields
	pub fn only<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			only: Some(names.into_iter().map(Into::into).collect()),
			..Self::default()
		}
	}

	/// Restrict processing to these fields
	pub fn include<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			include: Some(names.into_iter().map(Into::into).collect()),
			..Self::default()
		}
	}

	/// Remove these fields from processing
	pub fn exclude<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			exclude: Some(names.into_iter().map(Into::into).collect()),
			..Self::default()
		}
	}

	/// Whether the field named `name` should be processed
	pub fn selects(&self, name: &str) -> bool {
		if let Some(excluded) = &self.exclude
			&& excluded.iter().any(|n| n == name)
		{
			return false;
		}

		match self.only.as_ref().or(self.include.as_ref()) {
			Some(included) => included.iter().any(|n| n == name),
			None => true,
		}
	}
}

/// Traversal engine bound to one entity schema
///
/// Typically constructed once per schema and reused across calls. Nested
/// engines may be registered per relationship name to process that
/// relationship's embedded data with custom rules instead of the nested
/// schema's default behavior; engine-level [`KeyHooks`] take precedence over
/// the schema's own.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use serde_json::json;
/// use wireform::{EntitySchema, Options, SchemaRegistry, Serializer, pass_through};
/// # use serde_json::Value;
/// # struct Raw;
/// # impl wireform::Transform for Raw {
/// # 	fn data_type(&self) -> &str { "raw" }
/// # 	fn serialize(&self, v: Option<&Value>) -> Option<Value> { pass_through(v) }
/// # 	fn deserialize(&self, v: Option<&Value>) -> Option<Value> { pass_through(v) }
/// # }
///
/// let mut registry = SchemaRegistry::new();
/// let author = registry.register(
/// 	EntitySchema::builder("author")
/// 		.attribute("fullName", Arc::new(Raw))
/// 		.build()
/// 		.unwrap(),
/// );
/// let book = registry.register(
/// 	EntitySchema::builder("book")
/// 		.attribute("title", Arc::new(Raw))
/// 		.one("author", author)
/// 		.build()
/// 		.unwrap(),
/// );
///
/// let serializer = Serializer::new(Arc::new(registry), book).unwrap();
/// let raw = json!({ "title": "joy of painting", "author": { "fullName": "bob ross" } });
///
/// assert_eq!(
/// 	serializer.serialize(&raw, &Options::default()),
/// 	json!({ "title": "joy of painting", "author": { "fullName": "bob ross" } }),
/// );
/// ```
#[derive(Clone)]
pub struct Serializer {
	registry: Arc<SchemaRegistry>,
	schema: SchemaId,
	nested: HashMap<String, Serializer>,
	hooks: KeyHooks,
}

impl Serializer {
	/// Bind a schema from the registry
	///
	/// Fails if the bound schema, or any schema reachable from it through
	/// relationships, has been declared but never defined. Traversal relies
	/// on this check to stay infallible.
	pub fn new(registry: Arc<SchemaRegistry>, schema: SchemaId) -> Result<Self, SchemaError> {
		let mut seen = HashSet::new();
		let mut pending = vec![schema];
		while let Some(id) = pending.pop() {
			if !seen.insert(id) {
				continue;
			}
			let target = registry
				.get(id)
				.ok_or(SchemaError::UndefinedSchema(id.index()))?;
			for field in target.relationships() {
				if let FieldKind::Relationship { schema, .. } = field.kind() {
					pending.push(*schema);
				}
			}
		}

		Ok(Self {
			registry,
			schema,
			nested: HashMap::new(),
			hooks: KeyHooks::default(),
		})
	}

	/// Register a nested engine overriding how one relationship's embedded
	/// data is processed
	pub fn with_nested(mut self, name: &str, engine: Serializer) -> Result<Self, SchemaError> {
		let schema = self.bound_schema();
		match schema.field(name) {
			Some(field) if field.is_relationship() => {
				self.nested.insert(name.to_owned(), engine);
				Ok(self)
			}
			_ => Err(SchemaError::UnknownRelationship {
				schema: schema.name().to_owned(),
				field: name.to_owned(),
			}),
		}
	}

	/// Attach engine-level key hooks, overriding the schema's own
	pub fn with_hooks(mut self, hooks: KeyHooks) -> Self {
		self.hooks = hooks;
		self
	}

	/// The id of the bound schema
	pub fn schema(&self) -> SchemaId {
		self.schema
	}

	/// Convert internal data to its wire representation
	pub fn serialize(&self, data: &Value, options: &Options) -> Value {
		self.traverse(data, Op::Serialize, options)
	}

	/// Convert wire data to its internal representation
	pub fn deserialize(&self, data: &Value, options: &Options) -> Value {
		self.traverse(data, Op::Deserialize, options)
	}

	/// Loosely coerce raw data without a full deserialize pass
	pub fn normalize(&self, data: &Value, options: &Options) -> Value {
		self.traverse(data, Op::Normalize, options)
	}

	fn traverse(&self, data: &Value, op: Op, options: &Options) -> Value {
		self.view().traverse(data, op, options)
	}

	fn bound_schema(&self) -> &EntitySchema {
		// Membership was checked in `new`; an empty placeholder would only be
		// reachable through a registry swap, which `Arc` rules out.
		self.registry
			.get(self.schema)
			.expect("schema validated at construction")
	}

	fn view(&self) -> EngineView<'_> {
		EngineView {
			registry: &self.registry,
			schema: self.bound_schema(),
			nested: Some(&self.nested),
			hooks: Some(&self.hooks),
		}
	}
}

impl std::fmt::Debug for Serializer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Serializer")
			.field("schema", &self.bound_schema().name())
			.field("nested", &self.nested.keys().collect::<Vec<_>>())
			.finish()
	}
}

/// Borrowed traversal state: the bound schema plus optional engine-level
/// overrides. Default recursion into a relationship uses a plain view over
/// the nested schema, with no overrides.
struct EngineView<'a> {
	registry: &'a SchemaRegistry,
	schema: &'a EntitySchema,
	nested: Option<&'a HashMap<String, Serializer>>,
	hooks: Option<&'a KeyHooks>,
}

impl<'a> EngineView<'a> {
	fn traverse(&self, data: &Value, op: Op, options: &Options) -> Value {
		match data {
			// Null is terminal; a bare primitive is assumed to be a
			// primary-key reference.
			Value::Null => Value::Null,
			Value::String(_) | Value::Number(_) | Value::Bool(_) => data.clone(),
			Value::Array(items) => Value::Array(
				items
					.iter()
					.map(|item| self.traverse(item, op, options))
					.filter(|item| !item.is_null())
					.collect(),
			),
			Value::Object(record) => self.traverse_record(record, op, options),
		}
	}

	fn traverse_record(&self, record: &Map<String, Value>, op: Op, options: &Options) -> Value {
		trace!(entity = %self.schema.name(), ?op, "traversing record");
		let mut out = Map::new();

		// Attributes are always fully processed before any relationship, so
		// relationship hooks can see already-computed sibling values.
		for field in self.schema.attributes() {
			if options.selects(field.name()) {
				self.process_attribute(field, record, &mut out, op);
			}
		}
		for field in self.schema.relationships() {
			if options.selects(field.name()) {
				self.process_relationship(field, record, &mut out, op);
			}
		}

		Value::Object(out)
	}

	fn process_attribute(
		&self,
		field: &FieldDescriptor,
		record: &Map<String, Value>,
		out: &mut Map<String, Value>,
		op: Op,
	) {
		let FieldKind::Attribute { transform, .. } = field.kind() else {
			return;
		};

		let input_key = self.input_key(op, field);
		let result = match record.get(&input_key) {
			Some(raw) => transform.apply(op, Some(raw)),
			None => transform
				.default_value(op)
				.or_else(|| transform.apply(op, None)),
		};

		// Absent results are represented uniformly as null, never as a
		// missing key.
		let value = result.unwrap_or(Value::Null);
		let output_key = self.output_key(op, field, &value);
		out.insert(output_key, value);
	}

	fn process_relationship(
		&self,
		field: &FieldDescriptor,
		record: &Map<String, Value>,
		out: &mut Map<String, Value>,
		op: Op,
	) {
		let FieldKind::Relationship {
			schema,
			cardinality,
		} = field.kind()
		else {
			return;
		};

		let input_key = self.input_key(op, field);
		let result = record.get(&input_key).map(|raw| {
			if let Some(engine) = self.nested.and_then(|m| m.get(field.name())) {
				// An explicitly registered engine takes precedence over the
				// nested schema's own machinery.
				trace!(entity = %self.schema.name(), field = %field.name(), "delegating to nested engine");
				engine.traverse(raw, op, &Options::default())
			} else {
				match self.registry.get(*schema) {
					Some(target) => EngineView {
						registry: self.registry,
						schema: target,
						nested: None,
						hooks: None,
					}
					.traverse(raw, op, &Options::default()),
					// Reachable schemas are validated when the root engine is
					// built; unvalidated views pass the value through.
					None => raw.clone(),
				}
			}
		});

		let value = match (result, cardinality) {
			(None | Some(Value::Null), Cardinality::Many) => Value::Array(Vec::new()),
			(None, Cardinality::One) => Value::Null,
			(Some(value), _) => value,
		};

		let output_key = self.output_key(op, field, &value);
		out.insert(output_key, value);
	}

	/// Key under which the field's raw value lives in the input record
	fn input_key(&self, op: Op, field: &FieldDescriptor) -> String {
		let schema_hooks = self.schema.hooks();
		let hook = match (op, field.is_relationship()) {
			(Op::Serialize, false) => self
				.hooks
				.and_then(|h| h.serialize_input_attribute.as_ref())
				.or(schema_hooks.serialize_input_attribute.as_ref()),
			(Op::Serialize, true) => self
				.hooks
				.and_then(|h| h.serialize_input_relationship.as_ref())
				.or(schema_hooks.serialize_input_relationship.as_ref()),
			(Op::Deserialize, false) => self
				.hooks
				.and_then(|h| h.deserialize_input_attribute.as_ref())
				.or(schema_hooks.deserialize_input_attribute.as_ref()),
			(Op::Deserialize, true) => self
				.hooks
				.and_then(|h| h.deserialize_input_relationship.as_ref())
				.or(schema_hooks.deserialize_input_relationship.as_ref()),
			// Normalize always reads and writes declared names.
			(Op::Normalize, _) => None,
		};

		match hook {
			Some(resolve) => resolve(field),
			None => field.name().to_owned(),
		}
	}

	/// Key under which the computed value is written to the output record
	fn output_key(&self, op: Op, field: &FieldDescriptor, value: &Value) -> String {
		let schema_hooks = self.schema.hooks();
		let hook = match (op, field.is_relationship()) {
			(Op::Serialize, false) => self
				.hooks
				.and_then(|h| h.serialize_output_attribute.as_ref())
				.or(schema_hooks.serialize_output_attribute.as_ref()),
			(Op::Serialize, true) => self
				.hooks
				.and_then(|h| h.serialize_output_relationship.as_ref())
				.or(schema_hooks.serialize_output_relationship.as_ref()),
			(Op::Deserialize, false) => self
				.hooks
				.and_then(|h| h.deserialize_output_attribute.as_ref())
				.or(schema_hooks.deserialize_output_attribute.as_ref()),
			(Op::Deserialize, true) => self
				.hooks
				.and_then(|h| h.deserialize_output_relationship.as_ref())
				.or(schema_hooks.deserialize_output_relationship.as_ref()),
			(Op::Normalize, _) => None,
		};

		match hook {
			Some(resolve) => resolve(field, value),
			None => field.name().to_owned(),
		}
	}
}
