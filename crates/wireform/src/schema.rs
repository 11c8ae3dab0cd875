//! Entity schemas and field descriptors
//!
//! An [`EntitySchema`] is an ordered, named collection of field descriptors
//! built once from a declaration and immutable thereafter. A field is either
//! an attribute, backed by a [`Transform`], or a relationship, referencing
//! another schema in the registry with a cardinality of one or many. The two
//! kinds are an exhaustive tagged union, so the traversal engine dispatches
//! by pattern matching rather than by inspecting marker flags.
//!
//! Declarations go through [`SchemaBuilder`], which separates field
//! declarations from behavioral key-mapping hooks and validates the
//! declaration at construction time. Field names are bound by the builder at
//! registration, never by the declarer, and are unique within a schema.
//! Iteration over attributes and over relationships each preserve
//! declaration order.
//!
//! # Examples
//!
//! ```
//! use wireform::{EntitySchema, SchemaRegistry, pass_through};
//! # use serde_json::Value;
//! # struct Raw;
//! # impl wireform::Transform for Raw {
//! # 	fn data_type(&self) -> &str { "raw" }
//! # 	fn serialize(&self, v: Option<&Value>) -> Option<Value> { pass_through(v) }
//! # 	fn deserialize(&self, v: Option<&Value>) -> Option<Value> { pass_through(v) }
//! # }
//! use std::sync::Arc;
//!
//! let mut registry = SchemaRegistry::new();
//! let author = registry.register(
//! 	EntitySchema::builder("author")
//! 		.attribute("fullName", Arc::new(Raw))
//! 		.build()
//! 		.unwrap(),
//! );
//!
//! let book = EntitySchema::builder("book")
//! 	.primary_key("id", Arc::new(Raw))
//! 	.attribute("title", Arc::new(Raw))
//! 	.one("author", author)
//! 	.build()
//! 	.unwrap();
//!
//! let names: Vec<_> = book.attributes().map(|f| f.name()).collect();
//! assert_eq!(names, ["id", "title"]);
//! assert_eq!(book.relationships().count(), 1);
//! ```

use crate::error::SchemaError;
use crate::registry::SchemaId;
use crate::transform::Transform;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// How many related records a relationship carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
	/// A single nested record (or primary-key reference)
	One,
	/// An ordered collection of nested records
	Many,
}

/// The two field variants, dispatched exhaustively by the traversal engine
#[derive(Clone)]
pub enum FieldKind {
	/// A scalar field backed by a value transform
	Attribute {
		transform: Arc<dyn Transform>,
		primary_key: bool,
	},
	/// A reference to another schema in the registry
	Relationship {
		schema: SchemaId,
		cardinality: Cardinality,
	},
}

impl fmt::Debug for FieldKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldKind::Attribute {
				transform,
				primary_key,
			} => f
				.debug_struct("Attribute")
				.field("data_type", &transform.data_type())
				.field("primary_key", primary_key)
				.finish(),
			FieldKind::Relationship {
				schema,
				cardinality,
			} => f
				.debug_struct("Relationship")
				.field("schema", schema)
				.field("cardinality", cardinality)
				.finish(),
		}
	}
}

/// One named field of a schema, immutable once registered
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
	name: String,
	kind: FieldKind,
}

impl FieldDescriptor {
	/// The field name, assigned by the owning schema at construction
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn kind(&self) -> &FieldKind {
		&self.kind
	}

	pub fn is_attribute(&self) -> bool {
		matches!(self.kind, FieldKind::Attribute { .. })
	}

	pub fn is_relationship(&self) -> bool {
		matches!(self.kind, FieldKind::Relationship { .. })
	}

	/// Whether this attribute is flagged as the entity's primary key
	pub fn is_primary_key(&self) -> bool {
		matches!(
			self.kind,
			FieldKind::Attribute {
				primary_key: true,
				..
			}
		)
	}

	/// Cardinality of a relationship field; `None` for attributes
	pub fn cardinality(&self) -> Option<Cardinality> {
		match self.kind {
			FieldKind::Relationship { cardinality, .. } => Some(cardinality),
			FieldKind::Attribute { .. } => None,
		}
	}
}

/// Hook resolving the key under which a field's raw value lives in input data
pub type KeyFn = Arc<dyn Fn(&FieldDescriptor) -> String + Send + Sync>;

/// Hook resolving the key under which a field's result is written, given the
/// already-computed value
pub type KeyWithValueFn = Arc<dyn Fn(&FieldDescriptor, &Value) -> String + Send + Sync>;

/// Custom key-mapping overrides
///
/// One optional slot per direction, field kind, and side. Input hooks map a
/// declared field name to the key holding its raw value (a database column
/// like `ACCOUNT_NUM` for an attribute declared `accountNumber`); output
/// hooks choose the key the result is written under and also see the
/// computed value, so the key may depend on it (`children_ids` for an id
/// array, `children` for embedded records). Unset slots fall back to the
/// declared field name. The normalize entry point always uses declared
/// names.
///
/// # Examples
///
/// ```
/// use wireform::KeyHooks;
///
/// let hooks = KeyHooks::new().serialize_input_attribute(|field| {
/// 	match field.name() {
/// 		"accountNumber" => "ACCOUNT_NUM".to_owned(),
/// 		name => name.to_owned(),
/// 	}
/// });
/// ```
#[derive(Clone, Default)]
pub struct KeyHooks {
	pub(crate) serialize_input_attribute: Option<KeyFn>,
	pub(crate) serialize_output_attribute: Option<KeyWithValueFn>,
	pub(crate) serialize_input_relationship: Option<KeyFn>,
	pub(crate) serialize_output_relationship: Option<KeyWithValueFn>,
	pub(crate) deserialize_input_attribute: Option<KeyFn>,
	pub(crate) deserialize_output_attribute: Option<KeyWithValueFn>,
	pub(crate) deserialize_input_relationship: Option<KeyFn>,
	pub(crate) deserialize_output_relationship: Option<KeyWithValueFn>,
}

macro_rules! input_hook_setter {
	($name:ident) => {
		pub fn $name<F>(mut self, f: F) -> Self
		where
			F: Fn(&FieldDescriptor) -> String + Send + Sync + 'static,
		{
			self.$name = Some(Arc::new(f));
			self
		}
	};
}

macro_rules! output_hook_setter {
	($name:ident) => {
		pub fn $name<F>(mut self, f: F) -> Self
		where
			F: Fn(&FieldDescriptor, &Value) -> String + Send + Sync + 'static,
		{
			self.$name = Some(Arc::new(f));
			self
		}
	};
}

impl KeyHooks {
	pub fn new() -> Self {
		Self::default()
	}

	input_hook_setter!(serialize_input_attribute);
	output_hook_setter!(serialize_output_attribute);
	input_hook_setter!(serialize_input_relationship);
	output_hook_setter!(serialize_output_relationship);
	input_hook_setter!(deserialize_input_attribute);
	output_hook_setter!(deserialize_output_attribute);
	input_hook_setter!(deserialize_input_relationship);
	output_hook_setter!(deserialize_output_relationship);
}

impl fmt::Debug for KeyHooks {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let set = |o: bool| if o { "set" } else { "-" };
		f.debug_struct("KeyHooks")
			.field("ser_in_attr", &set(self.serialize_input_attribute.is_some()))
			.field("ser_out_attr", &set(self.serialize_output_attribute.is_some()))
			.field("ser_in_rel", &set(self.serialize_input_relationship.is_some()))
			.field("ser_out_rel", &set(self.serialize_output_relationship.is_some()))
			.field("de_in_attr", &set(self.deserialize_input_attribute.is_some()))
			.field("de_out_attr", &set(self.deserialize_output_attribute.is_some()))
			.field("de_in_rel", &set(self.deserialize_input_relationship.is_some()))
			.field("de_out_rel", &set(self.deserialize_output_relationship.is_some()))
			.finish()
	}
}

/// An ordered, named collection of field descriptors
///
/// Constructed once via [`SchemaBuilder`], consumed any number of times by
/// serializers. Safe to share across threads: nothing is mutated after
/// `build()`.
#[derive(Debug, Clone)]
pub struct EntitySchema {
	name: String,
	fields: Vec<FieldDescriptor>,
	index: HashMap<String, usize>,
	hooks: KeyHooks,
}

impl EntitySchema {
	pub fn builder(name: impl Into<String>) -> SchemaBuilder {
		SchemaBuilder {
			name: name.into(),
			fields: Vec::new(),
			hooks: KeyHooks::default(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Look up a field by its declared name
	pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.index.get(name).map(|&i| &self.fields[i])
	}

	/// All fields in declaration order
	pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
		self.fields.iter()
	}

	/// Attribute fields in declaration order
	pub fn attributes(&self) -> impl Iterator<Item = &FieldDescriptor> {
		self.fields.iter().filter(|f| f.is_attribute())
	}

	/// Relationship fields in declaration order
	pub fn relationships(&self) -> impl Iterator<Item = &FieldDescriptor> {
		self.fields.iter().filter(|f| f.is_relationship())
	}

	/// The attribute flagged as primary key, if any
	pub fn primary_key(&self) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|f| f.is_primary_key())
	}

	pub fn hooks(&self) -> &KeyHooks {
		&self.hooks
	}
}

/// Declaration-time builder for [`EntitySchema`]
///
/// Field declarations and key-mapping hooks are supplied separately;
/// `build()` binds names, checks uniqueness, and freezes the schema.
pub struct SchemaBuilder {
	name: String,
	fields: Vec<FieldDescriptor>,
	hooks: KeyHooks,
}

impl SchemaBuilder {
	/// Declare a scalar attribute backed by `transform`
	pub fn attribute(self, name: impl Into<String>, transform: Arc<dyn Transform>) -> Self {
		self.push(name.into(), FieldKind::Attribute {
			transform,
			primary_key: false,
		})
	}

	/// Declare an attribute flagged as the entity's primary key
	pub fn primary_key(self, name: impl Into<String>, transform: Arc<dyn Transform>) -> Self {
		self.push(name.into(), FieldKind::Attribute {
			transform,
			primary_key: true,
		})
	}

	/// Declare a single-cardinality relationship to `schema`
	pub fn one(self, name: impl Into<String>, schema: SchemaId) -> Self {
		self.push(name.into(), FieldKind::Relationship {
			schema,
			cardinality: Cardinality::One,
		})
	}

	/// Declare a collection-cardinality relationship to `schema`
	pub fn many(self, name: impl Into<String>, schema: SchemaId) -> Self {
		self.push(name.into(), FieldKind::Relationship {
			schema,
			cardinality: Cardinality::Many,
		})
	}

	/// Attach schema-level key-mapping overrides
	pub fn hooks(mut self, hooks: KeyHooks) -> Self {
		self.hooks = hooks;
		self
	}

	fn push(mut self, name: String, kind: FieldKind) -> Self {
		self.fields.push(FieldDescriptor { name, kind });
		self
	}

	/// Bind names and freeze the schema
	pub fn build(self) -> Result<EntitySchema, SchemaError> {
		let mut index = HashMap::with_capacity(self.fields.len());
		for (i, field) in self.fields.iter().enumerate() {
			if field.name.is_empty() {
				return Err(SchemaError::EmptyFieldName { schema: self.name });
			}
			if index.insert(field.name.clone(), i).is_some() {
				return Err(SchemaError::DuplicateField {
					schema: self.name,
					field: field.name.clone(),
				});
			}
		}

		Ok(EntitySchema {
			name: self.name,
			fields: self.fields,
			index,
			hooks: self.hooks,
		})
	}
}
