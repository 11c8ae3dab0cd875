//! Schema registry
//!
//! Relationship descriptors hold shared references to nested schemas, and two
//! schemas may reference each other (or a schema may reference itself).
//! Rather than owning nested schemas directly, relationships store a
//! [`SchemaId`] indexing into a registry arena, which makes mutual and
//! self-referential schema graphs expressible: `declare()` reserves an id
//! before the schema exists, so it can appear in its own field declarations,
//! and `define()` fills the slot afterwards.
//!
//! The traversal engine performs no cycle detection over the schema graph.
//! Recursion depth is bounded by the depth of the input data, never by the
//! schema graph, so cyclic schemas with acyclic data terminate. JSON input
//! cannot express cyclic data, which keeps traversal total.
//!
//! # Examples
//!
//! ```
//! use wireform::{EntitySchema, SchemaRegistry};
//!
//! let mut registry = SchemaRegistry::new();
//!
//! // A self-referential schema: every employee has a manager.
//! let employee = registry.declare();
//! registry
//! 	.define(
//! 		employee,
//! 		EntitySchema::builder("employee")
//! 			.one("manager", employee)
//! 			.build()
//! 			.unwrap(),
//! 	)
//! 	.unwrap();
//!
//! assert_eq!(registry.get(employee).unwrap().name(), "employee");
//! ```

use crate::error::SchemaError;
use crate::schema::EntitySchema;

/// Opaque index of a schema within a [`SchemaRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaId(usize);

impl SchemaId {
	/// Position within the registry arena
	pub fn index(self) -> usize {
		self.0
	}
}

/// Arena of entity schemas, append-only and immutable once defined
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
	slots: Vec<Option<EntitySchema>>,
}

impl SchemaRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Reserve an id ahead of definition, enabling cyclic references
	pub fn declare(&mut self) -> SchemaId {
		self.slots.push(None);
		SchemaId(self.slots.len() - 1)
	}

	/// Fill a declared slot; each slot is defined exactly once
	pub fn define(&mut self, id: SchemaId, schema: EntitySchema) -> Result<(), SchemaError> {
		let slot = self
			.slots
			.get_mut(id.0)
			.ok_or(SchemaError::UnknownSchema(id.0))?;
		if slot.is_some() {
			return Err(SchemaError::AlreadyDefined(id.0));
		}
		*slot = Some(schema);
		Ok(())
	}

	/// Declare and define in one step
	pub fn register(&mut self, schema: EntitySchema) -> SchemaId {
		self.slots.push(Some(schema));
		SchemaId(self.slots.len() - 1)
	}

	/// The schema at `id`, if that slot has been defined
	pub fn get(&self, id: SchemaId) -> Option<&EntitySchema> {
		self.slots.get(id.0).and_then(Option::as_ref)
	}

	/// Number of declared slots, defined or not
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}
}
