//! Document schema declarations as seen by the planner.
//!
//! The planner never talks to a database. It only needs the declared shape of
//! each schema: which fields are plain stored values, which hold identifiers
//! of documents in another schema, and how arrays and embedded documents nest.
//! [`SchemaCatalog`] is the seam a host application implements over its own
//! schema registry; [`InMemoryCatalog`] is the serde-backed implementation used
//! by the CLI and tests.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Resolves schema names to their field declarations.
pub trait SchemaCatalog {
  fn schema(&self, name: &str) -> Option<&SchemaDefinition>;
}

impl<C: SchemaCatalog + ?Sized> SchemaCatalog for &C {
  fn schema(&self, name: &str) -> Option<&SchemaDefinition> {
    (**self).schema(name)
  }
}

impl<C: SchemaCatalog + ?Sized> SchemaCatalog for std::sync::Arc<C> {
  fn schema(&self, name: &str) -> Option<&SchemaDefinition> {
    (**self).schema(name)
  }
}

/// Declared fields of one document schema, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
  #[serde(default)]
  pub fields: IndexMap<String, FieldDeclaration>,
}

impl SchemaDefinition {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn field(mut self, name: impl Into<String>, declaration: FieldDeclaration) -> Self {
    self.fields.insert(name.into(), declaration);
    self
  }
}

/// The declared shape of a single field.
///
/// Serialized with an internal `kind` tag, e.g. `{ "kind": "reference", "target": "Author" }`.
/// Declarations with an unknown `kind` deserialize to [`FieldDeclaration::Unrecognized`]
/// and behave like plain values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldDeclaration {
  Scalar,
  /// Holds the identifier of a document in `target`.
  Reference { target: String },
  /// Reference configuration carried in the field's options (`ref`).
  Options(FieldOptions),
  /// Array whose elements may be any of the listed declarations.
  Array { of: Vec<FieldDeclaration> },
  /// Embedded sub-document stored inline.
  Document { fields: IndexMap<String, FieldDeclaration> },
  #[serde(other)]
  Unrecognized,
}

impl FieldDeclaration {
  pub fn reference(target: impl Into<String>) -> Self {
    Self::Reference { target: target.into() }
  }

  pub fn configured_reference(target: impl Into<String>) -> Self {
    Self::Options(FieldOptions {
      reference: Some(target.into()),
      ..FieldOptions::default()
    })
  }

  pub fn array(of: impl IntoIterator<Item = FieldDeclaration>) -> Self {
    Self::Array {
      of: of.into_iter().collect(),
    }
  }

  pub fn document(fields: impl IntoIterator<Item = (String, FieldDeclaration)>) -> Self {
    Self::Document {
      fields: fields.into_iter().collect(),
    }
  }

  /// Target schema when the declaration itself is a reference, in either shape.
  pub fn reference_target(&self) -> Option<&str> {
    match self {
      Self::Reference { target } => Some(target.as_str()),
      Self::Options(options) => options.reference.as_deref(),
      Self::Scalar | Self::Array { .. } | Self::Document { .. } | Self::Unrecognized => None,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldOptions {
  #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
  pub reference: Option<String>,
  /// Remaining options (`required`, `index`, ...) are carried but not interpreted.
  #[serde(flatten)]
  pub extra: IndexMap<String, Value>,
}

/// Catalog file layout: `{ "schemas": { "<Name>": { "fields": { ... } } } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryCatalog {
  #[serde(default)]
  schemas: IndexMap<String, SchemaDefinition>,
}

impl InMemoryCatalog {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn with_schema(mut self, name: impl Into<String>, definition: SchemaDefinition) -> Self {
    self.insert(name, definition);
    self
  }

  pub fn insert(&mut self, name: impl Into<String>, definition: SchemaDefinition) {
    self.schemas.insert(name.into(), definition);
  }

  pub fn from_json_slice(bytes: &[u8]) -> serde_json::Result<Self> {
    serde_json::from_slice(bytes)
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.schemas.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.schemas.len()
  }

  pub fn is_empty(&self) -> bool {
    self.schemas.is_empty()
  }
}

impl SchemaCatalog for InMemoryCatalog {
  fn schema(&self, name: &str) -> Option<&SchemaDefinition> {
    self.schemas.get(name)
  }
}
