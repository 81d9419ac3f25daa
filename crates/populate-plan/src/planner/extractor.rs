use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::{
  planner::catalog::{FieldDeclaration, SchemaDefinition},
  utils::join_path,
};

/// A field whose stored value identifies a document in another schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceField {
  /// Dotted path within the owning schema.
  pub path: String,
  pub target_schema: String,
}

impl ReferenceField {
  pub fn new(path: impl Into<String>, target_schema: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      target_schema: target_schema.into(),
    }
  }
}

/// Enumerates the reference fields declared by `schema`, in discovery order.
///
/// Array elements that are themselves references are reported at the array's
/// own path. Element sub-documents and embedded documents are walked with the
/// path extended by each nested field name. A path is reported at most once.
pub fn extract_references(schema: &SchemaDefinition) -> Vec<ReferenceField> {
  let mut collector = ReferenceCollector::default();
  collector.collect_fields(&schema.fields, "");
  collector.finish()
}

#[derive(Default)]
struct ReferenceCollector {
  seen: IndexSet<String>,
  references: Vec<ReferenceField>,
}

impl ReferenceCollector {
  fn collect_fields(&mut self, fields: &IndexMap<String, FieldDeclaration>, prefix: &str) {
    for (name, declaration) in fields {
      self.collect_field(&join_path(prefix, name), declaration);
    }
  }

  fn collect_field(&mut self, path: &str, declaration: &FieldDeclaration) {
    match declaration {
      FieldDeclaration::Reference { .. } | FieldDeclaration::Options(_) => {
        if let Some(target) = declaration.reference_target() {
          self.record(path, target);
        }
      }
      FieldDeclaration::Array { of } => self.collect_elements(path, of),
      FieldDeclaration::Document { fields } => self.collect_fields(fields, path),
      FieldDeclaration::Scalar | FieldDeclaration::Unrecognized => {}
    }
  }

  fn collect_elements(&mut self, path: &str, elements: &[FieldDeclaration]) {
    for element in elements {
      if let Some(target) = element.reference_target() {
        self.record(path, target);
        continue;
      }

      match element {
        FieldDeclaration::Document { fields } => self.collect_fields(fields, path),
        FieldDeclaration::Array { of } => self.collect_elements(path, of),
        FieldDeclaration::Scalar
        | FieldDeclaration::Reference { .. }
        | FieldDeclaration::Options(_)
        | FieldDeclaration::Unrecognized => {}
      }
    }
  }

  fn record(&mut self, path: &str, target: &str) {
    if self.seen.insert(path.to_string()) {
      self.references.push(ReferenceField::new(path, target));
    }
  }

  fn finish(self) -> Vec<ReferenceField> {
    self.references
  }
}
