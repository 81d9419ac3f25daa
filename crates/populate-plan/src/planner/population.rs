use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
  planner::{
    config::ProjectionOptions,
    projection::ProjectionGenerator,
    registry::ReferenceRegistry,
    selection::{Fragments, Selection},
    walker::{FieldClass, FragmentScope, classify},
  },
  utils::join_path,
};

/// One reference field to resolve into its target document.
///
/// Serializes to the nested `{ path, select, populate }` shape document
/// databases accept as a populate argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulateEntry {
  /// Path of the reference field on the parent schema.
  pub path: String,
  /// Projection applied to the target documents.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub select: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub populate: Option<Vec<PopulateEntry>>,
}

impl PopulateEntry {
  pub fn new(path: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      select: None,
      populate: None,
    }
  }

  #[must_use]
  pub fn with_select(mut self, select: impl Into<String>) -> Self {
    self.select = Some(select.into());
    self
  }

  #[must_use]
  pub fn with_populate(mut self, populate: Vec<PopulateEntry>) -> Self {
    self.populate = Some(populate);
    self
  }
}

/// Population plan for `selections` on `schema_name` with default options.
///
/// `schema_name` is expected to be registered already; see
/// [`ReferenceRegistry::ensure_registered`].
pub fn populate(
  selections: &[Selection],
  fragments: &Fragments,
  schema_name: &str,
  registry: &ReferenceRegistry,
) -> Vec<PopulateEntry> {
  PopulationGenerator::new(registry, fragments, ProjectionOptions::default()).generate(selections, schema_name)
}

/// Walks a selection tree and collects the reference fields that need resolving.
///
/// Depth is bounded by the selection tree, so cyclic schema references need no
/// guard here.
pub struct PopulationGenerator<'a> {
  registry: &'a ReferenceRegistry,
  scope: FragmentScope<'a>,
  options: ProjectionOptions,
}

impl<'a> PopulationGenerator<'a> {
  pub fn new(registry: &'a ReferenceRegistry, fragments: &'a Fragments, options: ProjectionOptions) -> Self {
    Self {
      registry,
      scope: FragmentScope::new(fragments),
      options,
    }
  }

  pub fn generate(mut self, selections: &'a [Selection], schema_name: &str) -> Vec<PopulateEntry> {
    let mut entries = Vec::new();
    self.walk(selections, schema_name, "", &mut entries);
    entries
  }

  fn walk(&mut self, selections: &'a [Selection], schema: &str, local: &str, entries: &mut Vec<PopulateEntry>) {
    for selection in selections {
      match selection {
        Selection::FragmentSpread(spread) => {
          if let Some(fragment) = self.scope.enter(&spread.fragment_name) {
            self.walk(fragment, schema, local, entries);
            self.scope.leave();
          }
        }
        Selection::InlineFragment(inline) => self.walk(&inline.selections, schema, local, entries),
        Selection::Field(field) => {
          let local_path = join_path(local, &field.name);

          match classify(self.registry, schema, &local_path, field) {
            FieldClass::Reference { target, selections } => {
              trace!(path = %local_path, target = %target, "populating reference");
              entries.push(self.entry(local_path, &target, selections));
            }
            FieldClass::Embedded(selections) => self.walk(selections, schema, &local_path, entries),
            FieldClass::Leaf => {}
          }
        }
      }
    }
  }

  fn entry(&mut self, path: String, target: &str, selections: &'a [Selection]) -> PopulateEntry {
    let select =
      ProjectionGenerator::new(self.registry, self.scope.fragments(), self.options).generate(selections, target);

    let mut populate = Vec::new();
    self.walk(selections, target, "", &mut populate);

    PopulateEntry {
      path,
      select: (!select.is_empty()).then_some(select),
      populate: (!populate.is_empty()).then_some(populate),
    }
  }
}
