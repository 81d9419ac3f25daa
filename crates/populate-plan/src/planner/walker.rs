use tracing::warn;

use crate::planner::{
  registry::ReferenceRegistry,
  selection::{FieldSelection, Fragments, Selection},
};

/// Expands fragment spreads for a walker.
///
/// Tracks the spreads currently being expanded so a fragment that spreads
/// itself, directly or through another fragment, is expanded only once.
pub(crate) struct FragmentScope<'a> {
  fragments: &'a Fragments,
  active: Vec<&'a str>,
}

impl<'a> FragmentScope<'a> {
  pub(crate) fn new(fragments: &'a Fragments) -> Self {
    Self {
      fragments,
      active: Vec::new(),
    }
  }

  pub(crate) fn fragments(&self) -> &'a Fragments {
    self.fragments
  }

  /// Starts expanding `name`. Pair every `Some` with [`FragmentScope::leave`].
  pub(crate) fn enter(&mut self, name: &'a str) -> Option<&'a [Selection]> {
    if self.active.contains(&name) {
      warn!(fragment = name, "skipping recursive fragment spread");
      return None;
    }

    let Some(selections) = self.fragments.get(name) else {
      warn!(fragment = name, "skipping spread of undefined fragment");
      return None;
    };

    self.active.push(name);
    Some(selections)
  }

  pub(crate) fn leave(&mut self) {
    self.active.pop();
  }
}

/// How a selected field relates to the schema it is selected on.
pub(crate) enum FieldClass<'a> {
  /// A reference field with a nested selection reaching into `target`.
  Reference {
    target: String,
    selections: &'a [Selection],
  },
  /// A stored sub-document (or array of sub-structures) with nested selections.
  Embedded(&'a [Selection]),
  /// A stored value, or a reference requested only as an identifier.
  Leaf,
}

/// Classifies `field` selected at `local_path` of `schema`.
///
/// Only registered schemas are consulted; fields of a schema that was never
/// registered are never references.
pub(crate) fn classify<'a>(
  registry: &ReferenceRegistry,
  schema: &str,
  local_path: &str,
  field: &'a FieldSelection,
) -> FieldClass<'a> {
  match (registry.reference(schema, local_path), field.nested()) {
    (Some(reference), Some(selections)) => FieldClass::Reference {
      target: reference.target_schema,
      selections,
    },
    (None, Some(selections)) => FieldClass::Embedded(selections),
    (_, None) => FieldClass::Leaf,
  }
}
