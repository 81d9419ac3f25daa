//! Selection trees and the resolve context they arrive in.

use indexmap::IndexMap;

use crate::utils::path_segments;

/// Fragment name to the selections it stands for.
pub type Fragments = IndexMap<String, Vec<Selection>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
  Field(FieldSelection),
  /// `...Name`, expanded against the context's fragments while walking.
  FragmentSpread(FragmentSpread),
  /// `... on Type { ... }`, inlined in place while walking.
  InlineFragment(InlineFragment),
}

impl Selection {
  /// A leaf field selection.
  pub fn field(name: impl Into<String>) -> Self {
    Self::Field(FieldSelection::new(name))
  }

  /// A field selection with a nested selection tree.
  pub fn nested(name: impl Into<String>, selections: impl IntoIterator<Item = Selection>) -> Self {
    Self::Field(FieldSelection::new(name).with_selections(selections))
  }

  pub fn spread(fragment_name: impl Into<String>) -> Self {
    Self::FragmentSpread(FragmentSpread {
      fragment_name: fragment_name.into(),
    })
  }

  pub fn inline(type_condition: Option<&str>, selections: impl IntoIterator<Item = Selection>) -> Self {
    Self::InlineFragment(InlineFragment {
      type_condition: type_condition.map(ToString::to_string),
      selections: selections.into_iter().collect(),
    })
  }

  pub fn as_field(&self) -> Option<&FieldSelection> {
    match self {
      Self::Field(field) => Some(field),
      Self::FragmentSpread(_) | Self::InlineFragment(_) => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection {
  pub name: String,
  pub alias: Option<String>,
  /// `None` for leaf selections.
  pub selections: Option<Vec<Selection>>,
}

impl FieldSelection {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      alias: None,
      selections: None,
    }
  }

  #[must_use]
  pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
    self.alias = Some(alias.into());
    self
  }

  #[must_use]
  pub fn with_selections(mut self, selections: impl IntoIterator<Item = Selection>) -> Self {
    self.selections = Some(selections.into_iter().collect());
    self
  }

  /// Nested selections, if the field has a non-empty selection tree.
  pub fn nested(&self) -> Option<&[Selection]> {
    self.selections.as_deref().filter(|selections| !selections.is_empty())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentSpread {
  pub fragment_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineFragment {
  pub type_condition: Option<String>,
  pub selections: Vec<Selection>,
}

/// What a query engine hands a resolver: the top-level operation field being
/// resolved and every fragment defined in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveContext {
  pub field: FieldSelection,
  pub fragments: Fragments,
}

impl ResolveContext {
  pub fn new(field: FieldSelection) -> Self {
    Self {
      field,
      fragments: Fragments::new(),
    }
  }

  #[must_use]
  pub fn with_fragment(mut self, name: impl Into<String>, selections: impl IntoIterator<Item = Selection>) -> Self {
    self.fragments.insert(name.into(), selections.into_iter().collect());
    self
  }

  /// Selections anchored at `root_path`. See [`locate`].
  pub fn locate(&self, root_path: &str) -> &[Selection] {
    locate(self, root_path)
  }
}

/// Returns the selections of the context's top-level field found by following
/// the dotted `root_path`.
///
/// Each segment is matched against field names in the current selection list.
/// When a segment has no match, or the matched field has no nested selections,
/// the selections reached so far are returned instead of failing. Fragment
/// spreads are not looked into while descending.
pub fn locate<'a>(context: &'a ResolveContext, root_path: &str) -> &'a [Selection] {
  let mut current = context.field.selections.as_deref().unwrap_or_default();

  for segment in path_segments(root_path) {
    let next = current
      .iter()
      .filter_map(Selection::as_field)
      .find(|field| field.name == segment)
      .and_then(FieldSelection::nested);

    match next {
      Some(selections) => current = selections,
      None => return current,
    }
  }

  current
}
