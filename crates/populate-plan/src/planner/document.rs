//! Builds a [`ResolveContext`] from GraphQL query text.

use std::path::Path;

use apollo_compiler::ast;

use crate::planner::{
  error::{PlanError, Result},
  selection::{FieldSelection, Fragments, ResolveContext, Selection},
};

impl ResolveContext {
  /// Parses a query document and resolves against its first operation.
  ///
  /// # Errors
  ///
  /// See [`ResolveContext::parse_operation`].
  pub fn parse(source: &str, path: impl AsRef<Path>) -> Result<Self> {
    Self::parse_operation(source, path, None)
  }

  /// Parses a query document. The root field is the first top-level field of
  /// the operation named `operation_name`, or of the first operation when no
  /// name is given. Every fragment definition in the document is collected.
  ///
  /// # Errors
  ///
  /// Returns [`PlanError::InvalidQuery`] when the document does not parse,
  /// has no matching operation, or the operation selects no field.
  pub fn parse_operation(source: &str, path: impl AsRef<Path>, operation_name: Option<&str>) -> Result<Self> {
    let document =
      ast::Document::parse(source, path).map_err(|invalid| PlanError::invalid_query(invalid.errors.to_string()))?;

    let mut operation = None;
    let mut fragments = Fragments::new();

    for definition in &document.definitions {
      match definition {
        ast::Definition::OperationDefinition(def) => {
          let wanted = match operation_name {
            Some(name) => def.name.as_deref() == Some(name),
            None => true,
          };
          if wanted && operation.is_none() {
            operation = Some(def);
          }
        }
        ast::Definition::FragmentDefinition(def) => {
          fragments.insert(def.name.to_string(), convert_selections(&def.selection_set));
        }
        _ => {}
      }
    }

    let operation = operation.ok_or_else(|| match operation_name {
      Some(name) => PlanError::invalid_query(format!("operation '{name}' not found")),
      None => PlanError::invalid_query("document contains no operation"),
    })?;

    let field = operation
      .selection_set
      .iter()
      .find_map(|selection| match selection {
        ast::Selection::Field(field) => Some(convert_field(field)),
        ast::Selection::FragmentSpread(_) | ast::Selection::InlineFragment(_) => None,
      })
      .ok_or_else(|| PlanError::invalid_query("operation selects no top-level field"))?;

    Ok(Self { field, fragments })
  }
}

fn convert_selections(selections: &[ast::Selection]) -> Vec<Selection> {
  selections
    .iter()
    .map(|selection| match selection {
      ast::Selection::Field(field) => Selection::Field(convert_field(field)),
      ast::Selection::FragmentSpread(spread) => Selection::spread(spread.fragment_name.as_str()),
      ast::Selection::InlineFragment(inline) => {
        Selection::inline(inline.type_condition.as_deref(), convert_selections(&inline.selection_set))
      }
    })
    .collect()
}

fn convert_field(field: &ast::Field) -> FieldSelection {
  let mut converted = FieldSelection::new(field.name.as_str());
  if let Some(alias) = &field.alias {
    converted = converted.with_alias(alias.as_str());
  }
  if !field.selection_set.is_empty() {
    converted = converted.with_selections(convert_selections(&field.selection_set));
  }
  converted
}
