use itertools::Itertools;
use tracing::trace;

use crate::{
  planner::{
    config::{ProjectionOptions, ReferenceProjection},
    registry::ReferenceRegistry,
    selection::{Fragments, Selection},
    walker::{FieldClass, FragmentScope, classify},
  },
  utils::join_path,
};

/// Projection for `selections` on `schema_name` with default options.
///
/// `schema_name` is expected to be registered already; see
/// [`ReferenceRegistry::ensure_registered`].
pub fn project(
  selections: &[Selection],
  fragments: &Fragments,
  schema_name: &str,
  registry: &ReferenceRegistry,
) -> String {
  ProjectionGenerator::new(registry, fragments, ProjectionOptions::default()).generate(selections, schema_name)
}

/// Walks a selection tree and collects the dotted field paths to fetch.
pub struct ProjectionGenerator<'a> {
  registry: &'a ReferenceRegistry,
  scope: FragmentScope<'a>,
  options: ProjectionOptions,
  paths: Vec<String>,
}

impl<'a> ProjectionGenerator<'a> {
  pub fn new(registry: &'a ReferenceRegistry, fragments: &'a Fragments, options: ProjectionOptions) -> Self {
    Self {
      registry,
      scope: FragmentScope::new(fragments),
      options,
      paths: Vec::new(),
    }
  }

  /// Space-separated field paths in selection order, fragments inlined in place.
  pub fn generate(mut self, selections: &'a [Selection], schema_name: &str) -> String {
    self.walk(selections, schema_name, "", "");
    self.paths.iter().join(" ").trim().to_string()
  }

  /// `local` is the path within `schema`, used to recognise references;
  /// `output` is the path emitted into the projection.
  fn walk(&mut self, selections: &'a [Selection], schema: &str, local: &str, output: &str) {
    for selection in selections {
      match selection {
        Selection::FragmentSpread(spread) => {
          if let Some(fragment) = self.scope.enter(&spread.fragment_name) {
            self.walk(fragment, schema, local, output);
            self.scope.leave();
          }
        }
        Selection::InlineFragment(inline) => self.walk(&inline.selections, schema, local, output),
        Selection::Field(field) => {
          let local_path = join_path(local, &field.name);
          let output_path = join_path(output, &field.name);

          match classify(self.registry, schema, &local_path, field) {
            FieldClass::Reference { target, selections } => match self.options.reference_mode {
              ReferenceProjection::Nested => {
                trace!(path = %output_path, target = %target, "projecting through reference");
                self.walk(selections, &target, "", &output_path);
              }
              ReferenceProjection::Omit => {}
              ReferenceProjection::Identifier => self.paths.push(output_path),
            },
            FieldClass::Embedded(selections) => {
              self.paths.push(output_path.clone());
              self.walk(selections, schema, &local_path, &output_path);
            }
            FieldClass::Leaf => self.paths.push(output_path),
          }
        }
      }
    }
  }
}
