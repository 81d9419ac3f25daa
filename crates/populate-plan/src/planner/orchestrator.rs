//! Entry point for query resolvers.
//!
//! A [`Planner`] ties a schema catalog to a shared [`ReferenceRegistry`] and a
//! set of projection options. Each call locates the requested part of the
//! selection tree, makes sure the schema graph behind the requested entity is
//! registered, and walks the selections.
//!
//! ## Usage
//!
//! ```no_run
//! use populate_plan::planner::{
//!   catalog::{FieldDeclaration, InMemoryCatalog, SchemaDefinition},
//!   orchestrator::Planner,
//!   selection::ResolveContext,
//! };
//!
//! # fn example() -> anyhow::Result<()> {
//! let catalog = InMemoryCatalog::new()
//!   .with_schema("Author", SchemaDefinition::new().field("name", FieldDeclaration::Scalar))
//!   .with_schema(
//!     "Post",
//!     SchemaDefinition::new()
//!       .field("title", FieldDeclaration::Scalar)
//!       .field("author", FieldDeclaration::reference("Author")),
//!   );
//!
//! let planner = Planner::builder().catalog(catalog).build();
//! let context = ResolveContext::parse("{ post { title author { name } } }", "query.graphql")?;
//! let plan = planner.plan(&context, "Post", "")?;
//!
//! println!("select: {}", plan.projection);
//! println!("populate: {}", serde_json::to_string(&plan.populate)?);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use bon::Builder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::planner::{
  catalog::SchemaCatalog,
  config::ProjectionOptions,
  error::Result,
  population::{PopulateEntry, PopulationGenerator},
  projection::ProjectionGenerator,
  registry::ReferenceRegistry,
  selection::ResolveContext,
};

/// Projection and population plan for one resolver call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryPlan {
  pub projection: String,
  pub populate: Vec<PopulateEntry>,
}

#[derive(Debug, Builder)]
pub struct Planner<C: SchemaCatalog> {
  catalog: C,
  /// Shared across planners in a process; a fresh registry when not given.
  #[builder(default)]
  registry: Arc<ReferenceRegistry>,
  #[builder(default)]
  options: ProjectionOptions,
}

impl<C: SchemaCatalog> Planner<C> {
  pub fn catalog(&self) -> &C {
    &self.catalog
  }

  pub fn registry(&self) -> &Arc<ReferenceRegistry> {
    &self.registry
  }

  pub fn options(&self) -> ProjectionOptions {
    self.options
  }

  /// Registers `schema_name` and everything reachable from it.
  ///
  /// # Errors
  ///
  /// Returns [`crate::planner::error::PlanError::UnknownSchema`] when the
  /// catalog cannot resolve a schema in the graph.
  pub fn register(&self, schema_name: &str) -> Result<()> {
    self.registry.ensure_registered(&self.catalog, schema_name)
  }

  /// Field paths to fetch for the selections at `root_path`.
  ///
  /// # Errors
  ///
  /// Fails only when `schema_name` cannot be registered.
  pub fn projection(&self, context: &ResolveContext, schema_name: &str, root_path: &str) -> Result<String> {
    self.register(schema_name)?;
    let selections = context.locate(root_path);
    let projection = ProjectionGenerator::new(&self.registry, &context.fragments, self.options)
      .generate(selections, schema_name);
    debug!(schema = schema_name, root_path, %projection, "generated projection");
    Ok(projection)
  }

  /// Reference fields to populate for the selections at `root_path`.
  ///
  /// # Errors
  ///
  /// Fails only when `schema_name` cannot be registered.
  pub fn population(&self, context: &ResolveContext, schema_name: &str, root_path: &str) -> Result<Vec<PopulateEntry>> {
    self.register(schema_name)?;
    let selections = context.locate(root_path);
    let populate = PopulationGenerator::new(&self.registry, &context.fragments, self.options)
      .generate(selections, schema_name);
    debug!(
      schema = schema_name,
      root_path,
      entries = populate.len(),
      "generated population plan"
    );
    Ok(populate)
  }

  /// Projection and population plan together.
  ///
  /// # Errors
  ///
  /// Fails only when `schema_name` cannot be registered.
  pub fn plan(&self, context: &ResolveContext, schema_name: &str, root_path: &str) -> Result<QueryPlan> {
    Ok(QueryPlan {
      projection: self.projection(context, schema_name, root_path)?,
      populate: self.population(context, schema_name, root_path)?,
    })
  }
}
