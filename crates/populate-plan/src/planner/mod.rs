pub mod catalog;
pub mod config;
pub(crate) mod document;
pub mod error;
pub mod extractor;
pub mod metrics;
pub mod orchestrator;
pub mod population;
pub mod projection;
pub mod registry;
pub mod selection;
pub(crate) mod walker;

#[cfg(test)]
mod tests;

pub use catalog::{FieldDeclaration, FieldOptions, InMemoryCatalog, SchemaCatalog, SchemaDefinition};
pub use config::{ProjectionOptions, ReferenceProjection};
pub use error::{PlanError, Result};
pub use extractor::{ReferenceField, extract_references};
pub use orchestrator::{Planner, QueryPlan};
pub use population::{PopulateEntry, PopulationGenerator, populate};
pub use projection::{ProjectionGenerator, project};
pub use registry::ReferenceRegistry;
pub use selection::{FieldSelection, Fragments, ResolveContext, Selection, locate};
