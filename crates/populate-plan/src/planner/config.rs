use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How a reference field selected with nested fields shows up in the
/// projection of the document that holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReferenceProjection {
  /// Nested paths under the reference's path, e.g. `author.name`.
  #[default]
  Nested,
  /// Nothing; the nested fields are left to the population plan.
  Omit,
  /// The reference's own path, so the stored identifier is fetched for population.
  Identifier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectionOptions {
  #[serde(default)]
  pub reference_mode: ReferenceProjection,
}

impl ProjectionOptions {
  #[must_use]
  pub fn with_reference_mode(reference_mode: ReferenceProjection) -> Self {
    Self { reference_mode }
  }
}
