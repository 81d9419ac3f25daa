use thiserror::Error;

pub type Result<T, E = PlanError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
  /// The catalog has no definition for the requested schema, either the
  /// entity type asked for directly or one reached through a reference.
  #[error("Unknown schema '{name}'")]
  UnknownSchema { name: String },
  #[error("Invalid query document: {message}")]
  InvalidQuery { message: String },
}

impl PlanError {
  pub(crate) fn unknown_schema(name: impl Into<String>) -> Self {
    Self::UnknownSchema { name: name.into() }
  }

  pub(crate) fn invalid_query(message: impl Into<String>) -> Self {
    Self::InvalidQuery {
      message: message.into(),
    }
  }
}
