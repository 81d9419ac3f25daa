use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use super::colors::{ColorMode, ThemeMode};
use populate_plan::planner::config::ReferenceProjection;

#[derive(Parser, Debug)]
#[command(name = "populate-plan")]
#[command(author, version, about = "Projection and population planner for document-database queries")]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,

  /// Enable debug logging (overridden by RUST_LOG)
  #[arg(short, long, default_value_t = false, global = true)]
  pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Plan the projection and population for a query
  Plan(PlanCommand),
  /// List information from a schema catalog
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
}

#[derive(Args, Debug)]
pub struct PlanCommand {
  /// Path to the JSON schema catalog
  #[arg(short, long, value_name = "FILE")]
  pub catalog: PathBuf,

  /// Path to the GraphQL query document
  #[arg(short, long, value_name = "FILE")]
  pub query: PathBuf,

  /// Schema of the documents the query resolves to
  #[arg(short, long, value_name = "NAME")]
  pub schema: String,

  /// Dotted path into the selection tree to plan from (e.g. data.post)
  #[arg(short, long, value_name = "PATH")]
  pub root: Option<String>,

  /// Operation to plan when the document defines several
  #[arg(long, value_name = "NAME")]
  pub operation: Option<String>,

  /// How references selected with nested fields appear in the projection
  #[arg(long, value_enum, default_value = "nested")]
  pub reference_mode: ReferenceModeArg,

  /// Output format
  #[arg(long, value_enum, default_value = "text")]
  pub output: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ReferenceModeArg {
  Nested,
  Omit,
  Identifier,
}

impl From<ReferenceModeArg> for ReferenceProjection {
  fn from(mode: ReferenceModeArg) -> Self {
    match mode {
      ReferenceModeArg::Nested => Self::Nested,
      ReferenceModeArg::Omit => Self::Omit,
      ReferenceModeArg::Identifier => Self::Identifier,
    }
  }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
  Text,
  Json,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List reference fields of the catalog's schemas
  References {
    /// Path to the JSON schema catalog
    #[arg(short, long, value_name = "FILE")]
    catalog: PathBuf,

    /// Only list schemas reachable from this one
    #[arg(short, long, value_name = "NAME")]
    schema: Option<String>,
  },
}
