use std::path::PathBuf;

use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use populate_plan::{
  planner::{
    config::ProjectionOptions,
    orchestrator::{Planner, QueryPlan},
    population::PopulateEntry,
  },
  utils::loader::InputLoader,
};

use crate::ui::{Colors, OutputFormat, PlanCommand};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct PlanConfig {
  pub catalog: PathBuf,
  pub query: PathBuf,
  pub schema: String,
  pub root_path: String,
  pub operation: Option<String>,
  pub options: ProjectionOptions,
  pub output: OutputFormat,
}

impl PlanConfig {
  pub fn from_command(command: PlanCommand) -> anyhow::Result<Self> {
    let PlanCommand {
      catalog,
      query,
      schema,
      root,
      operation,
      reference_mode,
      output,
    } = command;

    if schema.trim().is_empty() {
      anyhow::bail!("Schema name (-s) must not be empty");
    }

    Ok(Self {
      catalog,
      query,
      schema,
      root_path: root.unwrap_or_default(),
      operation,
      options: ProjectionOptions::with_reference_mode(reference_mode.into()),
      output,
    })
  }
}

struct PlanPrinter<'a> {
  config: &'a PlanConfig,
  colors: &'a Colors,
}

impl<'a> PlanPrinter<'a> {
  fn new(config: &'a PlanConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn header(&self) {
    println!(
      "{} {}",
      format_timestamp().with(self.colors.timestamp()),
      format!("Planning '{}' from {}", self.config.schema, self.config.query.display()).with(self.colors.primary())
    );
  }

  fn stat(&self, label: &str, value: &str) {
    println!(
      "            {:<25} {}",
      label.with(self.colors.label()),
      value.with(self.colors.value())
    );
  }

  fn entries(&self, entries: &[PopulateEntry], depth: usize) {
    let indent = "  ".repeat(depth + 6);
    for entry in entries {
      println!(
        "{indent}{} {}",
        entry.path.as_str().with(self.colors.accent()),
        entry.select.as_deref().unwrap_or("(all fields)").with(self.colors.value())
      );
      if let Some(nested) = &entry.populate {
        self.entries(nested, depth + 1);
      }
    }
  }

  fn print(&self, plan: &QueryPlan) {
    self.header();
    let root = if self.config.root_path.is_empty() {
      "(top-level field)"
    } else {
      self.config.root_path.as_str()
    };
    self.stat("Root path:", root);
    self.stat("Reference mode:", &self.config.options.reference_mode.to_string());
    self.stat("Projection:", &plan.projection);
    self.stat("Populate entries:", &plan.populate.len().to_string());
    self.entries(&plan.populate, 0);
    println!(
      "{} {}",
      format_timestamp().with(self.colors.timestamp()),
      "Plan complete".with(self.colors.success())
    );
  }
}

pub async fn plan_query(config: PlanConfig, colors: &Colors) -> anyhow::Result<()> {
  let catalog = InputLoader::open(&config.catalog).await?.catalog()?;
  let context = InputLoader::open(&config.query)
    .await?
    .query(config.operation.as_deref())?;

  let planner = Planner::builder().catalog(catalog).options(config.options).build();
  let plan = planner.plan(&context, &config.schema, &config.root_path)?;

  match config.output {
    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
    OutputFormat::Text => PlanPrinter::new(&config, colors).print(&plan),
  }

  Ok(())
}
