#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::ui::{Cli, Colors, Commands, ListCommands, colors};

mod ui;

fn init_tracing(verbose: bool) {
  let default_directive = if verbose {
    "populate_plan=debug"
  } else {
    "populate_plan=info"
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(true)
    .without_time()
    .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);
  let colors = Colors::new(colors::colors_enabled(cli.color), colors::detect_theme(cli.theme));

  match cli.command {
    Commands::List { list_command } => match list_command {
      ListCommands::References { catalog, schema } => {
        ui::commands::list_references(&catalog, schema.as_deref(), &colors).await?;
      }
    },
    Commands::Plan(command) => {
      let config = ui::commands::PlanConfig::from_command(command)?;
      ui::commands::plan_query(config, &colors).await?;
    }
  }

  Ok(())
}
