use std::path::Path;

use comfy_table::{Attribute, Cell, ContentArrangement, Row, Table};
use crossterm::style::Stylize;
use populate_plan::{
  planner::{catalog::InMemoryCatalog, registry::ReferenceRegistry},
  utils::loader::InputLoader,
};

use crate::ui::{Colors, colors::cell_color, term_width};

pub async fn list_references(catalog_path: &Path, schema: Option<&str>, colors: &Colors) -> anyhow::Result<()> {
  let catalog = InputLoader::open(catalog_path).await?.catalog()?;
  let registry = ReferenceRegistry::new();
  let names = registered_names(&catalog, &registry, schema)?;

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  row.add_cell(Cell::new("SCHEMA").fg(cell_color(colors.label())));
  row.add_cell(Cell::new("PATH").fg(cell_color(colors.label())));
  row.add_cell(Cell::new("TARGET").fg(cell_color(colors.label())));
  table.set_header(row);

  for name in &names {
    let Some(references) = registry.get(name) else {
      continue;
    };
    for reference in references.iter() {
      let mut row = Row::new();
      row.add_cell(
        Cell::new(name)
          .fg(cell_color(colors.value()))
          .add_attribute(Attribute::Bold),
      );
      row.add_cell(Cell::new(&reference.path).fg(cell_color(colors.primary())));
      row.add_cell(Cell::new(&reference.target_schema).fg(cell_color(colors.accent())));
      table.add_row(row);
    }
  }

  println!("{table}");

  let stats = registry.stats();
  println!(
    "{} schemas, {} reference fields",
    stats.schemas_registered.to_string().with(colors.value()),
    stats.reference_fields.to_string().with(colors.value())
  );
  for (i, cycle) in stats.cycle_details.iter().enumerate() {
    println!(
      "{} {}",
      format!("Cycle {}:", i + 1).with(colors.accent()),
      cycle.join(" <-> ").with(colors.primary())
    );
  }

  Ok(())
}

fn registered_names(
  catalog: &InMemoryCatalog,
  registry: &ReferenceRegistry,
  schema: Option<&str>,
) -> anyhow::Result<Vec<String>> {
  match schema {
    Some(schema) => {
      registry.ensure_registered(catalog, schema)?;
      Ok(registry.reachable(schema).into_iter().collect())
    }
    None => {
      for name in catalog.names() {
        registry.ensure_registered(catalog, name)?;
      }
      let mut names = registry.schema_names();
      names.sort();
      Ok(names)
    }
  }
}
