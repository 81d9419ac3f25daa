use std::{collections::BTreeSet, sync::Arc};

use indexmap::{IndexMap, IndexSet};
use parking_lot::{Mutex, RwLock};
use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap, visit::Dfs};
use tracing::{debug, instrument};

use crate::planner::{
  catalog::SchemaCatalog,
  error::{PlanError, Result},
  extractor::{ReferenceField, extract_references},
  metrics::RegistryStats,
};

type Entries = IndexMap<String, Arc<[ReferenceField]>>;

/// Memoized reference fields for every schema analyzed so far.
///
/// Entries are only ever added. A present key always holds the complete,
/// final reference list of that schema, and every schema it references is
/// present as well. An absent key means the schema has not been analyzed yet.
///
/// The registry is `Send + Sync` and meant to be shared behind an [`Arc`] by
/// every request in a process. Lookups take a shared read lock. First-time
/// registration is serialized by a single registration lock, so concurrent
/// callers asking for the same unknown schema never extract it twice.
#[derive(Debug, Default)]
pub struct ReferenceRegistry {
  entries: RwLock<Entries>,
  registration: Mutex<()>,
}

impl ReferenceRegistry {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Makes sure `schema_name` and every schema reachable from it through
  /// reference fields are registered.
  ///
  /// Returns immediately when the schema is already present. Otherwise the
  /// reachable schemas are analyzed depth-first, each at most once, and
  /// committed together.
  ///
  /// # Errors
  ///
  /// Returns [`PlanError::UnknownSchema`] when the catalog cannot resolve
  /// `schema_name` or any schema reached from it. Nothing is committed in
  /// that case.
  #[instrument(level = "debug", skip(self, catalog))]
  pub fn ensure_registered<C>(&self, catalog: &C, schema_name: &str) -> Result<()>
  where
    C: SchemaCatalog + ?Sized,
  {
    if self.contains(schema_name) {
      return Ok(());
    }

    let _registration = self.registration.lock();
    if self.contains(schema_name) {
      return Ok(());
    }

    let staged = self.analyze(catalog, schema_name)?;
    debug!(schemas = staged.len(), "committing registered schemas");
    self.entries.write().extend(staged);
    Ok(())
  }

  /// Runs the depth-first walk. Must be called with the registration lock held.
  fn analyze<C>(&self, catalog: &C, root: &str) -> Result<Entries>
  where
    C: SchemaCatalog + ?Sized,
  {
    let committed = self.entries.read();
    let mut staged = Entries::new();
    let mut pending = vec![root.to_string()];

    while let Some(name) = pending.pop() {
      if committed.contains_key(&name) || staged.contains_key(&name) {
        continue;
      }

      let definition = catalog
        .schema(&name)
        .ok_or_else(|| PlanError::unknown_schema(&name))?;
      let references = extract_references(definition);

      let targets = references
        .iter()
        .map(|reference| reference.target_schema.as_str())
        .collect::<IndexSet<_>>();
      let next = targets
        .into_iter()
        .rev()
        .filter(|target| !committed.contains_key(*target) && !staged.contains_key(*target) && *target != name)
        .map(ToString::to_string)
        .collect::<Vec<_>>();

      debug!(schema = %name, references = references.len(), "extracted schema references");
      staged.insert(name, references.into());
      pending.extend(next);
    }

    Ok(staged)
  }

  pub fn contains(&self, schema_name: &str) -> bool {
    self.entries.read().contains_key(schema_name)
  }

  /// Reference fields of a registered schema.
  pub fn get(&self, schema_name: &str) -> Option<Arc<[ReferenceField]>> {
    self.entries.read().get(schema_name).cloned()
  }

  /// The reference field declared at `path` on `schema_name`, if any.
  pub fn reference(&self, schema_name: &str, path: &str) -> Option<ReferenceField> {
    self
      .entries
      .read()
      .get(schema_name)
      .and_then(|references| references.iter().find(|reference| reference.path == path).cloned())
  }

  pub fn len(&self) -> usize {
    self.entries.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.read().is_empty()
  }

  /// Registered schema names in registration order.
  pub fn schema_names(&self) -> Vec<String> {
    self.entries.read().keys().cloned().collect()
  }

  /// Copy of the current registry contents.
  pub fn snapshot(&self) -> IndexMap<String, Vec<ReferenceField>> {
    self
      .entries
      .read()
      .iter()
      .map(|(name, references)| (name.clone(), references.to_vec()))
      .collect()
  }

  /// Registered schemas reachable from `schema_name`, itself included.
  pub fn reachable(&self, schema_name: &str) -> BTreeSet<String> {
    let entries = self.entries.read();
    let graph = reference_graph(&entries);

    let mut reachable = BTreeSet::new();
    if graph.contains_node(schema_name) {
      let mut dfs = Dfs::new(&graph, schema_name);
      while let Some(node) = dfs.next(&graph) {
        reachable.insert(node.to_string());
      }
    }
    reachable
  }

  /// Groups of registered schemas that reference each other in a cycle,
  /// including schemas that reference themselves.
  pub fn cycles(&self) -> Vec<Vec<String>> {
    let entries = self.entries.read();
    let graph = reference_graph(&entries);

    let mut cycles = kosaraju_scc(&graph)
      .into_iter()
      .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
      .map(|scc| {
        let mut cycle = scc.into_iter().map(String::from).collect::<Vec<_>>();
        cycle.sort();
        cycle
      })
      .collect::<Vec<_>>();
    cycles.sort();
    cycles
  }

  pub fn stats(&self) -> RegistryStats {
    let mut stats = RegistryStats::default();
    for references in self.entries.read().values() {
      stats.record_schema(references.len());
    }
    stats.record_cycles(self.cycles());
    stats
  }
}

fn reference_graph(entries: &Entries) -> DiGraphMap<&str, ()> {
  let mut graph = DiGraphMap::new();
  for (name, references) in entries {
    graph.add_node(name.as_str());
    for reference in references.iter() {
      graph.add_edge(name.as_str(), reference.target_schema.as_str(), ());
    }
  }
  graph
}
