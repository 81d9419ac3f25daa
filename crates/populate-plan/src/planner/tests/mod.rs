mod population_tests;
mod projection_tests;

use std::sync::atomic::{AtomicUsize, Ordering};

use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::planner::{
  catalog::{FieldDeclaration, InMemoryCatalog, SchemaCatalog, SchemaDefinition},
  registry::ReferenceRegistry,
};

/// `Author`, `Post`, `Tag`, `User` and `Company` with references between them.
///
/// `Author.posts` and `Post.author` form a cycle; `User.friend` references itself.
pub(super) fn blog_catalog() -> InMemoryCatalog {
  InMemoryCatalog::new()
    .with_schema(
      "Author",
      SchemaDefinition::new()
        .field("name", FieldDeclaration::Scalar)
        .field("posts", FieldDeclaration::array([FieldDeclaration::reference("Post")]))
        .field(
          "profile",
          FieldDeclaration::document([
            ("avatar".to_string(), FieldDeclaration::Scalar),
            ("employer".to_string(), FieldDeclaration::configured_reference("Company")),
          ]),
        ),
    )
    .with_schema(
      "Post",
      SchemaDefinition::new()
        .field("title", FieldDeclaration::Scalar)
        .field("body", FieldDeclaration::Scalar)
        .field("author", FieldDeclaration::reference("Author"))
        .field("tags", FieldDeclaration::array([FieldDeclaration::reference("Tag")]))
        .field(
          "comments",
          FieldDeclaration::array([FieldDeclaration::document([
            ("text".to_string(), FieldDeclaration::Scalar),
            ("author".to_string(), FieldDeclaration::configured_reference("User")),
          ])]),
        )
        .field(
          "meta",
          FieldDeclaration::document([
            ("views".to_string(), FieldDeclaration::Scalar),
            ("editor".to_string(), FieldDeclaration::reference("Author")),
          ]),
        ),
    )
    .with_schema("Tag", SchemaDefinition::new().field("label", FieldDeclaration::Scalar))
    .with_schema(
      "User",
      SchemaDefinition::new()
        .field("name", FieldDeclaration::Scalar)
        .field("friend", FieldDeclaration::reference("User")),
    )
    .with_schema("Company", SchemaDefinition::new().field("name", FieldDeclaration::Scalar))
}

pub(super) fn registered(catalog: &InMemoryCatalog, schema: &str) -> ReferenceRegistry {
  let registry = ReferenceRegistry::new();
  registry
    .ensure_registered(catalog, schema)
    .expect("schema should register");
  registry
}

/// Catalog wrapper counting how often each schema is looked up.
pub(super) struct CountingCatalog {
  inner: InMemoryCatalog,
  lookups: Mutex<IndexMap<String, usize>>,
  total: AtomicUsize,
}

impl CountingCatalog {
  pub(super) fn new(inner: InMemoryCatalog) -> Self {
    Self {
      inner,
      lookups: Mutex::new(IndexMap::new()),
      total: AtomicUsize::new(0),
    }
  }

  pub(super) fn lookups(&self, name: &str) -> usize {
    self.lookups.lock().get(name).copied().unwrap_or(0)
  }

  pub(super) fn total(&self) -> usize {
    self.total.load(Ordering::SeqCst)
  }
}

impl SchemaCatalog for CountingCatalog {
  fn schema(&self, name: &str) -> Option<&SchemaDefinition> {
    *self.lookups.lock().entry(name.to_string()).or_insert(0) += 1;
    self.total.fetch_add(1, Ordering::SeqCst);
    self.inner.schema(name)
  }
}
