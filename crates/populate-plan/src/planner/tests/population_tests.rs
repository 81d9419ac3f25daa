use serde_json::json;

use super::{blog_catalog, registered};
use crate::planner::{
  catalog::{FieldDeclaration, InMemoryCatalog, SchemaDefinition},
  config::{ProjectionOptions, ReferenceProjection},
  population::{PopulateEntry, PopulationGenerator, populate},
  selection::{Fragments, Selection},
};

#[test]
fn test_post_author_population() {
  let catalog = InMemoryCatalog::new()
    .with_schema("Author", SchemaDefinition::new().field("name", FieldDeclaration::Scalar))
    .with_schema(
      "Post",
      SchemaDefinition::new()
        .field("title", FieldDeclaration::Scalar)
        .field("author", FieldDeclaration::reference("Author")),
    );
  let registry = registered(&catalog, "Post");
  let selections = vec![
    Selection::field("title"),
    Selection::nested("author", [Selection::field("name")]),
  ];

  assert_eq!(
    populate(&selections, &Fragments::new(), "Post", &registry),
    vec![PopulateEntry::new("author").with_select("name")]
  );
}

#[test]
fn test_scalars_and_identifier_references_need_no_population() {
  let registry = registered(&blog_catalog(), "Post");
  let selections = vec![
    Selection::field("title"),
    Selection::field("author"),
    Selection::field("tags"),
  ];

  assert!(populate(&selections, &Fragments::new(), "Post", &registry).is_empty());
}

#[test]
fn test_nested_population_follows_selection_depth() {
  let registry = registered(&blog_catalog(), "Post");
  let selections = vec![Selection::nested(
    "author",
    [
      Selection::field("name"),
      Selection::nested("posts", [Selection::field("title")]),
    ],
  )];

  assert_eq!(
    populate(&selections, &Fragments::new(), "Post", &registry),
    vec![
      PopulateEntry::new("author")
        .with_select("name posts.title")
        .with_populate(vec![PopulateEntry::new("posts").with_select("title")])
    ]
  );
}

#[test]
fn test_cyclic_schema_bounded_by_selection() {
  let registry = registered(&blog_catalog(), "User");
  let selections = vec![
    Selection::field("name"),
    Selection::nested(
      "friend",
      [
        Selection::field("name"),
        Selection::nested("friend", [Selection::field("name")]),
      ],
    ),
  ];

  assert_eq!(
    populate(&selections, &Fragments::new(), "User", &registry),
    vec![
      PopulateEntry::new("friend")
        .with_select("name friend.name")
        .with_populate(vec![PopulateEntry::new("friend").with_select("name")])
    ]
  );
}

#[test]
fn test_references_inside_embedded_documents() {
  let registry = registered(&blog_catalog(), "Post");
  let selections = vec![
    Selection::nested(
      "comments",
      [
        Selection::field("text"),
        Selection::nested("author", [Selection::field("name")]),
      ],
    ),
    Selection::nested("meta", [Selection::nested("editor", [Selection::field("name")])]),
  ];

  assert_eq!(
    populate(&selections, &Fragments::new(), "Post", &registry),
    vec![
      PopulateEntry::new("comments.author").with_select("name"),
      PopulateEntry::new("meta.editor").with_select("name"),
    ]
  );
}

#[test]
fn test_population_through_fragments() {
  let registry = registered(&blog_catalog(), "Post");
  let fragments = Fragments::from([(
    "AuthorWithEmployer".to_string(),
    vec![
      Selection::field("name"),
      Selection::nested("profile", [Selection::nested("employer", [Selection::field("name")])]),
    ],
  )]);
  let selections = vec![
    Selection::inline(None, [Selection::nested("tags", [Selection::field("label")])]),
    Selection::nested("author", [Selection::spread("AuthorWithEmployer")]),
  ];

  assert_eq!(
    populate(&selections, &fragments, "Post", &registry),
    vec![
      PopulateEntry::new("tags").with_select("label"),
      PopulateEntry::new("author")
        .with_select("name profile profile.employer.name")
        .with_populate(vec![PopulateEntry::new("profile.employer").with_select("name")]),
    ]
  );
}

#[test]
fn test_nested_select_uses_reference_mode() {
  let registry = registered(&blog_catalog(), "Post");
  let selections = vec![Selection::nested(
    "author",
    [
      Selection::field("name"),
      Selection::nested("posts", [Selection::field("title")]),
    ],
  )];
  let fragments = Fragments::new();

  let plan = PopulationGenerator::new(
    &registry,
    &fragments,
    ProjectionOptions::with_reference_mode(ReferenceProjection::Identifier),
  )
  .generate(&selections, "Post");

  assert_eq!(plan[0].select.as_deref(), Some("name posts"));
}

#[test]
fn test_entry_without_nested_fields_serializes_compactly() {
  let plan = vec![
    PopulateEntry::new("author")
      .with_select("name")
      .with_populate(vec![PopulateEntry::new("posts")]),
  ];

  assert_eq!(
    serde_json::to_value(&plan).expect("plan should serialize"),
    json!([{ "path": "author", "select": "name", "populate": [{ "path": "posts" }] }])
  );
}
