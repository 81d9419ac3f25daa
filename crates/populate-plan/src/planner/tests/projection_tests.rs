use super::{blog_catalog, registered};
use crate::planner::{
  catalog::{FieldDeclaration, InMemoryCatalog, SchemaDefinition},
  config::{ProjectionOptions, ReferenceProjection},
  projection::{ProjectionGenerator, project},
  registry::ReferenceRegistry,
  selection::{Fragments, Selection},
};

fn post_author_catalog() -> InMemoryCatalog {
  InMemoryCatalog::new()
    .with_schema("Author", SchemaDefinition::new().field("name", FieldDeclaration::Scalar))
    .with_schema(
      "Post",
      SchemaDefinition::new()
        .field("title", FieldDeclaration::Scalar)
        .field("author", FieldDeclaration::reference("Author")),
    )
}

fn title_and_author_name() -> Vec<Selection> {
  vec![
    Selection::field("title"),
    Selection::nested("author", [Selection::field("name")]),
  ]
}

fn project_with(
  selections: &[Selection],
  fragments: &Fragments,
  schema: &str,
  registry: &ReferenceRegistry,
  mode: ReferenceProjection,
) -> String {
  ProjectionGenerator::new(registry, fragments, ProjectionOptions::with_reference_mode(mode))
    .generate(selections, schema)
}

#[test]
fn test_reference_modes() {
  let registry = registered(&post_author_catalog(), "Post");
  let selections = title_and_author_name();
  let fragments = Fragments::new();

  let cases = [
    (ReferenceProjection::Omit, "title"),
    (ReferenceProjection::Nested, "title author.name"),
    (ReferenceProjection::Identifier, "title author"),
  ];
  for (mode, expected) in cases {
    assert_eq!(
      project_with(&selections, &fragments, "Post", &registry, mode),
      expected,
      "failed for mode {mode}"
    );
  }

  assert_eq!(
    project(&selections, &fragments, "Post", &registry),
    "title author.name",
    "nested is the default mode"
  );
}

#[test]
fn test_reference_without_selection_is_scalar() {
  let registry = registered(&post_author_catalog(), "Post");
  let selections = vec![Selection::field("title"), Selection::field("author")];

  for mode in [
    ReferenceProjection::Nested,
    ReferenceProjection::Omit,
    ReferenceProjection::Identifier,
  ] {
    assert_eq!(
      project_with(&selections, &Fragments::new(), "Post", &registry, mode),
      "title author",
      "an identifier-only reference is projected as-is in mode {mode}"
    );
  }
}

#[test]
fn test_embedded_document_paths() {
  let registry = registered(&blog_catalog(), "Post");
  let selections = vec![Selection::nested(
    "meta",
    [
      Selection::field("views"),
      Selection::nested("editor", [Selection::field("name")]),
    ],
  )];

  assert_eq!(
    project(&selections, &Fragments::new(), "Post", &registry),
    "meta meta.views meta.editor.name"
  );
  assert_eq!(
    project_with(
      &selections,
      &Fragments::new(),
      "Post",
      &registry,
      ReferenceProjection::Omit
    ),
    "meta meta.views"
  );
}

#[test]
fn test_references_resolved_against_target_schema() {
  let registry = registered(&blog_catalog(), "Post");
  let selections = vec![Selection::nested(
    "author",
    [
      Selection::field("name"),
      Selection::nested("profile", [Selection::nested("employer", [Selection::field("name")])]),
    ],
  )];

  assert_eq!(
    project(&selections, &Fragments::new(), "Post", &registry),
    "author.name author.profile author.profile.employer.name",
    "Author.profile.employer should be recognised as a reference of Author"
  );
}

#[test]
fn test_fragments_expand_in_place() {
  let registry = registered(&blog_catalog(), "Post");
  let fragments = Fragments::from([
    (
      "PostFields".to_string(),
      vec![
        Selection::field("title"),
        Selection::nested("author", [Selection::spread("AuthorFields")]),
      ],
    ),
    ("AuthorFields".to_string(), vec![Selection::field("name")]),
  ]);
  let selections = vec![
    Selection::field("body"),
    Selection::spread("PostFields"),
    Selection::inline(Some("Post"), [Selection::field("tags")]),
  ];

  assert_eq!(
    project(&selections, &fragments, "Post", &registry),
    "body title author.name tags"
  );
}

#[test]
fn test_dangling_and_recursive_fragments_are_skipped() {
  let registry = registered(&blog_catalog(), "Post");
  let fragments = Fragments::from([(
    "Loop".to_string(),
    vec![Selection::field("title"), Selection::spread("Loop")],
  )]);
  let selections = vec![Selection::spread("Missing"), Selection::spread("Loop"), Selection::field("body")];

  assert_eq!(project(&selections, &fragments, "Post", &registry), "title body");
}

#[test]
fn test_projection_is_deterministic() {
  let registry = registered(&blog_catalog(), "Post");
  let selections = vec![
    Selection::field("title"),
    Selection::nested("comments", [Selection::field("text")]),
    Selection::nested("author", [Selection::field("name")]),
  ];

  let first = project(&selections, &Fragments::new(), "Post", &registry);
  for _ in 0..5 {
    assert_eq!(project(&selections, &Fragments::new(), "Post", &registry), first);
  }
  assert_eq!(first, "title comments comments.text author.name");
}

#[test]
fn test_empty_selection_projects_nothing() {
  let registry = registered(&blog_catalog(), "Post");

  assert_eq!(project(&[], &Fragments::new(), "Post", &registry), "");
}
