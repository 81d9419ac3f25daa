/// Appends `name` to a dotted field path.
///
/// An empty prefix yields `name` unchanged, so top-level fields never carry a
/// leading separator.
pub fn join_path(prefix: &str, name: &str) -> String {
  if prefix.is_empty() {
    name.to_string()
  } else {
    format!("{prefix}.{name}")
  }
}

/// Splits a dotted root path into its segments, ignoring empty segments.
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
  path.split('.').filter(|segment| !segment.is_empty())
}
