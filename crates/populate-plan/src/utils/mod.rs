pub mod loader;
pub mod path;

pub(crate) use path::{join_path, path_segments};
