use std::path::Path;

use anyhow::Context;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};

use crate::planner::{catalog::InMemoryCatalog, selection::ResolveContext};

/// Memory-mapped input file for the CLI.
pub struct InputLoader {
  file: AsyncMmapFile,
  display: String,
}

impl InputLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("failed to open {}", path.display()))?;

    Ok(Self {
      file,
      display: path.display().to_string(),
    })
  }

  /// Parses the file as a JSON schema catalog.
  pub fn catalog(&self) -> anyhow::Result<InMemoryCatalog> {
    InMemoryCatalog::from_json_slice(self.file.as_slice())
      .with_context(|| format!("invalid schema catalog in {}", self.display))
  }

  /// Parses the file as a GraphQL query document.
  pub fn query(&self, operation_name: Option<&str>) -> anyhow::Result<ResolveContext> {
    let source = std::str::from_utf8(self.file.as_slice())
      .with_context(|| format!("query document {} is not valid UTF-8", self.display))?;
    Ok(ResolveContext::parse_operation(source, &self.display, operation_name)?)
  }
}
