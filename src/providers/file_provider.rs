use crate::core::{Dataset, DatasetProvider};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// Reads `countries.json` from disk.
pub struct FileDatasetProvider {
    path: PathBuf,
}

impl FileDatasetProvider {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileDatasetProvider { path: path.into() }
    }
}

#[async_trait]
impl DatasetProvider for FileDatasetProvider {
    async fn fetch_dataset(&self) -> Result<Dataset> {
        debug!("Reading country dataset from {}", self.path.display());
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read dataset file: {}", self.path.display()))?;
        Dataset::from_json(&json)
            .with_context(|| format!("Failed to parse dataset file: {}", self.path.display()))
    }
}
