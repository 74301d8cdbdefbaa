//! Country dataset loading abstractions

use crate::core::country::Dataset;
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

#[async_trait]
pub trait DatasetProvider: Send + Sync {
    async fn fetch_dataset(&self) -> Result<Dataset>;
}

/// Loads the dataset, or the built-in fallback when it cannot be obtained.
pub async fn load_dataset_or_fallback(provider: &dyn DatasetProvider) -> Dataset {
    match provider.fetch_dataset().await {
        Ok(dataset) if !dataset.countries.is_empty() => {
            debug!(
                "Loaded {} countries from {}",
                dataset.countries.len(),
                dataset.source.as_deref().unwrap_or("unknown source")
            );
            dataset
        }
        Ok(_) => {
            warn!("Dataset has no countries, using built-in fallback");
            Dataset::fallback()
        }
        Err(e) => {
            warn!(error = %e, "Failed to load dataset, using built-in fallback");
            Dataset::fallback()
        }
    }
}
