pub mod cli;
pub mod core;
pub mod imf;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::dataset::load_dataset_or_fallback;
use crate::core::{Dataset, DatasetProvider};
use crate::providers::file_provider::FileDatasetProvider;
use crate::providers::http_provider::HttpDatasetProvider;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Loss {
        amount: Option<String>,
        country: Option<String>,
        years: Vec<f64>,
    },
    Explain {
        country: Option<String>,
    },
    Countries,
    Import(cli::import::ImportArgs),
}

fn dataset_provider(config: &AppConfig) -> Result<Box<dyn DatasetProvider>> {
    let provider: Box<dyn DatasetProvider> = match (&config.dataset.path, &config.dataset.url) {
        (Some(path), _) => Box::new(FileDatasetProvider::new(path)),
        (None, Some(url)) => Box::new(HttpDatasetProvider::new(url)),
        (None, None) => Box::new(FileDatasetProvider::new(AppConfig::default_dataset_path()?)),
    };
    Ok(provider)
}

async fn load_dataset(config: &AppConfig) -> Result<Dataset> {
    let provider = dataset_provider(config)?;
    let pb = cli::ui::new_spinner("Loading country data...");
    let dataset = load_dataset_or_fallback(provider.as_ref()).await;
    pb.finish_and_clear();
    Ok(dataset)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("cashdrag starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Loss {
            amount,
            country,
            years,
        } => {
            let dataset = load_dataset(&config).await?;
            let amount = amount.or_else(|| config.default_amount.map(|a| a.to_string()));
            let country = country.or(config.default_country.clone());
            let horizons = if years.is_empty() {
                &config.horizons
            } else {
                &years
            };
            cli::loss::run(&dataset, amount.as_deref(), country.as_deref(), horizons);
        }
        AppCommand::Explain { country } => {
            let dataset = load_dataset(&config).await?;
            let country = country.or(config.default_country.clone());
            cli::explain::run(&dataset, country.as_deref());
        }
        AppCommand::Countries => {
            let dataset = load_dataset(&config).await?;
            cli::countries::run(&dataset);
        }
        AppCommand::Import(args) => cli::import::run(&args)?,
    }
    Ok(())
}
