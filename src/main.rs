use anyhow::Result;
use cashdrag::cli::import::ImportArgs;
use cashdrag::core::log::init_logging;
use cashdrag::imf::DEFAULT_MIN_YEAR;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for cashdrag::AppCommand {
    fn from(cmd: Commands) -> cashdrag::AppCommand {
        match cmd {
            Commands::Loss {
                amount,
                country,
                years,
            } => cashdrag::AppCommand::Loss {
                amount,
                country,
                years,
            },
            Commands::Explain { country } => cashdrag::AppCommand::Explain { country },
            Commands::Countries => cashdrag::AppCommand::Countries,
            Commands::Import {
                base,
                cpi_csv,
                rates_csv,
                out,
                min_year,
            } => cashdrag::AppCommand::Import(ImportArgs {
                base,
                cpi_csv,
                rates_csv,
                out,
                min_year,
            }),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Estimate the loss of holding an amount of cash
    Loss {
        /// Amount of cash, e.g. 10000 or "10,000"
        amount: Option<String>,
        /// Two-letter country code
        #[arg(long)]
        country: Option<String>,
        /// Horizon in years (repeatable); defaults to the configured horizons
        #[arg(long = "years")]
        years: Vec<f64>,
    },
    /// Show how the rates and losses are derived for a country
    Explain {
        /// Two-letter country code
        #[arg(long)]
        country: Option<String>,
    },
    /// List countries in the dataset
    Countries,
    /// Build countries.json from IMF CSV exports
    Import {
        /// Existing countries.json with names and currencies
        #[arg(long)]
        base: PathBuf,
        /// IMF CPI export
        #[arg(long)]
        cpi_csv: PathBuf,
        /// IMF interest-rate (MFS_IR) export
        #[arg(long)]
        rates_csv: PathBuf,
        /// Output path
        #[arg(long)]
        out: PathBuf,
        /// Drop series whose latest observation is older than this year
        #[arg(long, default_value_t = DEFAULT_MIN_YEAR)]
        min_year: i32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => cashdrag::cli::setup::setup(),
        Some(cmd) => cashdrag::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
