use super::ui;
use crate::core::Dataset;
use crate::imf::build::build_dataset;
use crate::imf::cpi::parse_cpi;
use crate::imf::rates::parse_rates;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ImportArgs {
    /// Existing `countries.json` providing names and currencies
    pub base: PathBuf,
    pub cpi_csv: PathBuf,
    pub rates_csv: PathBuf,
    pub out: PathBuf,
    pub min_year: i32,
}

pub fn run(args: &ImportArgs) -> Result<()> {
    info!("Importing IMF data into {}", args.out.display());

    let base_json = fs::read_to_string(&args.base)
        .with_context(|| format!("Failed to read base dataset: {}", args.base.display()))?;
    let base = Dataset::from_json(&base_json)
        .with_context(|| format!("Failed to parse base dataset: {}", args.base.display()))?;

    let cpi_file = File::open(&args.cpi_csv)
        .with_context(|| format!("Failed to open CPI CSV: {}", args.cpi_csv.display()))?;
    let cpi = parse_cpi(cpi_file, args.min_year)
        .with_context(|| format!("Failed to parse CPI CSV: {}", args.cpi_csv.display()))?;

    let rates_file = File::open(&args.rates_csv)
        .with_context(|| format!("Failed to open rates CSV: {}", args.rates_csv.display()))?;
    let rates = parse_rates(rates_file, args.min_year)
        .with_context(|| format!("Failed to parse rates CSV: {}", args.rates_csv.display()))?;

    let (dataset, report) = build_dataset(&base, &cpi, &rates);

    let json = serde_json::to_string_pretty(&dataset)?;
    fs::write(&args.out, json + "\n")
        .with_context(|| format!("Failed to write dataset to {}", args.out.display()))?;

    println!(
        "{} {}",
        ui::style_text("Total output countries:", ui::StyleType::TotalLabel),
        dataset.countries.len()
    );
    let lines = [
        ("With rate data", &report.with_rates),
        ("Inflation only", &report.inflation_only),
        ("Dropped (no CPI)", &report.dropped_no_cpi),
    ];
    for (label, codes) in lines {
        println!("{label}: {} -> {}", codes.len(), codes.join(", "));
    }
    println!(
        "{}",
        ui::style_text(&format!("Wrote {}", args.out.display()), ui::StyleType::Subtle)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imf::DEFAULT_MIN_YEAR;
    use tempfile::TempDir;

    #[test]
    fn writes_dataset_from_csv_exports() -> Result<()> {
        let dir = TempDir::new()?;
        let base = dir.path().join("base.json");
        let cpi_csv = dir.path().join("cpi.csv");
        let rates_csv = dir.path().join("rates.csv");
        let out = dir.path().join("countries.json");

        fs::write(
            &base,
            r#"{"countries": [
                {"id": "US", "name": "United States", "currencyCode": "USD", "currencySymbol": "$"},
                {"id": "JP", "name": "Japan", "currencyCode": "JPY", "currencySymbol": "¥"},
                {"id": "IN", "name": "India", "currencyCode": "INR", "currencySymbol": "₹"}
            ]}"#,
        )?;
        fs::write(
            &cpi_csv,
            "SERIES_CODE,COICOP_1999,TYPE_OF_TRANSFORMATION,FREQUENCY,2024-M06,2025-M06\n\
             USA.CPI.IX,All Items,Index,Monthly,314.175,322.561\n\
             JPN.CPI.IX,All Items,Index,Monthly,107.9,111.5\n",
        )?;
        fs::write(
            &rates_csv,
            "SERIES_CODE,INDICATOR,FREQUENCY,2025-M06\n\
             USA.IR,Monetary policy-related interest rate,Monthly,4.33\n",
        )?;

        run(&ImportArgs {
            base,
            cpi_csv,
            rates_csv,
            out: out.clone(),
            min_year: DEFAULT_MIN_YEAR,
        })?;

        let dataset = Dataset::from_json(&fs::read_to_string(&out)?)?;
        assert_eq!(dataset.countries.len(), 2);
        assert_eq!(dataset.find("US").unwrap().rate.as_ref().unwrap().value, 4.33);
        assert!(dataset.find("JP").unwrap().rate.is_none());
        assert!(dataset.find("IN").is_none());
        Ok(())
    }
}
