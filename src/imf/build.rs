use crate::core::country::{CountryRecord, CpiReading, Dataset, RateReading};
use std::collections::BTreeMap;

pub const IMF_SOURCE: &str = "IMF data.imf.org";

/// Coverage of a freshly built dataset, by country code.
#[derive(Debug, Default, PartialEq)]
pub struct BuildReport {
    pub with_rates: Vec<String>,
    pub inflation_only: Vec<String>,
    pub dropped_no_cpi: Vec<String>,
}

/// Joins base country metadata with parsed CPI and rate readings.
///
/// Names and currencies come from `base`; any economic data it carries is
/// replaced. Countries without CPI are left out entirely.
pub fn build_dataset(
    base: &Dataset,
    cpi: &BTreeMap<String, Option<CpiReading>>,
    rates: &BTreeMap<String, Option<RateReading>>,
) -> (Dataset, BuildReport) {
    let mut report = BuildReport::default();
    let mut countries = Vec::new();

    for country in &base.countries {
        let Some(cpi_reading) = cpi.get(&country.id).cloned().flatten() else {
            report.dropped_no_cpi.push(country.id.clone());
            continue;
        };
        let rate = rates.get(&country.id).cloned().flatten();

        if rate.is_some() {
            report.with_rates.push(country.id.clone());
        } else {
            report.inflation_only.push(country.id.clone());
        }

        countries.push(CountryRecord {
            id: country.id.clone(),
            name: country.name.clone(),
            currency_code: country.currency_code.clone(),
            currency_symbol: country.currency_symbol.clone(),
            cpi: Some(cpi_reading),
            rate,
            inflation: None,
            savings_rate: None,
        });
    }

    let dataset = Dataset {
        source: Some(IMF_SOURCE.to_string()),
        countries,
    };
    (dataset, report)
}
