//! Country economic records and the dataset that holds them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

pub const FALLBACK_SOURCE: &str = "built-in fallback";

/// Two CPI readings roughly one year apart.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CpiReading {
    pub latest: f64,
    pub latest_date: String,
    pub previous: f64,
    pub previous_date: String,
}

/// Latest annual interest/savings rate, in percent.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RateReading {
    pub value: f64,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub currency_symbol: Option<String>,
    #[serde(default)]
    pub cpi: Option<CpiReading>,
    #[serde(default)]
    pub rate: Option<RateReading>,
    /// Direct annual inflation, in percent. Ignored when `cpi` is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflation: Option<f64>,
    /// Direct annual savings rate, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_rate: Option<f64>,
}

/// The economic inputs of a record, in the shape the calculation consumes.
#[derive(Debug, Clone, PartialEq)]
pub enum EconomicData<'a> {
    Cpi {
        cpi: &'a CpiReading,
        rate: Option<f64>,
    },
    Annual {
        inflation_percent: f64,
        savings_rate_percent: Option<f64>,
    },
    Missing,
}

impl CountryRecord {
    pub fn economic_data(&self) -> EconomicData<'_> {
        if let Some(cpi) = &self.cpi {
            return EconomicData::Cpi {
                cpi,
                rate: self.rate.as_ref().map(|r| r.value),
            };
        }
        match self.inflation {
            Some(inflation_percent) => EconomicData::Annual {
                inflation_percent,
                savings_rate_percent: self.savings_rate.or(self.rate.as_ref().map(|r| r.value)),
            },
            None => EconomicData::Missing,
        }
    }

    pub fn currency_symbol(&self) -> &str {
        self.currency_symbol
            .as_deref()
            .or(self.currency_code.as_deref())
            .unwrap_or("")
    }

    /// Built-in record used when no dataset can be loaded.
    pub fn fallback() -> Self {
        CountryRecord {
            id: "US".to_string(),
            name: "United States".to_string(),
            currency_code: Some("USD".to_string()),
            currency_symbol: Some("$".to_string()),
            cpi: Some(CpiReading {
                latest: 322.561,
                latest_date: "2025-M06".to_string(),
                previous: 314.175,
                previous_date: "2024-M06".to_string(),
            }),
            rate: Some(RateReading {
                value: 4.33,
                date: Some("2025-M06".to_string()),
            }),
            inflation: None,
            savings_rate: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Dataset {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub countries: Vec<CountryRecord>,
}

impl Dataset {
    pub fn fallback() -> Self {
        Dataset {
            source: Some(FALLBACK_SOURCE.to_string()),
            countries: vec![CountryRecord::fallback()],
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source.as_deref() == Some(FALLBACK_SOURCE)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let mut dataset: Dataset = serde_json::from_str(json)?;
        dataset.dedup();
        Ok(dataset)
    }

    /// Case-insensitive lookup by two-letter code.
    pub fn find(&self, code: &str) -> Option<&CountryRecord> {
        let code = code.trim();
        self.countries
            .iter()
            .find(|c| c.id.eq_ignore_ascii_case(code))
    }

    fn dedup(&mut self) {
        let mut seen = HashSet::new();
        self.countries.retain(|c| {
            let fresh = seen.insert(c.id.to_ascii_uppercase());
            if !fresh {
                warn!("Duplicate country code {} in dataset, keeping first", c.id);
            }
            fresh
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_imf_dataset_with_missing_fields() {
        let json = r#"{
            "source": "IMF data.imf.org",
            "countries": [
                {
                    "id": "DE",
                    "name": "Germany",
                    "currencyCode": "EUR",
                    "currencySymbol": "€",
                    "cpi": {"latest": 121.3, "latestDate": "2025-M05", "previous": 118.9, "previousDate": "2024-M05"},
                    "rate": {"value": 2.15, "date": "2025-M06"}
                },
                {
                    "id": "TR",
                    "name": "Türkiye",
                    "currencyCode": "TRY",
                    "cpi": {"latest": 3000.1, "latestDate": "2025-M05", "previous": 2000.0, "previousDate": "2024-M05"},
                    "rate": null
                },
                {"id": "XX", "name": "Nowhere"}
            ]
        }"#;

        let dataset = Dataset::from_json(json).unwrap();
        assert_eq!(dataset.countries.len(), 3);

        let de = dataset.find("de").unwrap();
        assert_eq!(de.currency_symbol(), "€");
        match de.economic_data() {
            EconomicData::Cpi { cpi, rate } => {
                assert_eq!(cpi.latest, 121.3);
                assert_eq!(rate, Some(2.15));
            }
            other => panic!("Expected CPI data, got {other:?}"),
        }

        let tr = dataset.find("TR").unwrap();
        assert_eq!(tr.currency_symbol(), "TRY");
        assert!(matches!(
            tr.economic_data(),
            EconomicData::Cpi { rate: None, .. }
        ));

        assert_eq!(dataset.find("XX").unwrap().economic_data(), EconomicData::Missing);
        assert!(dataset.find("FR").is_none());
    }

    #[test]
    fn direct_percentages_are_used_without_cpi() {
        let record: CountryRecord = serde_json::from_str(
            r#"{"id": "CH", "name": "Switzerland", "inflation": 0.6, "savingsRate": 1.0}"#,
        )
        .unwrap();
        assert_eq!(
            record.economic_data(),
            EconomicData::Annual {
                inflation_percent: 0.6,
                savings_rate_percent: Some(1.0)
            }
        );
    }

    #[test]
    fn duplicate_codes_keep_first_record() {
        let json = r#"{"countries": [
            {"id": "US", "name": "First"},
            {"id": "us", "name": "Second"}
        ]}"#;
        let dataset = Dataset::from_json(json).unwrap();
        assert_eq!(dataset.countries.len(), 1);
        assert_eq!(dataset.find("US").unwrap().name, "First");
    }

    #[test]
    fn fallback_has_complete_data() {
        let dataset = Dataset::fallback();
        assert!(dataset.is_fallback());
        let us = dataset.find("US").unwrap();
        assert!(us.cpi.is_some());
        assert!(us.rate.is_some());
    }
}
