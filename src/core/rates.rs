//! Turns a country's raw economic record into decimal annual rates.
use crate::core::country::{CountryRecord, EconomicData};
use crate::core::error::LossError;
use serde::Serialize;
use tracing::debug;

/// Annual rates as decimals (`0.021` for 2.1%).
///
/// `interest` is `0.0` when the record carries no rate; `has_interest_rate`
/// tells a measured zero apart from an assumed one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedRates {
    pub inflation: f64,
    pub interest: f64,
    pub has_interest_rate: bool,
}

/// How much of the calculation a country supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Full,
    InflationOnly,
    Unavailable,
}

impl Availability {
    pub fn of(record: &CountryRecord) -> Self {
        match derive_rates(record) {
            Ok(rates) if rates.has_interest_rate => Availability::Full,
            Ok(_) => Availability::InflationOnly,
            Err(_) => Availability::Unavailable,
        }
    }
}

pub fn derive_rates(record: &CountryRecord) -> Result<DerivedRates, LossError> {
    let (inflation, rate_percent) = match record.economic_data() {
        EconomicData::Cpi { cpi, rate } => {
            if !is_positive_finite(cpi.latest) || !is_positive_finite(cpi.previous) {
                return Err(LossError::unavailable(
                    &record.name,
                    format!(
                        "CPI readings must be positive (latest {}, previous {})",
                        cpi.latest, cpi.previous
                    ),
                ));
            }
            (cpi.latest / cpi.previous - 1.0, rate)
        }
        EconomicData::Annual {
            inflation_percent,
            savings_rate_percent,
        } => {
            if !inflation_percent.is_finite() {
                return Err(LossError::unavailable(
                    &record.name,
                    "inflation percentage is not a number",
                ));
            }
            (inflation_percent / 100.0, savings_rate_percent)
        }
        EconomicData::Missing => {
            return Err(LossError::unavailable(&record.name, "no inflation data"));
        }
    };

    let rates = match rate_percent.filter(|r| r.is_finite()) {
        Some(r) => DerivedRates {
            inflation,
            interest: r / 100.0,
            has_interest_rate: true,
        },
        None => DerivedRates {
            inflation,
            interest: 0.0,
            has_interest_rate: false,
        },
    };
    debug!(country = %record.id, ?rates, "Derived rates");
    Ok(rates)
}

fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::country::{CpiReading, RateReading};

    fn cpi_record(latest: f64, previous: f64, rate: Option<f64>) -> CountryRecord {
        CountryRecord {
            id: "ZZ".to_string(),
            name: "Testland".to_string(),
            currency_code: Some("TST".to_string()),
            currency_symbol: None,
            cpi: Some(CpiReading {
                latest,
                latest_date: "2025-M01".to_string(),
                previous,
                previous_date: "2024-M01".to_string(),
            }),
            rate: rate.map(|value| RateReading { value, date: None }),
            inflation: None,
            savings_rate: None,
        }
    }

    #[test]
    fn cpi_ratio_gives_inflation() {
        let rates = derive_rates(&cpi_record(102.1, 100.0, Some(4.0))).unwrap();
        assert!((rates.inflation - 0.021).abs() < 1e-12);
        assert!((rates.interest - 0.04).abs() < 1e-12);
        assert!(rates.has_interest_rate);
    }

    #[test]
    fn zero_previous_cpi_is_unavailable() {
        let err = derive_rates(&cpi_record(102.1, 0.0, Some(4.0))).unwrap_err();
        assert!(matches!(err, LossError::UnavailableRateData { .. }));
        assert!(derive_rates(&cpi_record(-1.0, 100.0, None)).is_err());
        assert!(derive_rates(&cpi_record(f64::NAN, 100.0, None)).is_err());
        assert!(derive_rates(&cpi_record(100.0, f64::INFINITY, None)).is_err());
    }

    #[test]
    fn missing_rate_assumes_zero_but_remembers() {
        let rates = derive_rates(&cpi_record(102.1, 100.0, None)).unwrap();
        assert_eq!(rates.interest, 0.0);
        assert!(!rates.has_interest_rate);

        let nan_rate = derive_rates(&cpi_record(102.1, 100.0, Some(f64::NAN))).unwrap();
        assert!(!nan_rate.has_interest_rate);
    }

    #[test]
    fn measured_zero_rate_is_present() {
        let rates = derive_rates(&cpi_record(102.1, 100.0, Some(0.0))).unwrap();
        assert_eq!(rates.interest, 0.0);
        assert!(rates.has_interest_rate);
    }

    #[test]
    fn direct_percentages() {
        let mut record = cpi_record(1.0, 1.0, None);
        record.cpi = None;
        record.inflation = Some(3.5);
        record.savings_rate = Some(1.25);
        let rates = derive_rates(&record).unwrap();
        assert!((rates.inflation - 0.035).abs() < 1e-12);
        assert!((rates.interest - 0.0125).abs() < 1e-12);
        assert!(rates.has_interest_rate);
    }

    #[test]
    fn availability_classification() {
        assert_eq!(
            Availability::of(&cpi_record(102.1, 100.0, Some(4.0))),
            Availability::Full
        );
        assert_eq!(
            Availability::of(&cpi_record(102.1, 100.0, None)),
            Availability::InflationOnly
        );
        let mut missing = cpi_record(1.0, 1.0, None);
        missing.cpi = None;
        assert_eq!(Availability::of(&missing), Availability::Unavailable);
    }
}
