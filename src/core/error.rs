//! Failure taxonomy for the loss calculation.
//!
//! None of these are fatal: callers map every variant to a neutral
//! placeholder ("N/A") plus a status message.

/// Why a loss value could not be produced.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LossError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("no country selected")]
    NoCountrySelected,
    #[error("unknown country code: {0}")]
    UnknownCountry(String),
    #[error("no usable rate data for {country}: {reason}")]
    UnavailableRateData { country: String, reason: String },
    #[error("invalid horizon: {0} years")]
    InvalidHorizon(f64),
    #[error("result is mathematically undefined for these inputs")]
    MathematicallyUndefined,
}

impl LossError {
    pub(crate) fn unavailable(country: &str, reason: impl Into<String>) -> Self {
        LossError::UnavailableRateData {
            country: country.to_string(),
            reason: reason.into(),
        }
    }

    /// Short text shown in place of a result.
    pub fn status_message(&self) -> String {
        match self {
            LossError::InvalidAmount(_) => "Enter a non-negative amount".to_string(),
            LossError::NoCountrySelected => "Select a country to see the estimate".to_string(),
            LossError::UnknownCountry(code) => format!("No data for country '{code}'"),
            LossError::UnavailableRateData { country, .. } => {
                format!("No usable inflation data for {country}")
            }
            LossError::InvalidHorizon(_) => "Horizon must be a positive number of years".to_string(),
            LossError::MathematicallyUndefined => {
                "Estimate unavailable for these rates".to_string()
            }
        }
    }
}
