//! Purchasing-power loss of holding cash, in today's money.
//!
//! Every horizon uses the same closed form:
//!
//! ```text
//! growth      = (1 + inflation) ^ years
//! erosion     = amount * (1 - 1 / growth)
//! opportunity = (amount / growth) * ((1 + interest) ^ years - 1)
//! loss        = erosion + opportunity
//! ```
use crate::core::error::LossError;
use crate::core::rates::DerivedRates;
use serde::Serialize;
use tracing::debug;

pub const DEFAULT_HORIZONS: [f64; 3] = [1.0, 5.0, 10.0];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LossBreakdown {
    pub inflation_erosion: f64,
    pub opportunity_cost: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HorizonLoss {
    pub years: f64,
    pub loss: Result<LossBreakdown, LossError>,
}

/// Loss per horizon for one amount and one set of rates.
#[derive(Debug, Clone, PartialEq)]
pub struct LossEstimate {
    pub amount: f64,
    pub rates: DerivedRates,
    pub horizons: Vec<HorizonLoss>,
}

impl LossEstimate {
    /// Total loss at `years`, if that horizon was computed and is defined.
    pub fn total_at(&self, years: f64) -> Option<f64> {
        self.horizons
            .iter()
            .find(|h| h.years == years)
            .and_then(|h| h.loss.as_ref().ok())
            .map(|b| b.total)
    }
}

pub fn compute_breakdown(
    amount: f64,
    inflation: f64,
    interest: f64,
    years: f64,
) -> Result<LossBreakdown, LossError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(LossError::InvalidAmount(amount.to_string()));
    }
    if !years.is_finite() || years <= 0.0 {
        return Err(LossError::InvalidHorizon(years));
    }
    if !inflation.is_finite() || !interest.is_finite() || 1.0 + inflation <= 0.0 {
        return Err(LossError::MathematicallyUndefined);
    }

    let growth = (1.0 + inflation).powf(years);
    let inflation_erosion = amount * (1.0 - 1.0 / growth);
    let opportunity_cost = (amount / growth) * ((1.0 + interest).powf(years) - 1.0);
    let total = inflation_erosion + opportunity_cost;

    if !total.is_finite() || !inflation_erosion.is_finite() || !opportunity_cost.is_finite() {
        return Err(LossError::MathematicallyUndefined);
    }
    Ok(LossBreakdown {
        inflation_erosion,
        opportunity_cost,
        total,
    })
}

pub fn compute_loss(
    amount: f64,
    inflation: f64,
    interest: f64,
    years: f64,
) -> Result<f64, LossError> {
    compute_breakdown(amount, inflation, interest, years).map(|b| b.total)
}

pub fn estimate_losses(amount: f64, rates: DerivedRates, horizons: &[f64]) -> LossEstimate {
    let horizons = horizons
        .iter()
        .map(|&years| {
            let loss = compute_breakdown(amount, rates.inflation, rates.interest, years);
            debug!(years, ?loss, "Computed loss");
            HorizonLoss { years, loss }
        })
        .collect();

    LossEstimate {
        amount,
        rates,
        horizons,
    }
}
