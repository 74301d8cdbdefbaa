//! Core calculation and data abstractions

pub mod amount;
pub mod config;
pub mod country;
pub mod dataset;
pub mod error;
pub mod explanation;
pub mod log;
pub mod loss;
pub mod period;
pub mod rates;

// Re-export main types for cleaner imports
pub use country::{CountryRecord, Dataset};
pub use dataset::DatasetProvider;
pub use error::LossError;
pub use loss::{LossBreakdown, LossEstimate, compute_loss, estimate_losses};
pub use rates::{Availability, DerivedRates, derive_rates};
