pub mod countries;
pub mod explain;
pub mod import;
pub mod loss;
pub mod setup;
pub mod ui;
