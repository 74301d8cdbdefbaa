use super::loss::select_country;
use super::ui;
use crate::core::Dataset;
use crate::core::LossError;
use crate::core::explanation::build_explanation;

pub fn render(dataset: &Dataset, country: Option<&str>) -> String {
    match select_country(dataset, country) {
        Ok(record) => build_explanation(Some(record)).to_string(),
        Err(LossError::NoCountrySelected) => build_explanation(None).to_string(),
        Err(e) => ui::style_text(&e.status_message(), ui::StyleType::Subtle),
    }
}

pub fn run(dataset: &Dataset, country: Option<&str>) {
    println!("{}", render(dataset, country));
}
