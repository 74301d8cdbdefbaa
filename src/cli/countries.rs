use super::ui;
use crate::core::{Availability, Dataset, derive_rates};
use comfy_table::Cell;

pub fn render(dataset: &Dataset) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Country"),
        ui::header_cell("Currency"),
        ui::header_cell("Inflation"),
        ui::header_cell("Interest rate"),
        ui::header_cell("Data"),
    ]);

    for country in &dataset.countries {
        let rates = derive_rates(country).ok();
        let inflation = ui::format_optional_cell(rates.map(|r| r.inflation), ui::format_rate);
        let interest = ui::format_optional_cell(
            rates.filter(|r| r.has_interest_rate).map(|r| r.interest),
            ui::format_rate,
        );
        let availability = match Availability::of(country) {
            Availability::Full => Cell::new("full"),
            Availability::InflationOnly => Cell::new("inflation only"),
            Availability::Unavailable => ui::na_cell(true),
        };

        table.add_row(vec![
            Cell::new(&country.id),
            Cell::new(&country.name),
            Cell::new(country.currency_code.as_deref().unwrap_or("")),
            inflation,
            interest,
            availability,
        ]);
    }

    let source = dataset.source.as_deref().unwrap_or("unknown");
    format!(
        "{table}\n{}",
        ui::style_text(&format!("Source: {source}"), ui::StyleType::Subtle)
    )
}

pub fn run(dataset: &Dataset) {
    println!("{}", render(dataset));
}
