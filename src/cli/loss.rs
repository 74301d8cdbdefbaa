use super::ui;
use crate::core::amount::parse_amount;
use crate::core::period::display_label;
use crate::core::{
    CountryRecord, Dataset, DerivedRates, LossError, LossEstimate, derive_rates, estimate_losses,
};
use comfy_table::Cell;
use tracing::{debug, info};

/// Resolves the selected country, or explains why there is none.
pub(crate) fn select_country<'a>(
    dataset: &'a Dataset,
    code: Option<&str>,
) -> Result<&'a CountryRecord, LossError> {
    let code = code
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(LossError::NoCountrySelected)?;
    dataset
        .find(code)
        .ok_or_else(|| LossError::UnknownCountry(code.to_string()))
}

fn rates_summary(country: &CountryRecord, rates: &DerivedRates) -> String {
    let mut inflation = format!("Inflation: {}", ui::format_rate(rates.inflation));
    if let Some(cpi) = &country.cpi {
        inflation.push_str(&format!(
            " (CPI {} vs {})",
            display_label(&cpi.latest_date),
            display_label(&cpi.previous_date)
        ));
    }
    let interest = if rates.has_interest_rate {
        format!("Interest rate: {}", ui::format_rate(rates.interest))
    } else {
        format!(
            "Interest rate: {}",
            ui::style_text("unavailable, assuming 0%", ui::StyleType::Subtle)
        )
    };
    format!("{inflation}\n{interest}")
}

fn loss_table(estimate: &LossEstimate, symbol: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Horizon"),
        ui::header_cell("Inflation erosion"),
        ui::header_cell("Opportunity cost"),
        ui::header_cell("Total loss"),
        ui::header_cell("Share of amount"),
    ]);

    for horizon in &estimate.horizons {
        let mut row = vec![Cell::new(ui::format_horizon(horizon.years))];
        match &horizon.loss {
            Ok(b) => {
                row.push(ui::loss_cell(
                    ui::format_money(b.inflation_erosion, symbol),
                    b.inflation_erosion,
                ));
                row.push(ui::loss_cell(
                    ui::format_money(b.opportunity_cost, symbol),
                    b.opportunity_cost,
                ));
                row.push(ui::loss_cell(ui::format_money(b.total, symbol), b.total));
                let share = (estimate.amount > 0.0).then(|| b.total / estimate.amount);
                row.push(ui::format_optional_cell(share, ui::format_rate));
            }
            Err(_) => row.extend((0..4).map(|_| ui::na_cell(true))),
        }
        table.add_row(row);
    }
    table.to_string()
}

/// Renders the loss report, or a neutral message when no estimate is possible.
pub fn render(
    dataset: &Dataset,
    amount: Option<&str>,
    country: Option<&str>,
    horizons: &[f64],
) -> String {
    let country = match select_country(dataset, country) {
        Ok(country) => country,
        Err(e) => return ui::style_text(&e.status_message(), ui::StyleType::Subtle),
    };
    let amount = match amount.map_or(
        Err(LossError::InvalidAmount(String::new())),
        parse_amount,
    ) {
        Ok(amount) => amount,
        Err(e) => return ui::style_text(&e.status_message(), ui::StyleType::Subtle),
    };
    let rates = match derive_rates(country) {
        Ok(rates) => rates,
        Err(e) => {
            debug!("Rates unavailable: {e}");
            return ui::style_text(&e.status_message(), ui::StyleType::Error);
        }
    };

    let symbol = country.currency_symbol();
    let estimate = estimate_losses(amount, rates, horizons);

    let mut output = format!(
        "Holding {} in {}\n\n{}\n\n{}",
        ui::style_text(&ui::format_money(amount, symbol), ui::StyleType::TotalLabel),
        ui::style_text(&country.name, ui::StyleType::Title),
        rates_summary(country, &rates),
        loss_table(&estimate, symbol),
    );

    let mut notes: Vec<String> = Vec::new();
    for err in estimate.horizons.iter().filter_map(|h| h.loss.as_ref().err()) {
        let message = err.status_message();
        if !notes.contains(&message) {
            notes.push(message);
        }
    }
    if !rates.has_interest_rate {
        notes.push("No interest-rate data: the estimate covers inflation erosion only.".to_string());
    }
    for note in notes {
        output.push_str(&format!("\n{}", ui::style_text(&note, ui::StyleType::Subtle)));
    }

    if let Some(longest) = estimate
        .horizons
        .iter()
        .filter_map(|h| h.loss.as_ref().ok().map(|b| (h.years, b.total)))
        .max_by(|a, b| a.0.total_cmp(&b.0))
    {
        output.push_str(&format!(
            "\n\nLoss in today's money after {}: {}",
            ui::format_horizon(longest.0),
            ui::style_text(&ui::format_money(longest.1, symbol), ui::StyleType::TotalValue)
        ));
    }
    output
}

pub fn run(dataset: &Dataset, amount: Option<&str>, country: Option<&str>, horizons: &[f64]) {
    info!("Estimating purchasing-power loss...");
    if dataset.is_fallback() {
        println!(
            "{}",
            ui::style_text(
                "Country data unavailable, using built-in data for the United States.",
                ui::StyleType::Subtle
            )
        );
    }
    println!("{}", render(dataset, amount, country, horizons));
}
