//! Readable derivation of the rates and loss formulas for one country.
use crate::core::country::{CountryRecord, EconomicData};
use crate::core::period::display_label;
use crate::core::rates::{DerivedRates, derive_rates};
use std::fmt::{self, Display};

/// A formula, the same formula with numbers substituted, and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaLine {
    pub formula: String,
    pub substituted: String,
    pub result: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RateExplanation {
    Derived(FormulaLine),
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    pub title: String,
    pub inflation: Option<RateExplanation>,
    pub interest: Option<RateExplanation>,
    pub loss_formulas: Vec<String>,
    pub notes: Vec<String>,
}

impl Explanation {
    fn placeholder(title: &str, note: String) -> Self {
        Explanation {
            title: title.to_string(),
            inflation: None,
            interest: None,
            loss_formulas: Vec::new(),
            notes: vec![note],
        }
    }
}

pub fn build_explanation(country: Option<&CountryRecord>) -> Explanation {
    let Some(country) = country else {
        return Explanation::placeholder(
            "How the estimate works",
            "Select a country to see how its inflation and interest rates are derived."
                .to_string(),
        );
    };

    let rates = match derive_rates(country) {
        Ok(rates) => rates,
        Err(e) => {
            return Explanation::placeholder(
                &format!("How the estimate works for {}", country.name),
                format!("No usable inflation data is available for {} ({e}).", country.name),
            );
        }
    };

    let mut notes = Vec::new();
    let interest = if rates.has_interest_rate {
        RateExplanation::Derived(interest_line(country, &rates))
    } else {
        notes.push("Only inflation erosion is included in the estimate.".to_string());
        RateExplanation::Unavailable(format!(
            "Interest rate unavailable for {}, assuming 0%.",
            country.name
        ))
    };

    Explanation {
        title: format!("How the estimate works for {}", country.name),
        inflation: Some(RateExplanation::Derived(inflation_line(country, &rates))),
        interest: Some(interest),
        loss_formulas: loss_formulas(&rates),
        notes,
    }
}

fn inflation_line(country: &CountryRecord, rates: &DerivedRates) -> FormulaLine {
    let result = format!("= {}", percent(rates.inflation));
    match country.economic_data() {
        EconomicData::Cpi { cpi, .. } => FormulaLine {
            formula: "inflation = CPI(latest) / CPI(previous) - 1".to_string(),
            substituted: format!(
                "inflation = {} ({}) / {} ({}) - 1",
                cpi.latest,
                display_label(&cpi.latest_date),
                cpi.previous,
                display_label(&cpi.previous_date),
            ),
            result,
        },
        EconomicData::Annual {
            inflation_percent, ..
        } => FormulaLine {
            formula: "inflation = annual inflation % / 100".to_string(),
            substituted: format!("inflation = {inflation_percent} / 100"),
            result,
        },
        EconomicData::Missing => FormulaLine {
            formula: "inflation = unavailable".to_string(),
            substituted: String::new(),
            result,
        },
    }
}

fn interest_line(country: &CountryRecord, rates: &DerivedRates) -> FormulaLine {
    let as_of = country
        .rate
        .as_ref()
        .and_then(|r| r.date.as_deref())
        .map(|d| format!(" ({})", display_label(d)))
        .unwrap_or_default();
    let rate_percent = match country.economic_data() {
        EconomicData::Cpi { rate: Some(r), .. } => r,
        EconomicData::Annual {
            savings_rate_percent: Some(r),
            ..
        } => r,
        _ => rates.interest * 100.0,
    };
    FormulaLine {
        formula: "interest = annual rate % / 100".to_string(),
        substituted: format!("interest = {rate_percent}{as_of} / 100"),
        result: format!("= {}", percent(rates.interest)),
    }
}

fn loss_formulas(rates: &DerivedRates) -> Vec<String> {
    let i = decimal(rates.inflation);
    let r = if rates.has_interest_rate {
        decimal(rates.interest)
    } else {
        "0 (assumed)".to_string()
    };
    vec![
        format!("growth = (1 + inflation)^years = (1 + {i})^years"),
        "erosion = amount * (1 - 1 / growth)".to_string(),
        format!(
            "opportunity cost = (amount / growth) * ((1 + interest)^years - 1) = (amount / growth) * ((1 + {r})^years - 1)"
        ),
        "loss = erosion + opportunity cost".to_string(),
    ]
}

fn percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

fn decimal(rate: f64) -> String {
    format!("{rate:.4}")
}

impl Display for RateExplanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateExplanation::Derived(line) => {
                writeln!(f, "  {}", line.formula)?;
                writeln!(f, "  {}", line.substituted)?;
                write!(f, "  {}", line.result)
            }
            RateExplanation::Unavailable(note) => write!(f, "  {note}"),
        }
    }
}

impl Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if let Some(inflation) = &self.inflation {
            writeln!(f, "\nInflation\n{inflation}")?;
        }
        if let Some(interest) = &self.interest {
            writeln!(f, "\nInterest\n{interest}")?;
        }
        if !self.loss_formulas.is_empty() {
            writeln!(f, "\nLoss in today's money")?;
            for line in &self.loss_formulas {
                writeln!(f, "  {line}")?;
            }
        }
        for note in &self.notes {
            writeln!(f, "\n{note}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::country::{CpiReading, RateReading};

    fn record(rate: Option<f64>) -> CountryRecord {
        CountryRecord {
            id: "ZZ".to_string(),
            name: "Testland".to_string(),
            currency_code: None,
            currency_symbol: None,
            cpi: Some(CpiReading {
                latest: 102.1,
                latest_date: "2025-M03".to_string(),
                previous: 100.0,
                previous_date: "2024-M03".to_string(),
            }),
            rate: rate.map(|value| RateReading {
                value,
                date: Some("2025-M02".to_string()),
            }),
            inflation: None,
            savings_rate: None,
        }
    }

    #[test]
    fn substitutes_cpi_and_rate() {
        let explanation = build_explanation(Some(&record(Some(4.0))));
        let Some(RateExplanation::Derived(inflation)) = &explanation.inflation else {
            panic!("Expected derived inflation");
        };
        assert_eq!(
            inflation.substituted,
            "inflation = 102.1 (Mar 2025) / 100 (Mar 2024) - 1"
        );
        assert_eq!(inflation.result, "= 2.10%");

        let Some(RateExplanation::Derived(interest)) = &explanation.interest else {
            panic!("Expected derived interest");
        };
        assert_eq!(interest.result, "= 4.00%");
        assert!(interest.substituted.contains("Feb 2025"));
        assert_eq!(explanation.loss_formulas.len(), 4);
        assert!(explanation.notes.is_empty());
    }

    #[test]
    fn missing_rate_is_stated_not_zeroed() {
        let explanation = build_explanation(Some(&record(None)));
        assert!(matches!(
            explanation.interest,
            Some(RateExplanation::Unavailable(_))
        ));
        let text = explanation.to_string();
        assert!(text.contains("Interest rate unavailable for Testland, assuming 0%."));
        assert!(!text.contains("= 0.00%"));
        assert!(text.contains("((1 + 0 (assumed))^years - 1)"));
        assert!(!text.contains("0.0000"));
    }

    #[test]
    fn no_country_gives_placeholder() {
        let explanation = build_explanation(None);
        assert!(explanation.inflation.is_none());
        assert!(explanation.to_string().contains("Select a country"));
    }

    #[test]
    fn unusable_country_gives_placeholder() {
        let mut broken = record(Some(4.0));
        broken.cpi.as_mut().unwrap().previous = 0.0;
        let explanation = build_explanation(Some(&broken));
        assert!(explanation.inflation.is_none());
        assert!(explanation.notes[0].starts_with("No usable inflation data is available for Testland"));
    }
}
