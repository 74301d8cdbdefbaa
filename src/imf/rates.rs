//! Latest policy/interest rate per country from the IMF MFS_IR export.
use super::{ImfTable, Point, round6, target_countries};
use crate::core::country::RateReading;
use anyhow::Result;
use std::collections::BTreeMap;
use std::io::Read;
use tracing::debug;

struct Candidate {
    latest: Point,
    freq_priority: u8,
    indicator_priority: u8,
}

impl Candidate {
    fn score(&self) -> (i64, u8, u8) {
        (
            self.latest.period.sort_key(),
            self.freq_priority,
            self.indicator_priority,
        )
    }
}

fn indicator_priority(indicator: &str) -> u8 {
    let normalized = indicator.to_lowercase();
    if normalized.contains("monetary policy-related") {
        3
    } else if normalized.contains("discount rate") {
        2
    } else {
        1
    }
}

/// Parses an IMF interest-rate export into the latest rate per target country.
pub fn parse_rates<R: Read>(
    reader: R,
    min_year: i32,
) -> Result<BTreeMap<String, Option<RateReading>>> {
    let table = ImfTable::read(reader)?;
    let mut best: BTreeMap<&'static str, Candidate> = BTreeMap::new();

    for row in table.rows() {
        let Some(country) = table.country(row) else {
            continue;
        };
        let freq_priority = table.frequency_priority(row);
        if freq_priority == 0 {
            continue;
        }
        let Some(latest) = table.points(row).pop() else {
            continue;
        };
        let candidate = Candidate {
            latest,
            freq_priority,
            indicator_priority: indicator_priority(table.field(row, "INDICATOR")),
        };

        let better = best
            .get(country)
            .is_none_or(|current| candidate.score() > current.score());
        if better {
            best.insert(country, candidate);
        }
    }

    let mut output = BTreeMap::new();
    for country in target_countries() {
        let reading = best
            .remove(country)
            .filter(|c| c.latest.period.year >= min_year)
            .map(|c| RateReading {
                value: round6(c.latest.value),
                date: Some(c.latest.label),
            });
        output.insert(country.to_string(), reading);
    }

    let covered = output.values().filter(|v| v.is_some()).count();
    debug!("Countries with rate data: {}/{}", covered, output.len());
    Ok(output)
}
