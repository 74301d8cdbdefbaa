//! Headline CPI per country: the latest index value and the value about one
//! year earlier.
use super::{ImfTable, Point, round6, target_countries};
use crate::core::country::CpiReading;
use anyhow::Result;
use std::collections::BTreeMap;
use std::io::Read;
use tracing::debug;

struct Candidate {
    latest: Point,
    previous: Option<Point>,
    freq_priority: u8,
}

impl Candidate {
    fn score(&self) -> (i64, u8, u8) {
        (
            self.latest.period.sort_key(),
            self.freq_priority,
            u8::from(self.previous.is_some()),
        )
    }
}

fn row_candidate(mut points: Vec<Point>, freq_priority: u8) -> Option<Candidate> {
    let latest = points.pop()?;
    let target = latest.period.sort_key() - 12;
    let previous = points
        .into_iter()
        .rev()
        .find(|p| p.period.sort_key() <= target);
    Some(Candidate {
        latest,
        previous,
        freq_priority,
    })
}

/// Parses an IMF CPI export into a reading per target country.
///
/// Only `All Items` index rows count. A country gets `None` when it has no
/// such row, its latest observation predates `min_year`, or no observation
/// exists a year before the latest one.
pub fn parse_cpi<R: Read>(reader: R, min_year: i32) -> Result<BTreeMap<String, Option<CpiReading>>> {
    let table = ImfTable::read(reader)?;
    let mut best: BTreeMap<&'static str, Candidate> = BTreeMap::new();

    for row in table.rows() {
        let Some(country) = table.country(row) else {
            continue;
        };
        if table.field(row, "COICOP_1999") != "All Items"
            || table.field(row, "TYPE_OF_TRANSFORMATION") != "Index"
        {
            continue;
        }
        let freq_priority = table.frequency_priority(row);
        if freq_priority == 0 {
            continue;
        }
        let Some(candidate) = row_candidate(table.points(row), freq_priority) else {
            continue;
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
        let reading = best.remove(country).and_then(|c| {
            if c.latest.period.year < min_year {
                debug!("Dropping stale CPI for {}: {}", country, c.latest.label);
                return None;
            }
            let previous = c.previous?;
            Some(CpiReading {
                latest: round6(c.latest.value),
                latest_date: c.latest.label,
                previous: round6(previous.value),
                previous_date: previous.label,
            })
        });
        output.insert(country.to_string(), reading);
    }

    let covered = output.values().filter(|v| v.is_some()).count();
    debug!("Countries with CPI data: {}/{}", covered, output.len());
    Ok(output)
}
