//! Rebuilds the country dataset from IMF CSV exports.
//!
//! Both the CPI and the interest-rate exports share a layout: descriptive
//! columns (`SERIES_CODE`, `FREQUENCY`, ...) followed by one column per
//! period key (`2024-M01`, `2024-Q1`, `2024`).

pub mod build;
pub mod cpi;
pub mod rates;

use crate::core::period::Period;
use anyhow::{Context, Result};
use csv::StringRecord;
use std::collections::HashMap;
use std::io::Read;

/// Records whose latest observation is older than this year are dropped.
pub const DEFAULT_MIN_YEAR: i32 = 2023;

const ISO3_TO_ISO2: [(&str, &str); 25] = [
    ("USA", "US"),
    ("CAN", "CA"),
    ("GBR", "GB"),
    ("DEU", "DE"),
    ("FRA", "FR"),
    ("ITA", "IT"),
    ("ESP", "ES"),
    ("NLD", "NL"),
    ("POL", "PL"),
    ("BEL", "BE"),
    ("AUT", "AT"),
    ("AUS", "AU"),
    ("JPN", "JP"),
    ("CHN", "CN"),
    ("IND", "IN"),
    ("BRA", "BR"),
    ("MEX", "MX"),
    ("CHE", "CH"),
    ("SWE", "SE"),
    ("NOR", "NO"),
    ("PRT", "PT"),
    ("CZE", "CZ"),
    ("ROU", "RO"),
    ("TUR", "TR"),
    ("ZAF", "ZA"),
];

/// Two-letter codes of every country the import covers.
pub fn target_countries() -> impl Iterator<Item = &'static str> {
    ISO3_TO_ISO2.iter().map(|(_, iso2)| *iso2)
}

fn iso2_for_iso3(iso3: &str) -> Option<&'static str> {
    ISO3_TO_ISO2
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(iso3))
        .map(|(_, iso2)| *iso2)
}

/// Monthly series beat quarterly, which beat annual. Anything else is skipped.
fn frequency_priority(frequency: &str) -> u8 {
    match frequency {
        "Monthly" => 3,
        "Quarterly" => 2,
        "Annual" => 1,
        _ => 0,
    }
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Point {
    pub value: f64,
    pub label: String,
    pub period: Period,
}

struct TimeColumn {
    index: usize,
    label: String,
    period: Period,
}

/// An IMF export held in memory.
pub(crate) struct ImfTable {
    columns: HashMap<String, usize>,
    time_columns: Vec<TimeColumn>,
    rows: Vec<StringRecord>,
}

impl ImfTable {
    pub fn read<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = reader.headers().context("Failed to read CSV header")?.clone();

        let mut columns = HashMap::new();
        let mut time_columns = Vec::new();
        for (index, name) in headers.iter().enumerate() {
            let name = name.trim();
            columns.insert(name.to_string(), index);
            if let Some(period) = Period::parse(name) {
                time_columns.push(TimeColumn {
                    index,
                    label: name.to_string(),
                    period,
                });
            }
        }

        let rows = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read CSV rows")?;
        Ok(ImfTable {
            columns,
            time_columns,
            rows,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = &StringRecord> {
        self.rows.iter()
    }

    pub fn field<'a>(&self, row: &'a StringRecord, name: &str) -> &'a str {
        self.columns
            .get(name)
            .and_then(|&i| row.get(i))
            .unwrap_or("")
            .trim()
    }

    /// Target country of a row, from the ISO3 prefix of `SERIES_CODE`.
    pub fn country(&self, row: &StringRecord) -> Option<&'static str> {
        let (iso3, _) = self.field(row, "SERIES_CODE").split_once('.')?;
        iso2_for_iso3(iso3)
    }

    pub fn frequency_priority(&self, row: &StringRecord) -> u8 {
        frequency_priority(self.field(row, "FREQUENCY"))
    }

    /// Non-empty numeric observations of a row, oldest first.
    pub fn points(&self, row: &StringRecord) -> Vec<Point> {
        let mut points: Vec<Point> = self
            .time_columns
            .iter()
            .filter_map(|col| {
                let value: f64 = row.get(col.index)?.trim().parse().ok()?;
                value.is_finite().then(|| Point {
                    value,
                    label: col.label.clone(),
                    period: col.period,
                })
            })
            .collect();
        points.sort_by_key(|p| p.period.sort_key());
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_rows_and_time_columns() {
        let csv = "SERIES_CODE,FREQUENCY,2024-M02,2024-M01,notes\n\
                   USA.CPI.M,Monthly,101.5,100.0,x\n\
                   XXX.CPI.M,Monthly,1,2,\n";
        let table = ImfTable::read(csv.as_bytes()).unwrap();
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows.len(), 2);

        assert_eq!(table.country(rows[0]), Some("US"));
        assert_eq!(table.country(rows[1]), None);
        assert_eq!(table.frequency_priority(rows[0]), 3);

        let points = table.points(rows[0]);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].label, "2024-M01");
        assert_eq!(points[1].value, 101.5);
    }

    #[test]
    fn covers_twenty_five_countries() {
        assert_eq!(target_countries().count(), 25);
        assert_eq!(iso2_for_iso3("zaf"), Some("ZA"));
        assert_eq!(frequency_priority("Weekly"), 0);
        assert_eq!(round6(1.23456789), 1.234568);
    }
}
