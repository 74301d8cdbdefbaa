//! IMF period keys such as `2025-M03`, `2025-Q2` and `2025`.

use chrono::NaiveDate;
use regex::Regex;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::LazyLock;

static MONTHLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-M(0[1-9]|1[0-2])$").expect("valid regex"));
static QUARTERLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-Q([1-4])$").expect("valid regex"));
static ANNUAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{4})$").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Frequency {
    Annual,
    Quarterly,
    Monthly,
}

/// A reporting period. Quarters resolve to their last month, years to December.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    pub year: i32,
    pub month: u32,
    pub frequency: Frequency,
}

impl Period {
    pub fn parse(key: &str) -> Option<Self> {
        let key = key.trim();
        if let Some(caps) = MONTHLY.captures(key) {
            return Some(Period {
                year: caps[1].parse().ok()?,
                month: caps[2].parse().ok()?,
                frequency: Frequency::Monthly,
            });
        }
        if let Some(caps) = QUARTERLY.captures(key) {
            let quarter: u32 = caps[2].parse().ok()?;
            return Some(Period {
                year: caps[1].parse().ok()?,
                month: quarter * 3,
                frequency: Frequency::Quarterly,
            });
        }
        if let Some(caps) = ANNUAL.captures(key) {
            return Some(Period {
                year: caps[1].parse().ok()?,
                month: 12,
                frequency: Frequency::Annual,
            });
        }
        None
    }

    /// Months since year 0, used to order and diff periods.
    pub fn sort_key(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month)
    }
}

impl FromStr for Period {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::parse(s).ok_or_else(|| anyhow::anyhow!("Invalid period key: {}", s))
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.frequency {
            Frequency::Annual => write!(f, "{}", self.year),
            Frequency::Quarterly => write!(f, "Q{} {}", self.month / 3, self.year),
            Frequency::Monthly => match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
                Some(date) => write!(f, "{}", date.format("%b %Y")),
                None => write!(f, "{}-M{:02}", self.year, self.month),
            },
        }
    }
}

/// Renders a raw period label for people, leaving unknown formats untouched.
pub fn display_label(label: &str) -> String {
    Period::parse(label).map_or_else(|| label.to_string(), |p| p.to_string())
}
