use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

pub const NATIONWIDE_LABEL: &str = "All (Nationwide)";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    #[serde(rename = "dateChecked", deserialize_with = "date_prefix")]
    pub date: NaiveDate,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub positive_increase: i64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub negative_increase: i64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub death_increase: i64,
}

impl DailyRecord {
    pub fn value(&self, metric: Metric) -> i64 {
        match metric {
            Metric::Positive => self.positive_increase,
            Metric::Negative => self.negative_increase,
            Metric::Death => self.death_increase,
        }
    }
}

// The feed emits timestamps like `2021-03-07T24:00:00Z`, so only the date is parsed.
fn date_prefix<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let day = raw.split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(serde::de::Error::custom)
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Metric {
    #[default]
    Positive,
    Negative,
    Death,
}

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Metric::Positive => "positive cases",
            Metric::Negative => "negative tests",
            Metric::Death => "deaths",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TimeScale {
    Week,
    Month,
    #[default]
    Max,
}

impl TimeScale {
    /// Width of the trailing window, `None` meaning every available day.
    pub fn num_days(self) -> Option<usize> {
        match self {
            TimeScale::Week => Some(7),
            TimeScale::Month => Some(30),
            TimeScale::Max => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum RegionSelection {
    #[default]
    Nationwide,
    Region(String),
}

impl FromStr for RegionSelection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == NATIONWIDE_LABEL
            || ["all", "nationwide", "us"]
                .iter()
                .any(|alias| trimmed.eq_ignore_ascii_case(alias))
        {
            return Ok(RegionSelection::Nationwide);
        }
        Ok(RegionSelection::Region(trimmed.to_ascii_uppercase()))
    }
}

impl fmt::Display for RegionSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionSelection::Nationwide => f.write_str(NATIONWIDE_LABEL),
            RegionSelection::Region(code) => f.write_str(code),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DataBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateInfo {
    pub date: NaiveDate,
    pub value: i64,
    pub metric: Metric,
}
