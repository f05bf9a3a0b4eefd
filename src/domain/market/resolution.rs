use anyhow::{Result, anyhow};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sampling interval of a bar series
///
/// A mixed-resolution table tags every row with one of these intervals.
/// Tags must never be ordered lexically: "15m" sorts before "5m" as a
/// string, so reassembly always goes through an explicit canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    OneMin,
    FiveMin,
    FifteenMin,
    ThirtyMin,
    OneHour,
    OneDay,
}

impl Resolution {
    /// Returns the duration of this resolution in minutes
    pub fn to_minutes(&self) -> usize {
        match self {
            Resolution::OneMin => 1,
            Resolution::FiveMin => 5,
            Resolution::FifteenMin => 15,
            Resolution::ThirtyMin => 30,
            Resolution::OneHour => 60,
            Resolution::OneDay => 1440,
        }
    }

    /// Returns the duration of this resolution
    pub fn duration(&self) -> Duration {
        Duration::minutes(self.to_minutes() as i64)
    }

    /// Tag used in resolution columns ("5m", "60m", ...)
    pub fn as_tag(&self) -> &'static str {
        match self {
            Resolution::OneMin => "1m",
            Resolution::FiveMin => "5m",
            Resolution::FifteenMin => "15m",
            Resolution::ThirtyMin => "30m",
            Resolution::OneHour => "60m",
            Resolution::OneDay => "1d",
        }
    }

    /// Intraday resolutions in canonical (ascending-duration) order
    pub fn intraday() -> [Resolution; 4] {
        [
            Resolution::FiveMin,
            Resolution::FifteenMin,
            Resolution::ThirtyMin,
            Resolution::OneHour,
        ]
    }

    /// Canonical intraday tag order for the aggregator
    pub fn intraday_tags() -> [&'static str; 4] {
        Resolution::intraday().map(|r| r.as_tag())
    }

    /// Returns all resolutions in ascending-duration order
    pub fn all() -> Vec<Resolution> {
        vec![
            Resolution::OneMin,
            Resolution::FiveMin,
            Resolution::FifteenMin,
            Resolution::ThirtyMin,
            Resolution::OneHour,
            Resolution::OneDay,
        ]
    }
}

impl FromStr for Resolution {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "1m" | "1min" => Ok(Resolution::OneMin),
            "5m" | "5min" => Ok(Resolution::FiveMin),
            "15m" | "15min" => Ok(Resolution::FifteenMin),
            "30m" | "30min" => Ok(Resolution::ThirtyMin),
            "60m" | "1h" | "1hour" => Ok(Resolution::OneHour),
            "1d" | "1day" => Ok(Resolution::OneDay),
            _ => Err(anyhow!(
                "Invalid resolution: '{}'. Valid options: 1m, 5m, 15m, 30m, 60m, 1d",
                s
            )),
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}
