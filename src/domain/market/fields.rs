use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic fields an input table must resolve before computation.
///
/// Upstream sources disagree on column naming: FinMind-style feeds ship
/// `max`/`min`/`Trading_Volume`, Yahoo-style feeds ship `High`/`Low`/
/// `Volume`. Each field therefore carries an ordered candidate list and the
/// first candidate present in the table wins. Resolution happens exactly
/// once, at pipeline entry; an unresolved required field is a hard failure,
/// never a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Timestamp,
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl Field {
    /// Semantic name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            Field::Timestamp => "timestamp",
            Field::Open => "open",
            Field::High => "high",
            Field::Low => "low",
            Field::Close => "close",
            Field::Volume => "volume",
        }
    }

    /// Candidate column names, highest precedence first.
    pub fn candidates(&self) -> &'static [&'static str] {
        match self {
            Field::Timestamp => &["timestamp", "Datetime", "Date"],
            Field::Open => &["open", "Open"],
            Field::High => &["max", "High"],
            Field::Low => &["min", "Low"],
            Field::Close => &["close", "Close"],
            Field::Volume => &["Trading_Volume", "Volume"],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
