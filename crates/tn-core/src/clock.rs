//! Clock text codec.
//!
//! Clock values are written as `H`, `H:MM` or `H:MM:SS` and handled
//! internally as whole seconds. Hours are never padded and never bounded,
//! so the same formatter renders both times of day and durations.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ClockError;

const SECONDS_PER_HOUR: u64 = 3600;
const SECONDS_PER_MINUTE: u64 = 60;

/// How much of a clock value is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Hours,
    #[default]
    Minutes,
    Seconds,
}

impl Precision {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Precision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hours" => Ok(Self::Hours),
            "minutes" => Ok(Self::Minutes),
            "seconds" => Ok(Self::Seconds),
            _ => Err(format!("unknown precision: {s}")),
        }
    }
}

/// Whether the hour field runs over 12 or 24 hours.
///
/// The mode also fixes the wrap period applied to ranges whose end reads
/// earlier than their start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClockMode {
    Twelve,
    #[default]
    TwentyFour,
}

impl ClockMode {
    pub const fn hours(&self) -> u32 {
        match self {
            Self::Twelve => 12,
            Self::TwentyFour => 24,
        }
    }

    /// Length of one wrap period in seconds.
    pub const fn wrap_seconds(&self) -> i64 {
        match self {
            Self::Twelve => 12 * 3600,
            Self::TwentyFour => 24 * 3600,
        }
    }
}

impl fmt::Display for ClockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hours())
    }
}

impl FromStr for ClockMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "12" | "12h" => Ok(Self::Twelve),
            "24" | "24h" => Ok(Self::TwentyFour),
            _ => Err(format!("unknown clock mode: {s} (expected 12 or 24)")),
        }
    }
}

impl Serialize for ClockMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(self.hours())
    }
}

impl<'de> Deserialize<'de> for ClockMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // TOML and environment values may arrive as numbers or strings.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(12) => Ok(Self::Twelve),
            Raw::Number(24) => Ok(Self::TwentyFour),
            Raw::Number(n) => Err(serde::de::Error::custom(format!(
                "unknown clock mode: {n} (expected 12 or 24)"
            ))),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Parses `H`, `H:MM` or `H:MM:SS` into seconds.
///
/// Missing segments count as zero. Segments are not range checked, so
/// `0:90` is ninety minutes.
pub fn parse_clock(text: &str) -> Result<u64, ClockError> {
    let segments: Vec<&str> = text.split(':').collect();
    if segments.len() > 3 {
        return Err(ClockError::TooManySegments {
            text: text.to_string(),
        });
    }

    let weights = [SECONDS_PER_HOUR, SECONDS_PER_MINUTE, 1];
    let mut total: u64 = 0;
    for (segment, weight) in segments.iter().zip(weights) {
        let malformed = || ClockError::Malformed {
            text: text.to_string(),
            segment: (*segment).to_string(),
        };
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let value: u64 = segment.parse().map_err(|_| malformed())?;
        total = value
            .checked_mul(weight)
            .and_then(|v| total.checked_add(v))
            .ok_or_else(malformed)?;
    }
    Ok(total)
}

/// Formats seconds as clock text at the given precision.
///
/// Finer components are truncated, not rounded.
pub fn format_clock(seconds: u64, precision: Precision) -> String {
    let hours = seconds / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let secs = seconds % SECONDS_PER_MINUTE;
    match precision {
        Precision::Hours => format!("{hours}"),
        Precision::Minutes => format!("{hours}:{minutes:02}"),
        Precision::Seconds => format!("{hours}:{minutes:02}:{secs:02}"),
    }
}

/// Seconds-of-day for `now` as it would be written in an annotation.
///
/// In 12-hour mode the hour field reads 12 at noon and midnight.
pub fn clock_seconds(now: NaiveTime, mode: ClockMode, precision: Precision) -> u64 {
    let hour = match mode {
        ClockMode::TwentyFour => now.hour(),
        ClockMode::Twelve => match now.hour() % 12 {
            0 => 12,
            h => h,
        },
    };
    let mut seconds = u64::from(hour) * SECONDS_PER_HOUR;
    if precision != Precision::Hours {
        seconds += u64::from(now.minute()) * SECONDS_PER_MINUTE;
    }
    if precision == Precision::Seconds {
        seconds += u64::from(now.second());
    }
    seconds
}

/// Renders the current wall-clock time as annotation text.
pub fn current_clock_text(now: NaiveTime, mode: ClockMode, precision: Precision) -> String {
    format_clock(clock_seconds(now, mode, precision), precision)
}
