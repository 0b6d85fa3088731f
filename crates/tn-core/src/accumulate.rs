//! Range accumulation.
//!
//! Sums `start-end` tokens into a total duration. Ranges whose end reads
//! earlier than their start crossed the wrap boundary once. Open ranges
//! (`start` or `start-`) run until the current time.

use chrono::NaiveTime;

use crate::clock::{clock_seconds, parse_clock};
use crate::config::Config;
use crate::error::{ClockError, Warning};

/// Total of one or more token sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulation {
    pub total_seconds: u64,

    /// Whether the last accumulated range was open.
    pub incomplete: bool,

    /// Problems found along the way; none of them stopped accumulation.
    pub warnings: Vec<Warning>,
}

impl Accumulation {
    /// Folds another accumulation into this one.
    pub fn merge(&mut self, other: Self) {
        self.total_seconds += other.total_seconds;
        self.incomplete |= other.incomplete;
        self.warnings.extend(other.warnings);
    }
}

/// A single range token split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeToken<'a> {
    pub start: &'a str,
    /// `None` while the range is still open.
    pub end: Option<&'a str>,
}

impl<'a> RangeToken<'a> {
    pub fn parse(token: &'a str, separator: &str) -> Self {
        match token.split_once(separator) {
            Some((start, end)) if !end.is_empty() => Self {
                start,
                end: Some(end),
            },
            Some((start, _)) => Self { start, end: None },
            None => Self {
                start: token,
                end: None,
            },
        }
    }

    pub const fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Seconds covered by this range, closing an open range at `now_seconds`.
    pub fn span(&self, now_seconds: u64, config: &Config) -> Result<u64, ClockError> {
        let start = parse_clock(self.start)?;
        let end = match self.end {
            Some(end) => parse_clock(end)?,
            None => now_seconds,
        };
        let raw = i128::from(end) - i128::from(start);
        let span = if raw < 0 {
            raw + i128::from(config.clock.wrap_seconds())
        } else {
            raw
        };
        Ok(u64::try_from(span).unwrap_or(0))
    }
}

/// Sums the spans of `tokens`.
///
/// Open ranges are closed at `now`. Only the last token may be open, and
/// only when `allow_incomplete` is set; anything else is warned about and
/// accumulated regardless. Malformed tokens add nothing.
pub fn accumulate<'a, I>(
    tokens: I,
    allow_incomplete: bool,
    now: NaiveTime,
    config: &Config,
) -> Accumulation
where
    I: IntoIterator<Item = &'a str>,
{
    let now_seconds = clock_seconds(now, config.clock, config.precision);
    let mut result = Accumulation::default();
    let mut tokens = tokens.into_iter().peekable();

    while let Some(token) = tokens.next() {
        let range = RangeToken::parse(token, &config.separator);
        let is_last = tokens.peek().is_none();

        if range.is_open() {
            if !allow_incomplete {
                result.warnings.push(Warning::IncompleteNotAllowed {
                    token: token.to_string(),
                });
            }
            if !is_last {
                result.warnings.push(Warning::IncompleteNotLast {
                    token: token.to_string(),
                });
            }
        }

        match range.span(now_seconds, config) {
            Ok(span) => result.total_seconds += span,
            Err(source) => result.warnings.push(Warning::MalformedTime {
                token: token.to_string(),
                source,
            }),
        }
        result.incomplete = range.is_open();
    }

    for warning in &result.warnings {
        tracing::warn!(%warning, "time range warning");
    }
    result
}
