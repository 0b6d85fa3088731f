//! Error and warning taxonomy.
//!
//! Nothing here is fatal to the host. Clock errors are turned into
//! accumulation warnings, and lookup failures are reported as notifications.

use thiserror::Error;

/// Failure to parse a clock value such as `9:05` or `17:30:00`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// A segment is not a non-negative integer.
    #[error("malformed time {text:?}: segment {segment:?} is not a non-negative integer")]
    Malformed { text: String, segment: String },

    /// More than `H:MM:SS` worth of segments.
    #[error("malformed time {text:?}: too many segments")]
    TooManySegments { text: String },
}

/// Non-fatal conditions raised while accumulating time ranges.
///
/// Accumulation always completes; warnings travel alongside the result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A token could not be parsed; it contributed no time.
    #[error("ignoring token {token:?}: {source}")]
    MalformedTime {
        token: String,
        #[source]
        source: ClockError,
    },

    /// An open range where the caller does not permit one.
    #[error("open range {token:?} closed at the current time")]
    IncompleteNotAllowed { token: String },

    /// An open range followed by further tokens.
    #[error("open range {token:?} is not the last entry")]
    IncompleteNotLast { token: String },
}

/// Lookups that came back empty.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NotFound {
    #[error("no time marker found")]
    Marker,

    #[error("no time annotation found")]
    Annotation,

    #[error("no selection")]
    Selection,
}
