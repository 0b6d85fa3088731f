//! Core logic for inline time annotations.
//!
//! Annotations are short runs of time ranges kept inside ordinary text:
//!
//! ```text
//! time: 08:20-09:20 10:00-11:45 13:00-
//! ```
//!
//! This crate contains:
//! - Clock text parsing and formatting
//! - Range accumulation with wraparound and open ranges
//! - Locating annotations, including ones continued over several lines
//! - Toggling ranges on and off, with line wrapping
//! - Summaries over one, all or selected annotations
//!
//! All editing goes through the [`TextSurface`] trait.

mod accumulate;
pub mod clock;
mod config;
pub mod error;
pub mod locate;
mod summary;
pub mod surface;
mod toggle;
mod wrap;

pub use accumulate::{Accumulation, RangeToken, accumulate};
pub use clock::{ClockMode, Precision};
pub use config::{Config, ConfigError};
pub use error::{ClockError, NotFound, Warning};
pub use locate::{Annotation, Search};
pub use summary::{Summary, SummaryMode, show_summary, summarize};
pub use surface::{BufferSurface, TextSurface};
pub use toggle::{AnnotationState, ToggleOutcome, insert, toggle};
pub use wrap::split_if_needed;
