//! CLI subcommand implementations.

pub mod insert;
pub mod summary;
pub mod toggle;
pub mod util;
