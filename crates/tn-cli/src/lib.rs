//! Inline time annotation CLI library.
//!
//! This crate provides the command-line host for `tn-core`: it loads a
//! text file, runs one operation at a cursor or selection and saves the
//! result.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, EditArgs, SummaryArgs, Target};
pub use config::{dirs_config_path, load_config};
