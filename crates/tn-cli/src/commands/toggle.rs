//! Toggle command for clocking on and off.

use std::io::Write;

use anyhow::Result;
use tn_core::Config;

use crate::EditArgs;
use crate::commands::util::{finish_edit, open_surface};

pub fn run<W: Write>(writer: &mut W, args: &EditArgs, config: &Config) -> Result<()> {
    let mut surface = open_surface(&args.target, config, true)?;
    let outcome = tn_core::toggle(&mut surface, config);
    tracing::info!(?outcome, path = ?args.target.file, "toggled");
    finish_edit(writer, &surface, &args.target.file, args.stdout)
}
