//! Insert command for writing the current time at the cursor.

use std::io::Write;

use anyhow::Result;
use tn_core::Config;

use crate::EditArgs;
use crate::commands::util::{finish_edit, open_surface};

pub fn run<W: Write>(writer: &mut W, args: &EditArgs, config: &Config) -> Result<()> {
    let mut surface = open_surface(&args.target, config, true)?;
    let inserted = tn_core::insert(&mut surface, config);
    tracing::info!(inserted = inserted.trim(), path = ?args.target.file, "inserted time");
    finish_edit(writer, &surface, &args.target.file, args.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::Target;

    #[test]
    fn insert_at_line_and_column() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("log.txt");
        std::fs::write(&path, "time: 8:00-\nnotes\n").unwrap();

        let args = EditArgs {
            target: Target {
                file: path.clone(),
                line: Some(1),
                column: None,
                now: Some("8:45".to_string()),
            },
            stdout: false,
        };
        let mut output = Vec::new();
        run(&mut output, &args, &Config::default()).unwrap();

        assert!(output.is_empty());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "time: 8:00-8:45\nnotes\n"
        );
    }

    #[test]
    fn insert_to_stdout_leaves_file_alone() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("log.txt");
        std::fs::write(&path, "time: 8:00-9:00").unwrap();

        let args = EditArgs {
            target: Target {
                file: path.clone(),
                line: None,
                column: None,
                now: Some("9:30".to_string()),
            },
            stdout: true,
        };
        let mut output = Vec::new();
        run(&mut output, &args, &Config::default()).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "time: 8:00-9:00 9:30");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "time: 8:00-9:00");
    }
}
