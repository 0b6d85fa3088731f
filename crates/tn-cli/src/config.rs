//! Configuration loading.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use tn_core::Config;

/// Loads configuration, optionally from a specific file.
///
/// Later sources win: built-in defaults, the user config file, `path`, then
/// `TN_*` environment variables.
#[expect(
    clippy::result_large_err,
    reason = "figment::Error is large but only returned at startup"
)]
pub fn load_config(path: Option<&Path>) -> Result<Config, figment::Error> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if let Some(config_dir) = dirs_config_path() {
        figment = figment.merge(Toml::file(config_dir.join("config.toml")));
    }

    if let Some(path) = path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("TN_"));

    figment.extract()
}

/// Returns the platform-specific config directory for tn.
///
/// On Linux: `~/.config/tn`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tn"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;
    use tn_core::{ClockMode, Precision};

    use super::*;

    #[test]
    fn test_dirs_config_path_ends_with_tn() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "tn");
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"marker = "worked:""#).unwrap();
        writeln!(file, "clock = 12").unwrap();
        writeln!(file, r#"precision = "seconds""#).unwrap();
        writeln!(file, "wrap_column = 72").unwrap();
        file.flush().unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.marker, "worked:");
        assert_eq!(config.clock, ClockMode::Twelve);
        assert_eq!(config.precision, Precision::Seconds);
        assert_eq!(config.wrap_column, Some(72));
        assert_eq!(config.separator, "-");
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let config = load_config(Some(&temp.path().join("absent.toml"))).unwrap();
        assert_eq!(config.separator, Config::default().separator);
        assert_eq!(config.continuation, Config::default().continuation);
    }
}
