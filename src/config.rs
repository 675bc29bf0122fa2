//! Extraction settings loaded from `~/.config/payslip/config.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_BOLD_FONT: &str = "/F2";
pub const DEFAULT_LEAVE_FOOTER: &str = "Leave balances displayed are subject to audit";

/// Layout details that differ between payslip generator versions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Font selector whose text is bold (labels, titles, totals).
    pub bold_font: String,
    /// Audit note printed as the last row of the leave table.
    pub leave_footer: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            bold_font: DEFAULT_BOLD_FONT.to_string(),
            leave_footer: DEFAULT_LEAVE_FOOTER.to_string(),
        }
    }
}

/// Load settings from `path`, or from the user config file when `None`.
///
/// A missing default file gives the defaults. An explicit `path` must exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_config(path: Option<&Path>) -> Result<ExtractConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let path = config_path();
            if !path.exists() {
                return Ok(ExtractConfig::default());
            }
            path
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    toml::from_str(&content).with_context(|| format!("invalid TOML in {}", path.display()))
}

/// Return the path to the user config file.
fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("payslip")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: ExtractConfig = toml::from_str("").unwrap();
        assert_eq!(config, ExtractConfig::default());
        assert_eq!(config.bold_font, "/F2");
    }

    #[test]
    fn partial_override() {
        let config: ExtractConfig = toml::from_str(r#"bold_font = "/F7""#).unwrap();
        assert_eq!(config.bold_font, "/F7");
        assert_eq!(config.leave_footer, DEFAULT_LEAVE_FOOTER);
    }

    #[test]
    fn explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "leave_footer = \"Subject to audit\"\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.leave_footer, "Subject to audit");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "bold_font = [").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("invalid TOML"));
    }
}
