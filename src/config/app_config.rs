use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::errors::{AutoxError, Result};

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "autox.toml";

/// Top-level autox configuration read from `autox.toml`.
///
/// Every field has a default, so a missing file is equivalent to an
/// empty one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub autox: AutoxSection,
    pub terraform: TerraformSection,
    pub tests: TestsSection,
}

impl AppConfig {
    /// Load the configuration.
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// `autox.toml` in the working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !path.exists() {
            if required {
                return Err(AutoxError::InvalidConfig {
                    detail: format!("config file not found: {}", path.display()),
                });
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::parse(&content).map_err(|e| match e {
            AutoxError::InvalidConfig { detail } => AutoxError::InvalidConfig {
                detail: format!("{}: {detail}", path.display()),
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| AutoxError::InvalidConfig {
            detail: format!("failed to parse TOML: {e}"),
        })?;

        if config.autox.command_timeout_secs == 0 {
            return Err(AutoxError::InvalidConfig {
                detail: "autox.command_timeout_secs must be greater than zero".into(),
            });
        }
        Ok(config)
    }
}

/// The `[autox]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutoxSection {
    /// Root holding `active` and one directory per environment.
    pub environments_dir: PathBuf,
    /// Parent of the per-run log directories.
    pub log_dir: PathBuf,
    pub log_level: String,
    /// Upper bound for any external command before it is killed.
    pub command_timeout_secs: u64,
}

impl Default for AutoxSection {
    fn default() -> Self {
        Self {
            environments_dir: PathBuf::from("environments"),
            log_dir: PathBuf::from("autox_logs"),
            log_level: "info".into(),
            command_timeout_secs: 600,
        }
    }
}

/// The `[terraform]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TerraformSection {
    pub binary: String,
    pub directory: PathBuf,
    pub state_file: Option<PathBuf>,
}

impl Default for TerraformSection {
    fn default() -> Self {
        Self {
            binary: "terraform".into(),
            directory: PathBuf::from("terraform"),
            state_file: None,
        }
    }
}

/// The `[tests]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TestsSection {
    pub runner: String,
    pub ui_path: String,
    pub api_path: String,
    pub html_report: String,
    pub junit_xml: String,
    pub default_browser: String,
}

impl Default for TestsSection {
    fn default() -> Self {
        Self {
            runner: "pytest".into(),
            ui_path: "tests/ui_tests".into(),
            api_path: "tests/api_tests".into(),
            html_report: "report.html".into(),
            junit_xml: "results/test-results.xml".into(),
            default_browser: "chrome".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::parse("").unwrap();

        assert_eq!(config.autox.environments_dir, PathBuf::from("environments"));
        assert_eq!(config.autox.command_timeout_secs, 600);
        assert_eq!(config.terraform.binary, "terraform");
        assert_eq!(config.tests.runner, "pytest");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::parse(
            r#"
[terraform]
directory = "infra/eks"
state_file = "eks.tfstate"

[tests]
default_browser = "firefox"
"#,
        )
        .unwrap();

        assert_eq!(config.terraform.directory, PathBuf::from("infra/eks"));
        assert_eq!(config.terraform.state_file, Some(PathBuf::from("eks.tfstate")));
        assert_eq!(config.terraform.binary, "terraform");
        assert_eq!(config.tests.default_browser, "firefox");
        assert_eq!(config.tests.ui_path, "tests/ui_tests");
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = AppConfig::parse("[autox]\nenvironment_dir = \"typo\"\n");
        assert!(matches!(result, Err(AutoxError::InvalidConfig { .. })));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = AppConfig::parse("[autox]\ncommand_timeout_secs = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn explicit_missing_path_fails() {
        let dir = TempDir::new().unwrap();
        let result = AppConfig::load(Some(&dir.path().join("nope.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn load_reads_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("autox.toml");
        std::fs::write(&path, "[autox]\nlog_level = \"debug\"\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(config.autox.log_level, "debug");
    }
}
