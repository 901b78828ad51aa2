use std::path::PathBuf;
use std::time::Duration;

use crate::adapters::process::system_runner::SystemRunner;
use crate::adapters::stores::file_environment_store::FileEnvironmentStore;
use crate::cli::Cli;
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::services::environment_service::EnvironmentService;
use crate::core::services::terraform_service::TerraformService;
use crate::core::services::test_run_service::TestRunService;
use crate::logging::{self, LogGuard};

/// Everything a command needs, built once in `main`.
///
/// Dropping the context flushes and closes the log file.
pub struct AppContext {
    pub config: AppConfig,
    log: LogGuard,
}

impl AppContext {
    /// Load configuration, apply CLI overrides, and open the log sink.
    pub fn init(cli: &Cli) -> Result<Self> {
        let mut config = AppConfig::load(cli.config.as_deref())?;

        if let Some(root) = &cli.root {
            config.autox.environments_dir = root.clone();
        }
        if let Some(level) = &cli.log_level {
            config.autox.log_level = level.clone();
        }
        if cli.verbose {
            config.autox.log_level = "debug".into();
        }

        let log = logging::init_logging(&config.autox.log_dir, &config.autox.log_level)?;
        tracing::debug!(log_file = %log.file.display(), "logging initialized");

        Ok(Self { config, log })
    }

    pub fn environments_dir(&self) -> &PathBuf {
        &self.config.autox.environments_dir
    }

    pub fn log_file(&self) -> &PathBuf {
        &self.log.file
    }

    pub fn environment_service(&self) -> EnvironmentService<FileEnvironmentStore> {
        EnvironmentService {
            store: FileEnvironmentStore::new(self.environments_dir().clone()),
        }
    }

    pub fn runner(&self) -> SystemRunner {
        SystemRunner::new(Duration::from_secs(self.config.autox.command_timeout_secs))
    }

    pub fn terraform(&self) -> TerraformService<SystemRunner> {
        TerraformService {
            runner: self.runner(),
            binary: self.config.terraform.binary.clone(),
        }
    }

    pub fn test_runner(&self) -> TestRunService<SystemRunner> {
        TestRunService {
            runner: self.runner(),
            settings: self.config.tests.clone(),
        }
    }
}
