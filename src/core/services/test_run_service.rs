use crate::config::app_config::TestsSection;
use crate::core::errors::{AutoxError, Result};
use crate::core::models::command::CommandSpec;
use crate::core::traits::process_runner::ProcessRunner;

/// Which test suite to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestSuite {
    /// Browser tests; `browser` is passed as `--selenium-browser`.
    Ui { browser: String, headless: bool },
    Api,
}

impl TestSuite {
    fn label(&self) -> &'static str {
        match self {
            TestSuite::Ui { .. } => "UI",
            TestSuite::Api => "API",
        }
    }
}

/// Launches the UI/API test runner with live output.
pub struct TestRunService<R: ProcessRunner> {
    pub runner: R,
    pub settings: TestsSection,
}

impl<R: ProcessRunner> TestRunService<R> {
    /// Runner options first, the suite path last.
    pub fn build_command(&self, suite: &TestSuite, envs: Vec<(String, String)>) -> CommandSpec {
        let s = &self.settings;
        let mut cmd = CommandSpec::new(&s.runner).args([
            "-v".to_string(),
            "-s".to_string(),
            format!("--html={}", s.html_report),
            "--capture=tee-sys".to_string(),
            "--self-contained-html".to_string(),
            format!("--junitxml={}", s.junit_xml),
        ]);

        let path = match suite {
            TestSuite::Ui { browser, headless } => {
                if !browser.is_empty() {
                    cmd = cmd.arg(format!("--selenium-browser={browser}"));
                }
                if *headless {
                    cmd = cmd.arg("--headless");
                }
                &s.ui_path
            }
            TestSuite::Api => &s.api_path,
        };

        cmd.arg(path).envs(envs)
    }

    /// Run the suite; a non-zero exit code is a failure.
    pub fn run(&self, suite: &TestSuite, envs: Vec<(String, String)>) -> Result<()> {
        let cmd = self.build_command(suite, envs);
        tracing::info!(command = %cmd, "running {} tests", suite.label());

        let code = self.runner.run_realtime(&cmd)?;
        if code != 0 {
            tracing::error!(exit_code = code, "Issue running {} tests", suite.label());
            return Err(AutoxError::ProcessFailed {
                program: self.settings.runner.clone(),
                code,
                stderr: String::new(),
            });
        }

        tracing::info!("{} tests passed", suite.label());
        Ok(())
    }
}
