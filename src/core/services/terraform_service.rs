use std::fmt;
use std::path::PathBuf;

use crate::core::errors::{AutoxError, Result};
use crate::core::models::command::{CommandSpec, ProcessOutput};
use crate::core::traits::process_runner::ProcessRunner;

/// The Terraform subcommands autox drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerraformAction {
    Init,
    Apply,
    Destroy,
}

impl TerraformAction {
    pub fn as_str(self) -> &'static str {
        match self {
            TerraformAction::Init => "init",
            TerraformAction::Apply => "apply",
            TerraformAction::Destroy => "destroy",
        }
    }

    /// Whether `-state=<file>` applies to this subcommand.
    fn takes_state(self) -> bool {
        matches!(self, TerraformAction::Apply | TerraformAction::Destroy)
    }
}

impl fmt::Display for TerraformAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs shared by every Terraform invocation.
#[derive(Debug, Clone, Default)]
pub struct TerraformOptions {
    /// Passed as `-chdir=<dir>`.
    pub directory: PathBuf,
    pub state_file: Option<PathBuf>,
    /// Rendered as `-var=KEY=VALUE`, in order.
    pub vars: Vec<(String, String)>,
    /// Extra environment for the terraform process.
    pub envs: Vec<(String, String)>,
}

/// Builds Terraform command lines and runs them through a `ProcessRunner`.
///
/// Failures are reported once; nothing is retried.
pub struct TerraformService<R: ProcessRunner> {
    pub runner: R,
    pub binary: String,
}

impl<R: ProcessRunner> TerraformService<R> {
    pub fn init(&self, options: &TerraformOptions) -> Result<ProcessOutput> {
        self.run(TerraformAction::Init, options)
    }

    pub fn apply(&self, options: &TerraformOptions) -> Result<ProcessOutput> {
        self.run(TerraformAction::Apply, options)
    }

    pub fn destroy(&self, options: &TerraformOptions) -> Result<ProcessOutput> {
        self.run(TerraformAction::Destroy, options)
    }

    /// `terraform -chdir=<dir> <op> -input=false -reconfigure [-state=<file>] [-var=k=v]* -auto-approve`
    pub fn build_command(&self, action: TerraformAction, options: &TerraformOptions) -> CommandSpec {
        let mut cmd = CommandSpec::new(&self.binary)
            .arg(format!("-chdir={}", options.directory.display()))
            .arg(action.as_str())
            .args(["-input=false", "-reconfigure"]);

        if action.takes_state() {
            if let Some(state) = &options.state_file {
                cmd = cmd.arg(format!("-state={}", state.display()));
            }
        }

        cmd = cmd.args(
            options
                .vars
                .iter()
                .map(|(key, value)| format!("-var={key}={value}")),
        );

        cmd.arg("-auto-approve").envs(options.envs.clone())
    }

    pub fn run(&self, action: TerraformAction, options: &TerraformOptions) -> Result<ProcessOutput> {
        let cmd = self.build_command(action, options);
        tracing::info!(command = %cmd, "running terraform {action}");

        let output = self.runner.run(&cmd)?;

        if !output.success() {
            tracing::error!(
                exit_code = output.exit_code,
                "terraform {action} failed"
            );
            if !output.stdout.trim().is_empty() {
                tracing::error!("{}", output.stdout.trim());
            }
            return Err(AutoxError::ProcessFailed {
                program: format!("{} {action}", self.binary),
                code: output.exit_code,
                stderr: output.stderr,
            });
        }

        if !output.stderr.trim().is_empty() {
            tracing::warn!("terraform {action} had stderr output/warnings: {}", output.stderr.trim());
        }
        tracing::info!("terraform {action} successful");
        if !output.stdout.trim().is_empty() {
            tracing::info!("{}", output.stdout.trim());
        }
        Ok(output)
    }
}
