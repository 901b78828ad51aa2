use crate::core::errors::Result;
use crate::core::models::command::{CommandSpec, ProcessOutput};

/// Port for executing external programs.
///
/// Implementations live in `adapters::process`. Both calls block until the
/// child exits or the runner's timeout elapses, in which case the child
/// is killed and `AutoxError::ProcessTimeout` is returned.
pub trait ProcessRunner {
    /// Run a command and capture its output with ANSI codes stripped.
    fn run(&self, command: &CommandSpec) -> Result<ProcessOutput>;

    /// Run a command with the parent's stdout/stderr and return its exit code.
    fn run_realtime(&self, command: &CommandSpec) -> Result<i32>;
}
