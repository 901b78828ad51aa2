//! Test doubles shared by the service tests.

use std::cell::RefCell;

use crate::core::errors::Result;
use crate::core::models::command::{CommandSpec, ProcessOutput};
use crate::core::traits::process_runner::ProcessRunner;

/// Records every command and answers with a canned output.
pub struct FakeRunner {
    output: ProcessOutput,
    calls: RefCell<Vec<CommandSpec>>,
}

impl FakeRunner {
    pub fn with_output(output: ProcessOutput) -> Self {
        Self {
            output,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn succeeding(stdout: &str) -> Self {
        Self::with_output(ProcessOutput {
            exit_code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        })
    }

    pub fn failing(exit_code: i32, stderr: &str) -> Self {
        Self::with_output(ProcessOutput {
            exit_code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        })
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, command: &CommandSpec) -> Result<ProcessOutput> {
        self.calls.borrow_mut().push(command.clone());
        Ok(self.output.clone())
    }

    fn run_realtime(&self, command: &CommandSpec) -> Result<i32> {
        self.calls.borrow_mut().push(command.clone());
        Ok(self.output.exit_code)
    }
}
