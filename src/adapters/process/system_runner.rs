use std::io::{ErrorKind, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::LazyLock;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use regex::Regex;

use crate::core::errors::{AutoxError, Result};
use crate::core::models::command::{CommandSpec, ProcessOutput};
use crate::core::traits::process_runner::ProcessRunner;

static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\x9B|\x1B\[)[0-?]*[ -/]*[@-~]").expect("Invalid ANSI escape pattern")
});

/// Remove ANSI escape sequences (colors, cursor movement) from text.
pub fn strip_ansi_codes(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}

/// Runs commands as real child processes of the current one.
pub struct SystemRunner {
    timeout: Duration,
    poll_interval: Duration,
}

impl SystemRunner {
    /// Default upper bound on how long a child may run.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: Duration::from_millis(50),
        }
    }

    fn build(&self, spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        cmd.envs(spec.envs.iter().map(|(k, v)| (k, v)));
        cmd
    }

    fn spawn(&self, mut cmd: Command, program: &str) -> Result<Child> {
        tracing::debug!(?cmd, "spawning process");
        cmd.spawn().map_err(|e| match e.kind() {
            ErrorKind::NotFound => AutoxError::ExecutableNotFound {
                program: program.to_string(),
            },
            _ => AutoxError::ProcessSpawn {
                program: program.to_string(),
                reason: e.to_string(),
            },
        })
    }

    fn timed_out(&self, program: &str) -> AutoxError {
        AutoxError::ProcessTimeout {
            program: program.to_string(),
            seconds: self.timeout.as_secs(),
        }
    }

    /// Poll the child until it exits, killing it once `deadline` passes.
    fn wait(&self, child: &mut Child, program: &str, deadline: Instant) -> Result<ExitStatus> {
        loop {
            let status = match child.try_wait() {
                Ok(status) => status,
                Err(e) => {
                    kill(child);
                    return Err(e.into());
                }
            };
            if let Some(status) = status {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                tracing::error!(
                    program,
                    seconds = self.timeout.as_secs(),
                    "command timed out, killing it"
                );
                kill(child);
                return Err(self.timed_out(program));
            }
            thread::sleep(self.poll_interval);
        }
    }

    /// Wait for a drained pipe, but no longer than `deadline`.
    ///
    /// A background process started by the child can inherit the pipe
    /// and keep it open after the child itself has exited.
    fn collect(&self, pipe: &Receiver<String>, program: &str, deadline: Instant) -> Result<String> {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match pipe.recv_timeout(remaining) {
            Ok(text) => Ok(strip_ansi_codes(&text)),
            Err(RecvTimeoutError::Timeout) => {
                tracing::error!(
                    program,
                    seconds = self.timeout.as_secs(),
                    "output still held open by a leftover process"
                );
                Err(self.timed_out(program))
            }
            Err(RecvTimeoutError::Disconnected) => Ok(String::new()),
        }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

/// Drain a pipe on a helper thread so a chatty child cannot block on a full buffer.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });
    rx
}

fn kill(child: &mut Child) {
    // The child may have exited between try_wait and kill
    let _ = child.kill();
    let _ = child.wait();
}

fn exit_code(status: ExitStatus) -> i32 {
    // Killed by a signal: no code
    status.code().unwrap_or(-1)
}

impl ProcessRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<ProcessOutput> {
        let mut cmd = self.build(spec);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let deadline = Instant::now() + self.timeout;
        let mut child = self.spawn(cmd, &spec.program)?;
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = self.wait(&mut child, &spec.program, deadline)?;

        let output = ProcessOutput {
            exit_code: exit_code(status),
            stdout: self.collect(&stdout, &spec.program, deadline)?,
            stderr: self.collect(&stderr, &spec.program, deadline)?,
        };
        tracing::debug!(program = %spec.program, exit_code = output.exit_code, "process finished");
        Ok(output)
    }

    fn run_realtime(&self, spec: &CommandSpec) -> Result<i32> {
        let mut cmd = self.build(spec);
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());

        let deadline = Instant::now() + self.timeout;
        let mut child = self.spawn(cmd, &spec.program)?;
        let status = self.wait(&mut child, &spec.program, deadline)?;

        let code = exit_code(status);
        tracing::debug!(program = %spec.program, exit_code = code, "process finished");
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_ansi_removes_colors() {
        let colored = "\x1b[32mSuccess!\x1b[0m Terraform has been \x1b[1minitialized\x1b[0m";
        assert_eq!(
            strip_ansi_codes(colored),
            "Success! Terraform has been initialized"
        );
    }

    #[test]
    fn strip_ansi_handles_csi_byte() {
        assert_eq!(strip_ansi_codes("\u{9b}31mred"), "red");
    }

    #[test]
    fn strip_ansi_leaves_plain_text() {
        assert_eq!(strip_ansi_codes("plain text"), "plain text");
    }

    #[test]
    fn missing_executable_is_reported() {
        let runner = SystemRunner::default();
        let spec = CommandSpec::new("autox-definitely-not-installed");

        let result = runner.run(&spec);

        assert!(matches!(result, Err(AutoxError::ExecutableNotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn run_captures_output_and_exit_code() {
        let runner = SystemRunner::default();
        let spec = CommandSpec::new("sh").args([
            "-c",
            "printf '\\033[31mhello\\033[0m'; echo oops >&2; exit 3",
        ]);

        let output = runner.run(&spec).unwrap();

        assert_eq!(output.exit_code, 3);
        assert_eq!(output.stdout, "hello");
        assert_eq!(output.stderr.trim(), "oops");
        assert!(!output.success());
    }

    #[cfg(unix)]
    #[test]
    fn run_passes_extra_env() {
        let runner = SystemRunner::default();
        let spec = CommandSpec::new("sh")
            .args(["-c", "printf %s \"$APP_URL\""])
            .envs(vec![("APP_URL".into(), "https://app.example".into())]);

        let output = runner.run(&spec).unwrap();

        assert_eq!(output.stdout, "https://app.example");
    }

    #[cfg(unix)]
    #[test]
    fn run_kills_on_timeout() {
        let runner = SystemRunner::new(Duration::from_millis(200));
        let spec = CommandSpec::new("sleep").arg("5");

        let started = Instant::now();
        let result = runner.run(&spec);

        assert!(matches!(result, Err(AutoxError::ProcessTimeout { .. })));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[cfg(unix)]
    #[test]
    fn run_timeout_covers_background_process_holding_stdout() {
        let runner = SystemRunner::new(Duration::from_millis(300));
        let spec = CommandSpec::new("sh").args(["-c", "sleep 4 & echo hi"]);

        let started = Instant::now();
        let result = runner.run(&spec);

        assert!(matches!(result, Err(AutoxError::ProcessTimeout { .. })));
        assert!(
            started.elapsed() < Duration::from_secs(2),
            "run blocked {:?} despite a 300ms timeout",
            started.elapsed()
        );
    }

    #[cfg(unix)]
    #[test]
    fn run_ignores_background_process_with_closed_pipes() {
        let runner = SystemRunner::new(Duration::from_secs(3));
        let spec = CommandSpec::new("sh").args(["-c", "sleep 4 >/dev/null 2>&1 & echo hi"]);

        let started = Instant::now();
        let output = runner.run(&spec).unwrap();

        assert_eq!(output.stdout.trim(), "hi");
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[cfg(unix)]
    #[test]
    fn kill_reaps_a_running_child() {
        let mut child = Command::new("sleep").arg("5").spawn().unwrap();

        kill(&mut child);

        assert!(child.try_wait().unwrap().is_some());
    }

    #[cfg(unix)]
    #[test]
    fn run_realtime_returns_exit_code() {
        let runner = SystemRunner::default();
        let spec = CommandSpec::new("sh").args(["-c", "exit 7"]);

        assert_eq!(runner.run_realtime(&spec).unwrap(), 7);
    }
}
