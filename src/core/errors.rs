use std::path::PathBuf;

/// All domain errors for autox.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum AutoxError {
    #[error(
        "Invalid variable argument: {input}\n\n  \
         {reason}\n  \
         Expected format: {{KEY=VALUE}} (quote it in your shell: '{{KEY=VALUE}}')"
    )]
    InvalidVariable { input: String, reason: String },

    #[error(
        "Invalid environment name '{name}': {reason}\n\n  \
         Names may contain letters, digits, '.', '-' and '_',\n  \
         must not start with '.' or '-', and 'active' is reserved."
    )]
    InvalidEnvName { name: String, reason: String },

    #[error(
        "Environment '{name}' already exists\n\n  \
         Select it instead: autox env set-active-environment --env {name}\n  \
         Or pick another name: autox env create-environment <name>"
    )]
    EnvironmentExists { name: String },

    #[error(
        "Environment '{name}' not found\n\n  \
         Available environments: {available}\n  \
         Run 'autox env list' to see them."
    )]
    EnvironmentNotFound { name: String, available: String },

    #[error(
        "No active environment\n\n  \
         Create one first: autox env create-environment [name]\n  \
         Or select one:    autox env set-active-environment --env <name>"
    )]
    NoActiveEnvironment,

    #[error(
        "Active pointer {path} names an invalid environment '{name}': {reason}\n\n  \
         Select a valid one: autox env set-active-environment --env <name>"
    )]
    InvalidActivePointer {
        path: PathBuf,
        name: String,
        reason: String,
    },

    #[error(
        "Environments directory does not exist: {path}\n\n  \
         Create an environment first: autox env create-environment [name]"
    )]
    RootMissing { path: PathBuf },

    #[error(
        "Could not generate a free environment name after {attempts} attempts\n\n  \
         Pass an explicit name: autox env create-environment <name>"
    )]
    NameGenerationExhausted { attempts: usize },

    #[error(
        "Executable not found: {program}\n\n  \
         Check that '{program}' is installed and in your PATH."
    )]
    ExecutableNotFound { program: String },

    #[error("Command '{program}' failed with exit code {code}{}", format_stderr(.stderr))]
    ProcessFailed {
        program: String,
        code: i32,
        stderr: String,
    },

    #[error("Command '{program}' timed out after {seconds} seconds and was killed")]
    ProcessTimeout { program: String, seconds: u64 },

    #[error("Failed to run '{program}': {reason}")]
    ProcessSpawn { program: String, reason: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error("Logging setup failed: {detail}")]
    Logging { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n\n{trimmed}")
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AutoxError>;
