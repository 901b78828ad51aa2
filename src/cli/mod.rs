pub mod commands;
pub mod context;
pub mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Manage test environments, deploy infrastructure, and run test suites.
#[derive(Parser, Debug)]
#[command(name = "autox", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a config file (default: ./autox.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the environments and the active pointer
    #[arg(long, global = true, env = "AUTOX_ENVIRONMENTS_DIR")]
    pub root: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true, env = "LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Verbose output (same as --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create, select and edit environments
    Env {
        #[command(subcommand)]
        action: EnvAction,
    },

    /// Deploy infrastructure using terraform
    DeployInfra {
        #[command(subcommand)]
        action: DeployAction,
    },

    /// Run the UI or API test suites
    RunTests {
        #[command(subcommand)]
        suite: TestsAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum EnvAction {
    /// Create a new environment and make it active
    #[command(alias = "create-new-env")]
    CreateEnvironment {
        /// Environment name (a random one is generated if omitted)
        positional_name: Option<String>,
        /// Environment name; takes precedence over the positional form
        #[arg(long, alias = "env-name")]
        name: Option<String>,
    },

    /// Print the active environment
    #[command(alias = "get-active-env")]
    GetActiveEnvironment,

    /// Select the active environment
    #[command(alias = "set-active-env")]
    SetActiveEnvironment {
        /// Environment to activate
        #[arg(long)]
        env: String,
    },

    /// Add or update variables in the active environment: {KEY=VALUE}
    AddVariable {
        /// One or more brace-wrapped pairs, e.g. '{APP_URL=https://example.com}'
        #[arg(required = true, num_args = 1..)]
        pairs: Vec<String>,
    },

    /// List environments
    List,

    /// Show the variables of an environment (secrets masked)
    Show {
        /// Environment to show (default: the active one)
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DeployAction {
    /// Prepare your working directory for other commands
    TerraformInit(TerraformArgs),
    /// Create or update infrastructure
    TerraformApply(TerraformArgs),
    /// Destroy previously-created infrastructure
    TerraformDestroy(TerraformArgs),
}

#[derive(Args, Debug)]
pub struct TerraformArgs {
    /// Terraform working directory (default from config)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// State file for apply/destroy (default from config)
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Terraform variable as KEY=VALUE. Repeatable.
    #[arg(long = "var")]
    pub vars: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum TestsAction {
    /// Run all UI tests
    Ui {
        /// Browser to run tests on (default from config, usually chrome)
        #[arg(long)]
        browser: Option<String>,
        /// Run the browser in headless mode
        #[arg(long)]
        headless: bool,
    },
    /// Run all API tests
    Api,
}
