mod adapters;
mod cli;
mod config;
mod core;
mod logging;

use clap::Parser;

use cli::context::AppContext;
use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    let ctx = match AppContext::init(&args) {
        Ok(ctx) => ctx,
        Err(e) => {
            cli::output::error(&format!("Error: {e}"));
            std::process::exit(1);
        }
    };

    let result = match &args.command {
        Commands::Env { action } => cli::commands::env::execute(&ctx, action),
        Commands::DeployInfra { action } => cli::commands::deploy_infra::execute(&ctx, action),
        Commands::RunTests { suite } => cli::commands::run_tests::execute(&ctx, suite),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        cli::output::error(&format!("Error: {e}"));
        eprintln!("  Log: {}", ctx.log_file().display());
        // process::exit skips destructors; flush the log first
        drop(ctx);
        std::process::exit(1);
    }
}
