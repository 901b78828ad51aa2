use colored::Colorize;

use super::arg_helpers::parse_braced_pair;
use crate::cli::EnvAction;
use crate::cli::context::AppContext;
use crate::cli::output;
use crate::core::errors::{AutoxError, Result};
use crate::core::models::config_key::{is_secret_var, snapshot_defaults};
use crate::core::models::env_file::{Line, SetOutcome};
use crate::core::services::environment_service::AddOutcome;

/// Execute an `autox env` subcommand.
pub fn execute(ctx: &AppContext, action: &EnvAction) -> Result<()> {
    match action {
        EnvAction::CreateEnvironment {
            positional_name,
            name,
        } => execute_create(ctx, name.as_deref().or(positional_name.as_deref())),
        EnvAction::GetActiveEnvironment => execute_get_active(ctx),
        EnvAction::SetActiveEnvironment { env } => execute_set_active(ctx, env),
        EnvAction::AddVariable { pairs } => execute_add_variable(ctx, pairs),
        EnvAction::List => execute_list(ctx),
        EnvAction::Show { name } => execute_show(ctx, name.as_deref()),
    }
}

/// Create an environment seeded from the current process environment.
fn execute_create(ctx: &AppContext, name: Option<&str>) -> Result<()> {
    let service = ctx.environment_service();
    let seed = snapshot_defaults(|key| std::env::var(key).ok());

    let created = service.create_environment(name, &seed)?;

    output::success(&format!("Created environment '{created}'"));
    output::success(&format!(
        "Seeded {} variables (secrets skipped)",
        seed.keys().len()
    ));
    output::success(&format!("'{created}' is now the active environment"));
    Ok(())
}

fn execute_get_active(ctx: &AppContext) -> Result<()> {
    match ctx.environment_service().get_active_environment()? {
        Some(name) => println!("{name}"),
        None => {
            output::warning("No active environment set");
            output::hint("autox env create-environment [name]");
        }
    }
    Ok(())
}

fn execute_set_active(ctx: &AppContext, env: &str) -> Result<()> {
    let service = ctx.environment_service();
    service.set_active_environment(env)?;

    output::success(&format!("Active environment set to '{env}'"));
    if !service.store.root().join(env).exists() {
        output::warning(&format!(
            "'{env}' has no directory yet; it will be created on the first add-variable"
        ));
    }
    Ok(())
}

/// Validate every pair before touching the store, then apply them in order.
fn execute_add_variable(ctx: &AppContext, raw_pairs: &[String]) -> Result<()> {
    let pairs = raw_pairs
        .iter()
        .map(|raw| parse_braced_pair(raw))
        .collect::<Result<Vec<_>>>()?;

    let service = ctx.environment_service();
    let outcome = match pairs.as_slice() {
        [(key, value)] => service.add_variable(key, value)?,
        _ => service.add_variables(&pairs)?,
    };

    match outcome {
        AddOutcome::NoActiveEnvironment => Err(AutoxError::NoActiveEnvironment),
        AddOutcome::Applied { env, changes } => {
            for (key, outcome) in changes {
                let verb = match outcome {
                    SetOutcome::Added => "Added",
                    SetOutcome::Updated => "Updated",
                };
                output::success(&format!("{verb} {key} in '{env}'"));
            }
            Ok(())
        }
    }
}

fn execute_list(ctx: &AppContext) -> Result<()> {
    let service = ctx.environment_service();
    let names = service.list_environments()?;
    let active = service.get_active_environment()?;

    if names.is_empty() {
        output::warning("No environments found");
        output::hint("autox env create-environment [name]");
        return Ok(());
    }

    output::header(&format!("Environments ({})", names.len()));
    for name in &names {
        if active.as_deref() == Some(name.as_str()) {
            println!("  {} {} {}", "*".green(), name.bold(), "(active)".dimmed());
        } else {
            println!("    {name}");
        }
    }
    Ok(())
}

fn execute_show(ctx: &AppContext, name: Option<&str>) -> Result<()> {
    let (env, file) = ctx.environment_service().read_environment(name)?;

    output::header(&format!("Environment: {env}"));
    for line in &file.lines {
        match line {
            Line::Entry(entry) => {
                output::variable(&entry.key, &entry.value, is_secret_var(&entry.key));
            }
            Line::Comment(text) => println!("  {}", text.dimmed()),
            Line::Blank(_) | Line::Raw(_) => {}
        }
    }
    Ok(())
}
