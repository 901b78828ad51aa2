use super::arg_helpers::parse_pair;
use crate::cli::context::AppContext;
use crate::cli::output;
use crate::cli::{DeployAction, TerraformArgs};
use crate::core::errors::Result;
use crate::core::services::terraform_service::{TerraformAction, TerraformOptions};

/// Execute an `autox deploy-infra` subcommand.
pub fn execute(ctx: &AppContext, action: &DeployAction) -> Result<()> {
    let (tf_action, args) = match action {
        DeployAction::TerraformInit(args) => (TerraformAction::Init, args),
        DeployAction::TerraformApply(args) => (TerraformAction::Apply, args),
        DeployAction::TerraformDestroy(args) => (TerraformAction::Destroy, args),
    };

    let options = build_options(ctx, args)?;
    output::header(&format!(
        "Terraform {tf_action} in {}",
        options.directory.display()
    ));

    let terraform = ctx.terraform();
    let result = match tf_action {
        TerraformAction::Init => terraform.init(&options)?,
        TerraformAction::Apply => terraform.apply(&options)?,
        TerraformAction::Destroy => terraform.destroy(&options)?,
    };

    if !result.stdout.trim().is_empty() {
        println!("{}", result.stdout.trim_end());
    }
    output::success(&format!("terraform {tf_action} finished"));
    Ok(())
}

/// Merge CLI flags over config and attach the active environment's variables.
fn build_options(ctx: &AppContext, args: &TerraformArgs) -> Result<TerraformOptions> {
    let tf = &ctx.config.terraform;
    let vars = args
        .vars
        .iter()
        .map(|raw| parse_pair(raw))
        .collect::<Result<Vec<_>>>()?;

    Ok(TerraformOptions {
        directory: args.dir.clone().unwrap_or_else(|| tf.directory.clone()),
        state_file: args.state.clone().or_else(|| tf.state_file.clone()),
        vars,
        envs: ctx.environment_service().active_variables()?,
    })
}
