pub mod arg_helpers;
pub mod deploy_infra;
pub mod env;
