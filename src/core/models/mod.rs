pub mod command;
pub mod config_key;
pub mod env_file;
pub mod environment;
