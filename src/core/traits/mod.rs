pub mod environment_store;
pub mod parser;
pub mod process_runner;
