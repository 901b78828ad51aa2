pub mod file_environment_store;
