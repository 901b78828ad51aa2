pub mod environment_service;
pub mod terraform_service;
pub mod test_run_service;

#[cfg(test)]
pub mod testing;
