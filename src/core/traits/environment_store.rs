use crate::core::errors::Result;
use crate::core::models::env_file::{EnvFile, SetOutcome};

/// Port for persisting named environments and the active pointer.
pub trait EnvironmentStore {
    /// Whether an environment with this name already exists.
    fn exists(&self, name: &str) -> bool;

    /// Create `name` with the given seed contents and make it active.
    ///
    /// Fails with `EnvironmentExists` if the environment is already there.
    fn create(&self, name: &str, seed: &EnvFile) -> Result<()>;

    /// Name of the active environment, or `None` when nothing is selected.
    fn active(&self) -> Result<Option<String>>;

    /// Point the active pointer at `name`.
    ///
    /// Fails with `RootMissing` if the store's root does not exist.
    fn set_active(&self, name: &str) -> Result<()>;

    /// Apply each pair to the environment's file with replace-or-append.
    fn upsert(&self, name: &str, pairs: &[(String, String)]) -> Result<Vec<SetOutcome>>;

    /// Parsed contents of an existing environment.
    fn read(&self, name: &str) -> Result<EnvFile>;

    /// Sorted names of all environments.
    fn list(&self) -> Result<Vec<String>>;
}
