use crate::core::errors::{AutoxError, Result};
use crate::core::models::env_file::{EnvFile, SetOutcome};
use crate::core::models::environment::{generate_name, validate_env_name};
use crate::core::traits::environment_store::EnvironmentStore;

/// How many random names to try before giving up on `create_environment`.
pub const MAX_NAME_ATTEMPTS: usize = 5;

/// Result of an `add_variables` call.
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// Nothing is active, so nothing was written.
    NoActiveEnvironment,
    /// Pairs were applied to the named environment, in order.
    Applied {
        env: String,
        changes: Vec<(String, SetOutcome)>,
    },
}

/// Environment lifecycle on top of an `EnvironmentStore` backend.
pub struct EnvironmentService<S: EnvironmentStore> {
    pub store: S,
}

impl<S: EnvironmentStore> EnvironmentService<S> {
    /// Create an environment seeded with `seed` and make it active.
    ///
    /// An explicit name that already exists is rejected. Without a name a
    /// random one is generated, retrying on collision.
    pub fn create_environment(&self, name: Option<&str>, seed: &EnvFile) -> Result<String> {
        if let Some(name) = name {
            validate_env_name(name)?;
            self.store.create(name, seed)?;
            tracing::info!(env = name, "environment created");
            return Ok(name.to_string());
        }

        let mut rng = rand::rng();
        for attempt in 1..=MAX_NAME_ATTEMPTS {
            let candidate = generate_name(&mut rng);
            tracing::debug!(name = %candidate, attempt, "generated a random name");

            if self.store.exists(&candidate) {
                continue;
            }
            match self.store.create(&candidate, seed) {
                Ok(()) => {
                    tracing::info!(env = %candidate, "environment created");
                    return Ok(candidate);
                }
                Err(AutoxError::EnvironmentExists { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(AutoxError::NameGenerationExhausted {
            attempts: MAX_NAME_ATTEMPTS,
        })
    }

    /// Name of the active environment, if any.
    pub fn get_active_environment(&self) -> Result<Option<String>> {
        let active = self.store.active()?;
        if active.is_none() {
            tracing::info!("no active environment set");
        }
        Ok(active)
    }

    /// Point the active pointer at `name`. The environment need not exist yet.
    pub fn set_active_environment(&self, name: &str) -> Result<()> {
        validate_env_name(name)?;
        self.store.set_active(name)
    }

    /// Set a single variable on the active environment.
    pub fn add_variable(&self, key: &str, value: &str) -> Result<AddOutcome> {
        self.add_variables(&[(key.to_string(), value.to_string())])
    }

    /// Set variables on the active environment with replace-or-append.
    pub fn add_variables(&self, pairs: &[(String, String)]) -> Result<AddOutcome> {
        let Some(env) = self.store.active()? else {
            tracing::warn!("no active environment; variables not added");
            return Ok(AddOutcome::NoActiveEnvironment);
        };

        let outcomes = self.store.upsert(&env, pairs)?;
        let changes: Vec<_> = pairs
            .iter()
            .map(|(key, _)| key.clone())
            .zip(outcomes)
            .collect();

        for (key, outcome) in &changes {
            tracing::info!(env = %env, key = %key, ?outcome, "variable written");
        }
        Ok(AddOutcome::Applied { env, changes })
    }

    /// Sorted names of all environments.
    pub fn list_environments(&self) -> Result<Vec<String>> {
        self.store.list()
    }

    /// Contents of `name`, or of the active environment when `name` is `None`.
    pub fn read_environment(&self, name: Option<&str>) -> Result<(String, EnvFile)> {
        let name = match name {
            Some(name) => {
                validate_env_name(name)?;
                name.to_string()
            }
            None => self.store.active()?.ok_or(AutoxError::NoActiveEnvironment)?,
        };
        let file = self.store.read(&name)?;
        Ok((name, file))
    }

    /// Variables of the active environment, for injecting into child processes.
    ///
    /// Empty when nothing is active or the active environment has no file.
    pub fn active_variables(&self) -> Result<Vec<(String, String)>> {
        let Some(env) = self.store.active()? else {
            return Ok(Vec::new());
        };

        match self.store.read(&env) {
            Ok(file) => Ok(file
                .entries()
                .map(|e| (e.key.clone(), e.value.clone()))
                .collect()),
            Err(AutoxError::EnvironmentNotFound { .. }) => {
                tracing::warn!(env = %env, "active environment has no env file");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stores::file_environment_store::FileEnvironmentStore;
    use crate::core::models::config_key::{ConfigKey, snapshot_defaults};
    use crate::core::models::environment::ACTIVE_FILE;
    use std::fs;
    use tempfile::TempDir;

    fn service() -> (TempDir, EnvironmentService<FileEnvironmentStore>) {
        let dir = TempDir::new().unwrap();
        let store = FileEnvironmentStore::new(dir.path().join("environments"));
        (dir, EnvironmentService { store })
    }

    fn seed() -> EnvFile {
        snapshot_defaults(|k| match k {
            "APP_URL" => Some("https://the-internet.example".into()),
            "GITHUB_TOKEN" => Some("ghp_secret".into()),
            _ => None,
        })
    }

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn create_without_name_generates_and_activates() {
        let (_dir, svc) = service();

        let name = svc.create_environment(None, &seed()).unwrap();

        assert!(!name.is_empty());
        assert!(validate_env_name(&name).is_ok());
        assert_eq!(svc.get_active_environment().unwrap(), Some(name));
    }

    #[test]
    fn create_from_empty_root_lays_out_files() {
        let (_dir, svc) = service();
        let root = svc.store.root().to_path_buf();

        let name = svc.create_environment(None, &seed()).unwrap();

        let active = fs::read_to_string(root.join(ACTIVE_FILE)).unwrap();
        assert_eq!(active.lines().collect::<Vec<_>>(), vec![name.as_str()]);

        let env = fs::read_to_string(root.join(&name).join("env")).unwrap();
        let public = ConfigKey::ALL.iter().filter(|k| !k.is_secret()).count();
        assert_eq!(env.lines().count(), public);
    }

    #[test]
    fn create_named_never_writes_secrets() {
        let (_dir, svc) = service();

        svc.create_environment(Some("gp1"), &seed()).unwrap();

        let env = fs::read_to_string(svc.store.root().join("gp1/env")).unwrap();
        assert!(env.contains("APP_URL=https://the-internet.example\n"));
        for key in ConfigKey::ALL.into_iter().filter(|k| k.is_secret()) {
            assert!(
                !env.contains(&format!("{}=", key.env_var())),
                "{} leaked",
                key.env_var()
            );
        }
    }

    #[test]
    fn create_duplicate_name_is_rejected() {
        let (_dir, svc) = service();
        svc.create_environment(Some("gp1"), &seed()).unwrap();
        svc.create_environment(Some("gp2"), &seed()).unwrap();

        let result = svc.create_environment(Some("gp1"), &seed());

        assert!(matches!(result, Err(AutoxError::EnvironmentExists { .. })));
        assert_eq!(svc.get_active_environment().unwrap().as_deref(), Some("gp2"));
    }

    #[test]
    fn create_rejects_invalid_name() {
        let (_dir, svc) = service();

        let result = svc.create_environment(Some("../escape"), &seed());

        assert!(matches!(result, Err(AutoxError::InvalidEnvName { .. })));
        assert!(!svc.store.root().exists());
    }

    #[test]
    fn set_then_get_round_trip() {
        let (_dir, svc) = service();
        svc.create_environment(Some("other"), &seed()).unwrap();

        svc.set_active_environment("gp1").unwrap();

        assert_eq!(svc.get_active_environment().unwrap().as_deref(), Some("gp1"));
    }

    #[test]
    fn set_active_without_root_fails() {
        let (_dir, svc) = service();

        let result = svc.set_active_environment("missing-root");

        assert!(matches!(result, Err(AutoxError::RootMissing { .. })));
        assert!(!svc.store.root().exists());
    }

    #[test]
    fn add_variable_without_active_is_noop() {
        let (_dir, svc) = service();

        let outcome = svc.add_variable("KEY", "X").unwrap();

        assert_eq!(outcome, AddOutcome::NoActiveEnvironment);
        assert!(!svc.store.root().exists());
    }

    #[test]
    fn add_variable_refuses_corrupted_active_pointer() {
        let (dir, svc) = service();
        svc.create_environment(Some("gp1"), &seed()).unwrap();
        fs::write(svc.store.root().join(ACTIVE_FILE), "../escaped\n").unwrap();

        let result = svc.add_variable("K", "v");

        assert!(matches!(result, Err(AutoxError::InvalidActivePointer { .. })));
        assert!(!dir.path().join("escaped").exists());
    }

    #[test]
    fn add_variable_twice_keeps_last_value() {
        let (_dir, svc) = service();
        svc.create_environment(Some("gp1"), &seed()).unwrap();

        svc.add_variable("KEY", "X").unwrap();
        svc.add_variable("KEY", "Y").unwrap();

        let env = fs::read_to_string(svc.store.root().join("gp1/env")).unwrap();
        let lines: Vec<_> = env.lines().filter(|l| l.starts_with("KEY=")).collect();
        assert_eq!(lines, vec!["KEY=Y"]);
    }

    #[test]
    fn add_new_key_appends_and_keeps_order() {
        let (_dir, svc) = service();
        svc.create_environment(Some("gp1"), &seed()).unwrap();
        let path = svc.store.root().join("gp1/env");
        let before: Vec<String> = fs::read_to_string(&path)
            .unwrap()
            .lines()
            .map(String::from)
            .collect();

        svc.add_variable("NEW_KEY", "1").unwrap();

        let after: Vec<String> = fs::read_to_string(&path)
            .unwrap()
            .lines()
            .map(String::from)
            .collect();
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(&after[..before.len()], &before[..]);
        assert_eq!(after.last().map(String::as_str), Some("NEW_KEY=1"));
    }

    #[test]
    fn add_multiple_pairs_reports_each() {
        let (_dir, svc) = service();
        svc.create_environment(Some("gp1"), &seed()).unwrap();

        let outcome = svc
            .add_variables(&[pair("APP_URL", "https://b"), pair("GITHUB_TOKEN", "t")])
            .unwrap();

        assert_eq!(
            outcome,
            AddOutcome::Applied {
                env: "gp1".into(),
                changes: vec![
                    ("APP_URL".into(), SetOutcome::Updated),
                    ("GITHUB_TOKEN".into(), SetOutcome::Added),
                ],
            }
        );
    }

    #[test]
    fn add_to_active_without_directory_creates_it() {
        let (_dir, svc) = service();
        svc.create_environment(Some("gp1"), &seed()).unwrap();
        svc.set_active_environment("later").unwrap();

        svc.add_variable("A", "1").unwrap();

        let env = fs::read_to_string(svc.store.root().join("later/env")).unwrap();
        assert_eq!(env, "A=1\n");
    }

    #[test]
    fn read_defaults_to_active() {
        let (_dir, svc) = service();
        svc.create_environment(Some("gp1"), &seed()).unwrap();

        let (name, file) = svc.read_environment(None).unwrap();

        assert_eq!(name, "gp1");
        assert_eq!(file.get("APP_URL"), Some("https://the-internet.example"));
    }

    #[test]
    fn read_without_active_fails() {
        let (_dir, svc) = service();

        let result = svc.read_environment(None);

        assert!(matches!(result, Err(AutoxError::NoActiveEnvironment)));
    }

    #[test]
    fn active_variables_tolerates_missing_file() {
        let (_dir, svc) = service();
        assert!(svc.active_variables().unwrap().is_empty());

        svc.create_environment(Some("gp1"), &seed()).unwrap();
        svc.set_active_environment("ghost").unwrap();
        assert!(svc.active_variables().unwrap().is_empty());

        svc.set_active_environment("gp1").unwrap();
        let vars = svc.active_variables().unwrap();
        assert!(vars.contains(&pair("APP_URL", "https://the-internet.example")));
    }
}
