use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::adapters::parsers::dotenv_parser::DotenvParser;
use crate::core::errors::{AutoxError, Result};
use crate::core::models::env_file::{EnvFile, SetOutcome};
use crate::core::models::environment::{ACTIVE_FILE, ENV_FILE, validate_env_name};
use crate::core::traits::environment_store::EnvironmentStore;
use crate::core::traits::parser::ConfigParser;

/// Environment store laid out as plain files under a root directory.
///
/// ```text
/// <root>/active          # name of the active environment
/// <root>/<name>/env      # KEY=VALUE lines
/// ```
///
/// There is no locking: two processes writing the same environment at
/// once may lose one of the writes.
pub struct FileEnvironmentStore {
    root: PathBuf,
    parser: DotenvParser,
}

impl FileEnvironmentStore {
    /// Create a store rooted at the given directory. Nothing is touched on disk.
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            parser: DotenvParser,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn active_path(&self) -> PathBuf {
        self.root.join(ACTIVE_FILE)
    }

    fn env_path(&self, name: &str) -> PathBuf {
        self.root.join(name).join(ENV_FILE)
    }

    fn write_env_file(&self, path: &Path, file: &EnvFile) -> Result<()> {
        let content = self.parser.serialize(file)?;
        fs::write(path, content)?;
        tracing::debug!(path = %path.display(), "wrote environment file");
        Ok(())
    }
}

impl EnvironmentStore for FileEnvironmentStore {
    fn exists(&self, name: &str) -> bool {
        self.root.join(name).exists()
    }

    fn create(&self, name: &str, seed: &EnvFile) -> Result<()> {
        let dir = self.root.join(name);
        if dir.exists() {
            return Err(AutoxError::EnvironmentExists {
                name: name.to_string(),
            });
        }

        fs::create_dir_all(&dir)?;
        tracing::info!(dir = %dir.display(), "created environment directory");

        self.write_env_file(&dir.join(ENV_FILE), seed)?;
        fs::write(self.active_path(), format!("{name}\n"))?;
        tracing::info!(env = name, "active environment set");
        Ok(())
    }

    fn active(&self) -> Result<Option<String>> {
        let path = self.active_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "active pointer file missing");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let name = content.lines().next().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            tracing::debug!(path = %path.display(), "active pointer file is empty");
            return Ok(None);
        }

        // Hand-edited pointers must not turn into paths outside the root
        if let Err(AutoxError::InvalidEnvName { reason, .. }) = validate_env_name(name) {
            tracing::error!(path = %path.display(), name, "active pointer holds an invalid name");
            return Err(AutoxError::InvalidActivePointer {
                path,
                name: name.to_string(),
                reason,
            });
        }
        Ok(Some(name.to_string()))
    }

    fn set_active(&self, name: &str) -> Result<()> {
        if !self.root.is_dir() {
            return Err(AutoxError::RootMissing {
                path: self.root.clone(),
            });
        }

        fs::write(self.active_path(), format!("{name}\n"))?;
        tracing::info!(env = name, "active environment set");
        Ok(())
    }

    fn upsert(&self, name: &str, pairs: &[(String, String)]) -> Result<Vec<SetOutcome>> {
        let dir = self.root.join(name);
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            tracing::info!(dir = %dir.display(), "created missing environment directory");
        }

        let path = dir.join(ENV_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };

        let mut file = self.parser.parse(&content)?;
        let outcomes = pairs
            .iter()
            .map(|(key, value)| file.set(key, value))
            .collect();

        self.write_env_file(&path, &file)?;
        Ok(outcomes)
    }

    fn read(&self, name: &str) -> Result<EnvFile> {
        let path = self.env_path(name);
        match fs::read_to_string(&path) {
            Ok(content) => self.parser.parse(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let available = self.list()?;
                Err(AutoxError::EnvironmentNotFound {
                    name: name.to_string(),
                    available: if available.is_empty() {
                        "(none)".to_string()
                    } else {
                        available.join(", ")
                    },
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.path().join(ENV_FILE).is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}
