use crate::core::errors::Result;
use crate::core::models::env_file::EnvFile;

/// Port for parsing and serializing environment files.
pub trait ConfigParser: Send + Sync {
    /// Parse raw file content into a structured `EnvFile`.
    fn parse(&self, content: &str) -> Result<EnvFile>;

    /// Serialize an `EnvFile` back to its file format.
    fn serialize(&self, file: &EnvFile) -> Result<String>;
}
