use rand::Rng;
use rand::seq::IndexedRandom;

use crate::core::errors::{AutoxError, Result};

/// File name of the active-environment pointer inside the root directory.
pub const ACTIVE_FILE: &str = "active";

/// File name of the variables file inside each environment directory.
pub const ENV_FILE: &str = "env";

const MAX_NAME_LEN: usize = 64;

const ADJECTIVES: &[&str] = &[
    "agile", "async", "binary", "brave", "cached", "clever", "crazy", "cosmic", "eager", "fuzzy",
    "greedy", "hashed", "idle", "jolly", "lazy", "linked", "lucky", "mutable", "nested", "nimble",
    "quick", "quiet", "recursive", "sharded", "silent", "sorted", "static", "swift", "tidy",
    "volatile",
];

const NOUNS: &[&str] = &[
    "algorithm", "bitmap", "buffer", "compiler", "daemon", "debugger", "kernel", "lambda",
    "mutex", "nebula", "opcode", "packet", "parser", "pointer", "quasar", "register", "router",
    "scheduler", "semaphore", "socket", "supernova", "thread", "tokenizer", "vector", "widget",
];

/// Check that `name` can be used as an environment directory.
pub fn validate_env_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| AutoxError::InvalidEnvName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(invalid("name is longer than 64 characters"));
    }
    if name == ACTIVE_FILE {
        return Err(invalid("name is reserved for the active pointer"));
    }
    if name.starts_with('.') || name.starts_with('-') {
        return Err(invalid("name must not start with '.' or '-'"));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')))
    {
        return Err(invalid(&format!("character '{c}' is not allowed")));
    }
    Ok(())
}

/// Generate a readable `adjective-noun` name such as `crazy-supernova`.
pub fn generate_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES.choose(rng).copied().unwrap_or("quick");
    let noun = NOUNS.choose(rng).copied().unwrap_or("widget");
    format!("{adjective}-{noun}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_names() {
        for name in ["gp1", "dev", "crazy-supernova", "team_a.v2"] {
            assert!(validate_env_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_unsafe_names() {
        for name in ["", "active", "../etc", ".hidden", "-flag", "a/b", "has space"] {
            assert!(validate_env_name(name).is_err(), "{name:?} should be rejected");
        }
    }

    #[test]
    fn rejects_overlong_name() {
        let name = "x".repeat(65);
        assert!(validate_env_name(&name).is_err());
    }

    #[test]
    fn generated_names_are_valid() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let name = generate_name(&mut rng);
            assert!(validate_env_name(&name).is_ok(), "{name}");
            assert_eq!(name.matches('-').count(), 1);
        }
    }
}
