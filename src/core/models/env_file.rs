/// A single `KEY=VALUE` entry in an environment file.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvEntry {
    pub key: String,
    pub value: String,
}

/// Represents any line in an environment file.
///
/// Lines that are not entries are kept verbatim so a rewrite never
/// drops something a user typed by hand.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    /// A key-value variable entry.
    Entry(EnvEntry),
    /// A comment line (e.g. `# AWS settings`).
    Comment(String),
    /// An empty or whitespace-only line, with its original whitespace.
    Blank(String),
    /// Anything else (no `=` or an empty key), preserved untouched.
    Raw(String),
}

/// What happened to a key during [`EnvFile::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    Added,
    Updated,
}

/// Parsed contents of an environment's `env` file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnvFile {
    pub lines: Vec<Line>,
}

impl EnvFile {
    /// Returns all keys in file order.
    pub fn keys(&self) -> Vec<&str> {
        self.entries().map(|e| e.key.as_str()).collect()
    }

    /// Iterates over only the key-value entries, skipping everything else.
    pub fn entries(&self) -> impl Iterator<Item = &EnvEntry> {
        self.lines.iter().filter_map(|line| match line {
            Line::Entry(entry) => Some(entry),
            _ => None,
        })
    }

    /// Append an entry without checking for an existing key.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.lines.push(Line::Entry(EnvEntry {
            key: key.into(),
            value: value.into(),
        }));
    }

    /// Replace the first line holding `key` in place, or append a new one.
    ///
    /// Later lines with the same key are dropped so the file ends up
    /// with exactly one line for it.
    pub fn set(&mut self, key: &str, value: &str) -> SetOutcome {
        let mut outcome = SetOutcome::Added;

        self.lines.retain_mut(|line| match line {
            Line::Entry(entry) if entry.key == key => {
                if outcome == SetOutcome::Updated {
                    return false;
                }
                entry.value = value.to_string();
                outcome = SetOutcome::Updated;
                true
            }
            _ => true,
        });

        if outcome == SetOutcome::Added {
            self.push(key, value);
        }
        outcome
    }
}

#[cfg(test)]
impl EnvFile {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }
}
