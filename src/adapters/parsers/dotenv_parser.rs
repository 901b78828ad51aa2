use crate::core::errors::Result;
use crate::core::models::env_file::{EnvEntry, EnvFile, Line};
use crate::core::traits::parser::ConfigParser;

/// Parses and serializes environment `env` files.
///
/// Parsing is lenient: anything that is not a `KEY=value` entry, a
/// comment or a blank line is kept as `Line::Raw` and written back
/// unchanged. Values are kept verbatim (no quote stripping). Keys are
/// trimmed, so `KEY = v` is rewritten as `KEY= v`; every other line
/// survives a rewrite byte for byte, apart from the trailing newline.
pub struct DotenvParser;

impl DotenvParser {
    /// Parse a single line into a `Line` variant.
    fn parse_line(raw: &str) -> Line {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Line::Blank(raw.to_string());
        }

        if trimmed.starts_with('#') {
            return Line::Comment(raw.to_string());
        }

        // Key is everything before the first '='
        let Some((key, value)) = raw.split_once('=') else {
            return Line::Raw(raw.to_string());
        };

        let key = key.trim();
        if key.is_empty() {
            return Line::Raw(raw.to_string());
        }

        Line::Entry(EnvEntry {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

impl ConfigParser for DotenvParser {
    fn parse(&self, content: &str) -> Result<EnvFile> {
        let lines = content.lines().map(DotenvParser::parse_line).collect();

        Ok(EnvFile { lines })
    }

    fn serialize(&self, file: &EnvFile) -> Result<String> {
        let mut output = String::new();

        for line in &file.lines {
            match line {
                Line::Entry(entry) => {
                    output.push_str(&entry.key);
                    output.push('=');
                    output.push_str(&entry.value);
                }
                Line::Comment(text) | Line::Blank(text) | Line::Raw(text) => {
                    output.push_str(text)
                }
            }
            output.push('\n');
        }

        Ok(output)
    }
}
