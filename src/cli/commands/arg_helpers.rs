use crate::core::errors::{AutoxError, Result};

/// Parse a `{KEY=VALUE}` command-line argument.
pub fn parse_braced_pair(input: &str) -> Result<(String, String)> {
    let inner = input
        .trim()
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .ok_or_else(|| invalid(input, "the pair must be wrapped in braces"))?;

    parse_pair(inner).map_err(|e| match e {
        AutoxError::InvalidVariable { reason, .. } => invalid(input, &reason),
        other => other,
    })
}

/// Parse a bare `KEY=VALUE` argument.
///
/// The key is trimmed and must not be empty or contain whitespace; the
/// value is taken verbatim but may not span lines.
pub fn parse_pair(input: &str) -> Result<(String, String)> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| invalid(input, "missing '=' between key and value"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(invalid(input, "the key is empty"));
    }
    if key.chars().any(char::is_whitespace) {
        return Err(invalid(input, "the key contains whitespace"));
    }
    if value.contains(['\n', '\r']) {
        return Err(invalid(input, "the value contains a line break"));
    }

    Ok((key.to_string(), value.to_string()))
}

fn invalid(input: &str, reason: &str) -> AutoxError {
    AutoxError::InvalidVariable {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}
