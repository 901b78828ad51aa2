use colored::Colorize;

/// Placeholder printed instead of a secret value.
pub const MASK: &str = "********";

/// Print a success message.
pub fn success(msg: &str) {
    println!("  {} {msg}", "✓".green());
}

/// Print a warning message. Goes to stdout so it sits next to the result it explains.
pub fn warning(msg: &str) {
    println!("  {} {msg}", "⚠".yellow());
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("  {} {msg}", "✗".red());
}

/// Print a follow-up command the user can run.
pub fn hint(command: &str) {
    println!("    {} {}", "→".dimmed(), command.cyan());
}

/// Print a header line.
pub fn header(msg: &str) {
    println!("\n{}", msg.bold());
}

/// Print one `KEY=VALUE` line, masking the value when `secret` is set.
pub fn variable(key: &str, value: &str, secret: bool) {
    if secret && !value.is_empty() {
        println!("  {key}={}", MASK.dimmed());
    } else {
        println!("  {key}={value}");
    }
}
