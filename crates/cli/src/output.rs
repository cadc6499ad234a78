//! Terminal output utilities
//!
//! Human-readable output goes to stdout, diagnostics to stderr.

use cws_core::Error;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }

    /// Print an aligned `label: value` line
    pub fn field(label: &str, value: impl std::fmt::Display) {
        println!("  {:<22} {}", format!("{label}:").dimmed(), value);
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> cws_core::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a coded error and its suggestion on stderr
pub fn print_error(err: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), err.message);
    if let Some(ref context) = err.context {
        eprintln!("  {} {}", "Context:".dimmed(), context);
    }
    if let Some(ref suggestion) = err.suggestion {
        eprintln!("  {} {}", "Suggestion:".yellow(), suggestion);
    }
}

/// Print a coded error as a JSON report on stderr
pub fn print_error_json(err: &Error) {
    match serde_json::to_string_pretty(&err.to_report()) {
        Ok(json) => eprintln!("{json}"),
        Err(_) => print_error(err),
    }
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{mins}m {remaining_secs:.0}s")
    }
}

/// Format a file size for display
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// `yes` / `no`
pub fn format_flag(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Placeholder for absent values
pub fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_secs_f32(5.5)), "5.5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(format_flag(true), "yes");
        assert_eq!(or_dash(""), "-");
        assert_eq!(or_dash("1.0.0"), "1.0.0");
    }
}
