//! Pure formatting functions for terminal output.
//!
//! Everything here returns a `String`; printing happens in the parent module.

use console::style;

use crate::outputs::OutputVar;

/// Red `ERROR:` prefix followed by the message
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

/// Green checkmark followed by the message
pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

/// Yellow arrow followed by the message
pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

/// Aligned `name  value` listing of the emitted variables.
///
/// Variables without a value are shown as `-` so that it is visible which
/// scoped tags were skipped.
pub fn format_variables(variables: &[(OutputVar, Option<String>)]) -> String {
    let width = variables
        .iter()
        .map(|(var, _)| var.key().len())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(variables.len() + 1);
    lines.push(style("Release variables:").bold().to_string());
    for (var, value) in variables {
        let value = match value {
            Some(v) => style(v.as_str()).cyan().to_string(),
            None => style("-").dim().to_string(),
        };
        lines.push(format!("  {:<width$}  {}", var.key(), value, width = width));
    }
    lines.join("\n")
}
