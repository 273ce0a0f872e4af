//! User interface module.
//!
//! Human-facing messages go to stderr. Stdout is reserved for the
//! `name=value` lines and workflow commands a CI system reads.
//!
//! - `formatter` - pure formatting functions
//! - this module - printing

pub mod formatter;

pub use formatter::{format_error, format_status, format_success, format_variables};

use crate::outputs::OutputVar;

/// Print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Print a success message with a green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{}", format_success(message));
}

/// Print a status message with a yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{}", format_status(message));
}

/// Print every release variable, including the skipped ones.
pub fn display_variables(variables: &[(OutputVar, Option<String>)]) {
    eprintln!("{}", format_variables(variables));
}
