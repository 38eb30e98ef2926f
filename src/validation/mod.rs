//! Validation for parsed definition files.
//!
//! Conversion never fails on these findings; they are reported by
//! `def2fgd check` so authors can clean up their definition files.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::output::{plural, Printer};
use crate::parser::ParsedSource;

/// Run all validation checks against a parsed file.
pub fn validate_source(parsed: &ParsedSource) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_no_blocks(parsed));
    result.merge(checks::check_malformed_headers(parsed));
    result.merge(checks::check_duplicate_classnames(parsed));
    result.merge(checks::check_missing_descriptions(parsed));
    result.merge(checks::check_unknown_flag_descriptions(parsed));

    result
}

/// Print diagnostics and a summary line to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let location = d
            .path
            .as_ref()
            .map(|p| format!("{}: ", p.display()))
            .unwrap_or_default();
        eprintln!(
            "{}{}: {}",
            printer.dim(&location),
            printer.severity(d.severity),
            d.message
        );
        if let Some(help) = &d.help {
            eprintln!("    {} {}", printer.dim("help:"), help);
        }
    }

    let errors = plural(result.error_count(), "error", "errors");
    let warnings = plural(result.warning_count(), "warning", "warnings");

    if result.has_errors() {
        printer.error("Failed", &format!("{}, {}", errors, warnings));
    } else if result.warning_count() > 0 {
        printer.warning("Passed", &format!("with {}", warnings));
    } else {
        printer.status("Passed", "no issues");
    }
}
