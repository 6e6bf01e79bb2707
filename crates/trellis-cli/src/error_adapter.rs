//! Error adapter for converting TrellisError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Trellis errors
//! carry no source spans, so the adapter contributes an error code and, where
//! one helps, a hint on how to fix the input.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use trellis::{PositionError, ThemeError, TrellisError};

/// Adapter rendering a [`TrellisError`] through miette.
pub struct ErrorAdapter<'a>(pub &'a TrellisError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(error_code(self.0)))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        error_help(self.0).map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }
}

/// Returns the diagnostic code for an error.
pub fn error_code(err: &TrellisError) -> &'static str {
    match err {
        TrellisError::Io(_) => "trellis::io",
        TrellisError::Config(_) => "trellis::config",
        TrellisError::Position(PositionError::MissingAesthetic { .. }) => {
            "trellis::position::missing_aesthetic"
        }
        TrellisError::Theme(err) => match err {
            ThemeError::UnknownElement(_) => "trellis::theme::unknown_element",
            ThemeError::DuplicateElement(_) => "trellis::theme::duplicate_element",
            ThemeError::ClassMismatch { .. } => "trellis::theme::class_mismatch",
            ThemeError::IncompleteElement { .. } => "trellis::theme::incomplete_element",
            ThemeError::TypeMismatch { .. } => "trellis::theme::type_mismatch",
            ThemeError::InheritanceCycle { .. } => "trellis::theme::inheritance_cycle",
            ThemeError::InvalidProperty { .. } => "trellis::theme::invalid_property",
            ThemeError::InvalidValue { .. } => "trellis::theme::invalid_value",
        },
    }
}

fn error_help(err: &TrellisError) -> Option<String> {
    let help = match err {
        TrellisError::Io(_) => return None,
        TrellisError::Config(_) => {
            "check the configuration file's sections and keys; unknown keys are rejected"
                .to_string()
        }
        TrellisError::Position(PositionError::MissingAesthetic { missing, .. }) => {
            format!("every row needs {}", missing.join(" and "))
        }
        TrellisError::Theme(err) => match err {
            ThemeError::UnknownElement(_) => {
                "run `trellis tree` to list the known element names".to_string()
            }
            ThemeError::ClassMismatch { expected, .. } => {
                format!("use a {expected} element here, or drop the `kind` key")
            }
            ThemeError::IncompleteElement { .. } => {
                "root elements have nothing to inherit from; set every listed property".to_string()
            }
            ThemeError::TypeMismatch { .. } => {
                "an update merges elements of one kind only; use `mode = \"replace\"` to swap the element"
                    .to_string()
            }
            ThemeError::InvalidProperty { kind, .. } => {
                format!("remove the property; {kind} elements do not have it")
            }
            ThemeError::DuplicateElement(_)
            | ThemeError::InheritanceCycle { .. }
            | ThemeError::InvalidValue { .. } => return None,
        },
    };
    Some(help)
}
