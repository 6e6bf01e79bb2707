//! Error types for Trellis operations.
//!
//! This module provides the top-level error type [`TrellisError`] together with
//! the error types of the two engines it wraps:
//!
//! - [`ThemeError`] for element tree lookups, theme merging and resolution
//! - [`PositionError`] for position adjustments
//!
//! All of them are fatal to the operation that returned them. Non-fatal
//! conditions are reported through the `log` facade instead.

use std::io;

use thiserror::Error;

use trellis_core::element::ElementKind;

/// Errors raised by the element tree, theme store and resolver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThemeError {
    /// The name is not registered in the element tree.
    #[error("unknown theme element `{0}`")]
    UnknownElement(String),

    /// An element tree declares the same name twice.
    #[error("theme element `{0}` is declared more than once")]
    DuplicateElement(String),

    /// A theme entry's kind differs from the kind the tree requires.
    #[error("theme element `{element}` should be a {expected} element, found a {found} element")]
    ClassMismatch {
        element: String,
        expected: ElementKind,
        found: ElementKind,
    },

    /// A root element resolved with unset properties.
    #[error("theme element `{element}` has unset properties: {}", .properties.join(", "))]
    IncompleteElement {
        element: String,
        properties: Vec<&'static str>,
    },

    /// An update tried to merge two elements of different kinds.
    #[error("cannot update theme element `{element}`: a {left} element cannot be merged with a {right} element")]
    TypeMismatch {
        element: String,
        left: ElementKind,
        right: ElementKind,
    },

    /// The inheritance walk re-entered an element it is still resolving.
    #[error("theme element inheritance cycle: {}", .path.join(" -> "))]
    InheritanceCycle { path: Vec<String> },

    /// A configured property does not exist on the element's kind.
    #[error("`{property}` is not a property of {kind} element `{element}`")]
    InvalidProperty {
        element: String,
        property: String,
        kind: ElementKind,
    },

    /// A configured property value could not be parsed.
    #[error("invalid `{property}` for theme element `{element}`: {message}")]
    InvalidValue {
        element: String,
        property: String,
        message: String,
    },
}

/// Errors raised by position adjustments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    /// Rows lack aesthetics the adjustment cannot work without.
    #[error("{position} requires missing aesthetics: {}", .missing.join(", "))]
    MissingAesthetic {
        position: &'static str,
        missing: Vec<&'static str>,
    },
}

/// The main error type for Trellis operations.
#[derive(Debug, Error)]
pub enum TrellisError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Theme error: {0}")]
    Theme(#[from] ThemeError),

    #[error("Position error: {0}")]
    Position(#[from] PositionError),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_element_lists_properties() {
        let err = ThemeError::IncompleteElement {
            element: "line".to_string(),
            properties: vec!["color", "size"],
        };
        assert_eq!(
            err.to_string(),
            "theme element `line` has unset properties: color, size"
        );
    }

    #[test]
    fn test_class_mismatch_message() {
        let err = ThemeError::ClassMismatch {
            element: "axis.text".to_string(),
            expected: ElementKind::Text,
            found: ElementKind::Line,
        };
        assert_eq!(
            err.to_string(),
            "theme element `axis.text` should be a text element, found a line element"
        );
    }

    #[test]
    fn test_missing_aesthetic_message() {
        let err = PositionError::MissingAesthetic {
            position: "position_fill",
            missing: vec!["x", "ymax"],
        };
        assert_eq!(
            err.to_string(),
            "position_fill requires missing aesthetics: x, ymax"
        );
    }

    #[test]
    fn test_trellis_error_wraps_theme_error() {
        let err: TrellisError = ThemeError::UnknownElement("axis.text.z".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Theme error: unknown theme element `axis.text.z`"
        );
    }
}
