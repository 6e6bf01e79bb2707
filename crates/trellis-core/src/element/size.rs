//! Absolute and relative sizes.

use std::{fmt, str::FromStr};

/// The `size` property of line, rect and text elements.
///
/// A size is either an absolute value (line width in millimetres, font size in
/// points) or a multiplier of the size the element inherits. Relative sizes
/// are resolved during inheritance; see [`Size::resolve_against`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Size {
    /// An absolute size.
    Absolute(f32),
    /// A multiplier applied to the inherited size.
    Relative(f32),
}

/// Creates a relative size.
///
/// # Examples
///
/// ```
/// use trellis_core::element::{Size, rel};
///
/// let size = rel(0.8).resolve_against(Size::Absolute(10.0));
/// assert_eq!(size, Size::Absolute(8.0));
/// ```
pub fn rel(multiplier: f32) -> Size {
    Size::Relative(multiplier)
}

impl Size {
    /// Returns `true` for [`Size::Relative`].
    pub fn is_relative(self) -> bool {
        matches!(self, Self::Relative(_))
    }

    /// Returns the absolute value, or `None` for a size that is still relative.
    pub fn absolute(self) -> Option<f32> {
        match self {
            Self::Absolute(value) => Some(value),
            Self::Relative(_) => None,
        }
    }

    /// Resolves this size against the size of the element it inherits from.
    ///
    /// Absolute sizes are returned unchanged. A relative size becomes
    /// `parent * multiplier`; when the parent is itself still relative the
    /// multipliers compose and the result stays relative.
    pub fn resolve_against(self, parent: Size) -> Size {
        match (self, parent) {
            (Self::Absolute(_), _) => self,
            (Self::Relative(multiplier), Self::Absolute(base)) => Self::Absolute(base * multiplier),
            (Self::Relative(multiplier), Self::Relative(base)) => Self::Relative(base * multiplier),
        }
    }
}

impl From<f32> for Size {
    fn from(value: f32) -> Self {
        Self::Absolute(value)
    }
}

impl FromStr for Size {
    type Err = String;

    /// Parses `"12"` as an absolute size and `"rel(0.8)"` as a relative one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (relative, number) = match s.strip_prefix("rel(").and_then(|r| r.strip_suffix(')')) {
            Some(inner) => (true, inner.trim()),
            None => (false, s),
        };

        let value = number
            .parse::<f32>()
            .map_err(|err| format!("invalid size `{s}`: {err}"))?;
        if !value.is_finite() {
            return Err(format!("invalid size `{s}`: must be finite"));
        }

        Ok(if relative {
            Self::Relative(value)
        } else {
            Self::Absolute(value)
        })
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(value) => write!(f, "{value}"),
            Self::Relative(multiplier) => write!(f, "rel({multiplier})"),
        }
    }
}
