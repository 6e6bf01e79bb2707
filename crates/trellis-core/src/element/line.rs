//! Line elements and line-style definitions.
//!
//! # Overview
//!
//! Exported types:
//! - [`LineElement`]: The property bag for line-like theme elements (axis lines,
//!   ticks, grid lines)
//! - [`LineType`]: Enum defining line patterns (solid, dashed, dotted, etc.)
//! - [`LineEnd`]: Enum defining how line endpoints are drawn (butt, round, square)
//!
//! [`LineType`] and [`LineEnd`] are shared with [`RectElement`](super::RectElement),
//! whose outline is a line as well.
//!
//! # Quick Start
//!
//! ```
//! use trellis_core::color::Color;
//! use trellis_core::element::{LineElement, LineEnd, LineType, rel};
//!
//! // Only what differs from the parent needs to be set
//! let grid = LineElement::new().with_color(Color::new("white").unwrap());
//!
//! let ticks = LineElement::new()
//!     .with_size(rel(0.5))
//!     .with_linetype(LineType::Dashed)
//!     .with_lineend(LineEnd::Round);
//! ```

use std::{fmt, str::FromStr};

use crate::color::Color;

use super::{Properties, Size, fill, fill_size, overwrite};

// =============================================================================
// Type Definitions
// =============================================================================

/// Defines the dash pattern of a line.
///
/// Variants follow the conventional numbered line types used by plotting
/// systems, so both `"dashed"` and `"2"` parse to [`LineType::Dashed`].
///
/// | Number | Name |
/// |--------|------|
/// | 0 | `blank` |
/// | 1 | `solid` |
/// | 2 | `dashed` |
/// | 3 | `dotted` |
/// | 4 | `dotdash` |
/// | 5 | `longdash` |
/// | 6 | `twodash` |
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum LineType {
    /// No line is drawn
    Blank,
    /// Solid continuous line (default)
    #[default]
    Solid,
    /// Dashed line
    Dashed,
    /// Dotted line
    Dotted,
    /// Alternating dots and dashes
    DotDash,
    /// Long dashes
    LongDash,
    /// Alternating long and short dashes
    TwoDash,
    /// Custom dash pattern written as hex digit pairs of on/off lengths,
    /// e.g. `"44"` or `"13"`
    Custom(String),
}

impl FromStr for LineType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" | "blank" => Ok(Self::Blank),
            "1" | "solid" => Ok(Self::Solid),
            "2" | "dashed" => Ok(Self::Dashed),
            "3" | "dotted" => Ok(Self::Dotted),
            "4" | "dotdash" => Ok(Self::DotDash),
            "5" | "longdash" => Ok(Self::LongDash),
            "6" | "twodash" => Ok(Self::TwoDash),
            _ if is_dash_pattern(s) => Ok(Self::Custom(s.to_ascii_lowercase())),
            _ => Err(format!(
                "invalid line type `{s}`, valid values: blank, solid, dashed, dotted, \
                 dotdash, longdash, twodash, 0-6, or an even number of hex digits"
            )),
        }
    }
}

/// A dash pattern is an even count (2, 4, 6 or 8) of non-zero hex digits.
fn is_dash_pattern(s: &str) -> bool {
    matches!(s.len(), 2 | 4 | 6 | 8)
        && s.chars().all(|c| c.is_ascii_hexdigit() && c != '0')
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "blank"),
            Self::Solid => write!(f, "solid"),
            Self::Dashed => write!(f, "dashed"),
            Self::Dotted => write!(f, "dotted"),
            Self::DotDash => write!(f, "dotdash"),
            Self::LongDash => write!(f, "longdash"),
            Self::TwoDash => write!(f, "twodash"),
            Self::Custom(pattern) => write!(f, "{pattern}"),
        }
    }
}

/// Defines how line endpoints are drawn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LineEnd {
    /// Flat end at the exact endpoint (default)
    #[default]
    Butt,
    /// Rounded end extending beyond the endpoint by half the line width
    Round,
    /// Square end extending beyond the endpoint by half the line width
    Square,
}

impl FromStr for LineEnd {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "butt" => Ok(Self::Butt),
            "round" => Ok(Self::Round),
            "square" => Ok(Self::Square),
            _ => Err(format!(
                "invalid line end `{s}`, valid values: butt, round, square"
            )),
        }
    }
}

impl fmt::Display for LineEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        };
        f.write_str(name)
    }
}

/// Style of a line-like theme element.
///
/// Every property is optional: an unset property is inherited from the
/// element's parents when the element is resolved.
///
/// # Fields
///
/// - `color`: The line color
/// - `size`: The line width, absolute or relative to the inherited width
/// - `linetype`: The dash pattern
/// - `lineend`: How line endpoints are drawn
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineElement {
    color: Option<Color>,
    size: Option<Size>,
    linetype: Option<LineType>,
    lineend: Option<LineEnd>,
}

impl LineElement {
    /// Creates a line element with no properties set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with the color set.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Returns a copy with the size set.
    pub fn with_size(mut self, size: impl Into<Size>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Returns a copy with the line type set.
    pub fn with_linetype(mut self, linetype: LineType) -> Self {
        self.linetype = Some(linetype);
        self
    }

    /// Returns a copy with the line end set.
    pub fn with_lineend(mut self, lineend: LineEnd) -> Self {
        self.lineend = Some(lineend);
        self
    }

    /// Returns the line color, if set.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Returns the line size, if set.
    pub fn size(&self) -> Option<Size> {
        self.size
    }

    /// Returns the line type, if set.
    pub fn linetype(&self) -> Option<&LineType> {
        self.linetype.as_ref()
    }

    /// Returns the line end, if set.
    pub fn lineend(&self) -> Option<LineEnd> {
        self.lineend
    }
}

impl Properties for LineElement {
    const NAMES: &'static [&'static str] = &["color", "size", "linetype", "lineend"];

    fn null_properties(&self) -> Vec<&'static str> {
        let set = [
            self.color.is_some(),
            self.size.is_some(),
            self.linetype.is_some(),
            self.lineend.is_some(),
        ];
        Self::NAMES
            .iter()
            .zip(set)
            .filter_map(|(name, is_set)| (!is_set).then_some(*name))
            .collect()
    }

    fn inherit_from(&mut self, parent: &Self) {
        fill(&mut self.color, &parent.color);
        fill_size(&mut self.size, parent.size);
        fill(&mut self.linetype, &parent.linetype);
        fill(&mut self.lineend, &parent.lineend);
    }

    fn update_from(&mut self, delta: &Self) {
        overwrite(&mut self.color, &delta.color);
        overwrite(&mut self.size, &delta.size);
        overwrite(&mut self.linetype, &delta.linetype);
        overwrite(&mut self.lineend, &delta.lineend);
    }
}

impl fmt::Display for LineElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line(")?;
        let mut props = super::PropertyWriter::new(f);
        props.field("color", self.color.as_ref())?;
        props.field("size", self.size.as_ref())?;
        props.field("linetype", self.linetype.as_ref())?;
        props.field("lineend", self.lineend.as_ref())?;
        write!(f, ")")
    }
}
