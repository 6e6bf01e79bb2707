//! Rectangle elements: backgrounds, borders and legend keys.

use std::fmt;

use crate::color::Color;

use super::{LineType, Properties, PropertyWriter, Size, fill, fill_size, overwrite};

/// Style of a rectangle-like theme element.
///
/// `fill` is the interior color; `color`, `size` and `linetype` describe the
/// outline. Use [`Color::transparent`] for a rectangle without an outline or
/// without a fill.
///
/// # Examples
///
/// ```
/// use trellis_core::color::Color;
/// use trellis_core::element::RectElement;
///
/// let panel = RectElement::new()
///     .with_fill(Color::new("grey90").unwrap())
///     .with_color(Color::transparent());
/// assert!(panel.size().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RectElement {
    fill: Option<Color>,
    color: Option<Color>,
    size: Option<Size>,
    linetype: Option<LineType>,
}

impl RectElement {
    /// Creates a rect element with no properties set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with the fill color set.
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    /// Returns a copy with the outline color set.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Returns a copy with the outline size set.
    pub fn with_size(mut self, size: impl Into<Size>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Returns a copy with the outline line type set.
    pub fn with_linetype(mut self, linetype: LineType) -> Self {
        self.linetype = Some(linetype);
        self
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn linetype(&self) -> Option<&LineType> {
        self.linetype.as_ref()
    }
}

impl Properties for RectElement {
    const NAMES: &'static [&'static str] = &["fill", "color", "size", "linetype"];

    fn null_properties(&self) -> Vec<&'static str> {
        let set = [
            self.fill.is_some(),
            self.color.is_some(),
            self.size.is_some(),
            self.linetype.is_some(),
        ];
        Self::NAMES
            .iter()
            .zip(set)
            .filter_map(|(name, is_set)| (!is_set).then_some(*name))
            .collect()
    }

    fn inherit_from(&mut self, parent: &Self) {
        fill(&mut self.fill, &parent.fill);
        fill(&mut self.color, &parent.color);
        fill_size(&mut self.size, parent.size);
        fill(&mut self.linetype, &parent.linetype);
    }

    fn update_from(&mut self, delta: &Self) {
        overwrite(&mut self.fill, &delta.fill);
        overwrite(&mut self.color, &delta.color);
        overwrite(&mut self.size, &delta.size);
        overwrite(&mut self.linetype, &delta.linetype);
    }
}

impl fmt::Display for RectElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rect(")?;
        let mut props = PropertyWriter::new(f);
        props.field("fill", self.fill.as_ref())?;
        props.field("color", self.color.as_ref())?;
        props.field("size", self.size.as_ref())?;
        props.field("linetype", self.linetype.as_ref())?;
        write!(f, ")")
    }
}
