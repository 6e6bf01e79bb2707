//! Text elements: titles, axis labels, legend and strip text.
//!
//! [`TextElement`] carries the font and placement properties of a piece of
//! text. Font metrics and layout are left to the renderer; the element only
//! records what was asked for.

use std::{fmt, str::FromStr};

use crate::color::Color;

use super::{Properties, PropertyWriter, Size, fill, fill_size, overwrite};

/// Font face of a text element.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    #[default]
    Plain,
    Bold,
    Italic,
    BoldItalic,
}

impl FromStr for FontFace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Self::Plain),
            "bold" => Ok(Self::Bold),
            "italic" => Ok(Self::Italic),
            "bold.italic" | "bolditalic" => Ok(Self::BoldItalic),
            _ => Err(format!(
                "invalid font face `{s}`, valid values: plain, bold, italic, bold.italic"
            )),
        }
    }
}

impl fmt::Display for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Plain => "plain",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::BoldItalic => "bold.italic",
        };
        f.write_str(name)
    }
}

/// Style of a text theme element.
///
/// # Fields
///
/// | Property | Meaning |
/// |----------|---------|
/// | `family` | Font family name; empty selects the renderer's default font |
/// | `face` | [`FontFace`] |
/// | `color` | Text color |
/// | `size` | Font size in points, absolute or relative to the inherited size |
/// | `hjust` | Horizontal justification in `[0, 1]` |
/// | `vjust` | Vertical justification in `[0, 1]` |
/// | `angle` | Rotation in degrees |
/// | `lineheight` | Line height as a multiple of the font size |
///
/// # Examples
///
/// ```
/// use trellis_core::element::{FontFace, TextElement, rel};
///
/// let legend_title = TextElement::new()
///     .with_size(rel(0.8))
///     .with_face(FontFace::Bold)
///     .with_hjust(0.0);
/// assert!(legend_title.family().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextElement {
    family: Option<String>,
    face: Option<FontFace>,
    color: Option<Color>,
    size: Option<Size>,
    hjust: Option<f32>,
    vjust: Option<f32>,
    angle: Option<f32>,
    lineheight: Option<f32>,
}

impl TextElement {
    /// Creates a text element with no properties set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn with_face(mut self, face: FontFace) -> Self {
        self.face = Some(face);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_size(mut self, size: impl Into<Size>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_hjust(mut self, hjust: f32) -> Self {
        self.hjust = Some(hjust);
        self
    }

    pub fn with_vjust(mut self, vjust: f32) -> Self {
        self.vjust = Some(vjust);
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = Some(angle);
        self
    }

    pub fn with_lineheight(mut self, lineheight: f32) -> Self {
        self.lineheight = Some(lineheight);
        self
    }

    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    pub fn face(&self) -> Option<FontFace> {
        self.face
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn hjust(&self) -> Option<f32> {
        self.hjust
    }

    pub fn vjust(&self) -> Option<f32> {
        self.vjust
    }

    pub fn angle(&self) -> Option<f32> {
        self.angle
    }

    pub fn lineheight(&self) -> Option<f32> {
        self.lineheight
    }
}

impl Properties for TextElement {
    const NAMES: &'static [&'static str] = &[
        "family",
        "face",
        "color",
        "size",
        "hjust",
        "vjust",
        "angle",
        "lineheight",
    ];

    fn null_properties(&self) -> Vec<&'static str> {
        let set = [
            self.family.is_some(),
            self.face.is_some(),
            self.color.is_some(),
            self.size.is_some(),
            self.hjust.is_some(),
            self.vjust.is_some(),
            self.angle.is_some(),
            self.lineheight.is_some(),
        ];
        Self::NAMES
            .iter()
            .zip(set)
            .filter_map(|(name, is_set)| (!is_set).then_some(*name))
            .collect()
    }

    fn inherit_from(&mut self, parent: &Self) {
        fill(&mut self.family, &parent.family);
        fill(&mut self.face, &parent.face);
        fill(&mut self.color, &parent.color);
        fill_size(&mut self.size, parent.size);
        fill(&mut self.hjust, &parent.hjust);
        fill(&mut self.vjust, &parent.vjust);
        fill(&mut self.angle, &parent.angle);
        fill(&mut self.lineheight, &parent.lineheight);
    }

    fn update_from(&mut self, delta: &Self) {
        overwrite(&mut self.family, &delta.family);
        overwrite(&mut self.face, &delta.face);
        overwrite(&mut self.color, &delta.color);
        overwrite(&mut self.size, &delta.size);
        overwrite(&mut self.hjust, &delta.hjust);
        overwrite(&mut self.vjust, &delta.vjust);
        overwrite(&mut self.angle, &delta.angle);
        overwrite(&mut self.lineheight, &delta.lineheight);
    }
}

impl fmt::Display for TextElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "text(")?;
        let mut props = PropertyWriter::new(f);
        props.field("family", self.family.as_ref().map(|family| Quoted(family)))?;
        props.field("face", self.face.as_ref())?;
        props.field("color", self.color.as_ref())?;
        props.field("size", self.size.as_ref())?;
        props.field("hjust", self.hjust.as_ref())?;
        props.field("vjust", self.vjust.as_ref())?;
        props.field("angle", self.angle.as_ref())?;
        props.field("lineheight", self.lineheight.as_ref())?;
        write!(f, ")")
    }
}

/// Displays a string in double quotes, so an empty family stays visible.
struct Quoted<'a>(&'a str);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::element::rel;

    fn base_text() -> TextElement {
        TextElement::new()
            .with_family("")
            .with_face(FontFace::Plain)
            .with_color(Color::default())
            .with_size(12.0)
            .with_hjust(0.5)
            .with_vjust(0.5)
            .with_angle(0.0)
            .with_lineheight(0.9)
    }

    #[test]
    fn test_complete_text_has_no_nulls() {
        assert!(base_text().null_properties().is_empty());
    }

    #[test]
    fn test_inherit_keeps_own_angle_and_scales_size() {
        let mut axis_title_y = TextElement::new().with_angle(90.0).with_size(rel(0.8));
        axis_title_y.inherit_from(&base_text());

        assert_eq!(axis_title_y.angle(), Some(90.0));
        assert_approx_eq!(f32, axis_title_y.size().unwrap().absolute().unwrap(), 9.6);
        assert_eq!(axis_title_y.family(), Some(""));
        assert!(axis_title_y.null_properties().is_empty());
    }

    #[test]
    fn test_inherited_relative_size_is_not_rescaled() {
        let mut text = TextElement::new().with_angle(90.0);
        text.inherit_from(&TextElement::new().with_size(rel(0.8)));
        assert_eq!(text.size(), Some(rel(0.8)));

        let mut text = TextElement::new().with_size(rel(0.5));
        text.inherit_from(&TextElement::new().with_size(rel(0.8)));
        assert_eq!(text.size(), Some(rel(0.4)));
    }

    #[test]
    fn test_update_from() {
        let mut text = base_text();
        text.update_from(&TextElement::new().with_face(FontFace::Bold));
        assert_eq!(text.face(), Some(FontFace::Bold));
        assert_eq!(text.size(), Some(Size::Absolute(12.0)));
    }

    #[test]
    fn test_font_face_from_str() {
        assert_eq!("plain".parse::<FontFace>().unwrap(), FontFace::Plain);
        assert_eq!("bold".parse::<FontFace>().unwrap(), FontFace::Bold);
        assert_eq!("italic".parse::<FontFace>().unwrap(), FontFace::Italic);
        assert_eq!(
            "bold.italic".parse::<FontFace>().unwrap(),
            FontFace::BoldItalic
        );
        assert!("heavy".parse::<FontFace>().unwrap_err().contains("invalid font face"));
    }

    #[test]
    fn test_text_display_quotes_family() {
        let text = TextElement::new().with_family("").with_angle(90.0);
        assert_eq!(text.to_string(), r#"text(family = "", angle = 90)"#);
    }
}
