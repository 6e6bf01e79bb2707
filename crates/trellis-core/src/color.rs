//! Color handling for theme elements
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. On top of CSS color syntax it understands the
//! `grey0`..`grey100` (and `gray0`..`gray100`) ramp that plot themes are
//! traditionally written with.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;

/// Wrapper around the `DynamicColor` type from the color crate.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string.
    ///
    /// Accepts CSS color strings such as `"#ff0000"`, `"rgb(255, 0, 0)"` or
    /// `"red"`, and the grey ramp `"grey0"` (black) to `"grey100"` (white).
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let grey = Color::new("grey50").unwrap();
    /// assert!(Color::new("grey101").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        if let Some(level) = grey_level(color_str) {
            let level = level?;
            let byte = grey_byte(level);
            let css = format!("rgb({byte}, {byte}, {byte})");
            return DynamicColor::from_str(&css)
                .map(|color| Self { color })
                .map_err(|err| format!("invalid color `{color_str}`: {err}"));
        }

        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// A fully transparent color, used where an element draws no outline or fill.
    pub fn transparent() -> Self {
        Self::new("transparent").expect("'transparent' is a valid CSS color")
    }

    /// Returns `true` when the color has no opacity at all.
    pub fn is_transparent(&self) -> bool {
        self.alpha() == 0.0
    }

    /// Returns the alpha (transparency) component of this color.
    ///
    /// The value lies between 0.0 (fully transparent) and 1.0 (fully opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

/// Recognizes `greyNN` / `grayNN`.
///
/// Returns `None` when the string is not a grey ramp name at all, and
/// `Some(Err(..))` when it is one with an out-of-range level.
fn grey_level(color_str: &str) -> Option<Result<u8, String>> {
    let digits = color_str
        .strip_prefix("grey")
        .or_else(|| color_str.strip_prefix("gray"))?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(match digits.parse::<u8>() {
        Ok(level) if level <= 100 => Ok(level),
        _ => Err(format!(
            "invalid color `{color_str}`: grey level must be between 0 and 100"
        )),
    })
}

/// Channel value for a grey level, rounding exact halves down.
fn grey_byte(level: u8) -> u8 {
    let exact = f32::from(level) * 255.0 / 100.0;
    (exact - 0.5).ceil().clamp(0.0, 255.0) as u8
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_color_default() {
        let color = Color::default();
        assert_eq!(color.to_string(), "black");
    }

    #[test]
    fn test_grey_ramp() {
        assert_eq!(Color::new("grey50").unwrap(), Color::new("rgb(127, 127, 127)").unwrap());
        assert_eq!(Color::new("gray90").unwrap(), Color::new("rgb(229, 229, 229)").unwrap());
        assert_eq!(Color::new("grey95").unwrap(), Color::new("rgb(242, 242, 242)").unwrap());
        assert_eq!(Color::new("grey98").unwrap(), Color::new("rgb(250, 250, 250)").unwrap());
        assert_eq!(Color::new("grey0").unwrap(), Color::new("rgb(0, 0, 0)").unwrap());
        assert_eq!(Color::new("grey100").unwrap(), Color::new("rgb(255, 255, 255)").unwrap());
    }

    #[test]
    fn test_grey_ramp_out_of_range() {
        let err = Color::new("grey101").unwrap_err();
        assert!(err.contains("between 0 and 100"));
    }

    #[test]
    fn test_grey_prefix_falls_through_to_css() {
        // Not a ramp name, so CSS parsing decides.
        assert!(Color::new("grey").is_ok());
        assert!(Color::new("greyish").is_err());
    }

    #[test]
    fn test_transparent() {
        let color = Color::transparent();
        assert!(color.is_transparent());
        assert!(!Color::default().is_transparent());
    }

    #[test]
    fn test_color_from_str() {
        let color: Color = "navy".parse().unwrap();
        assert_eq!(color, Color::new("navy").unwrap());
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let color1 = Color::new("red").unwrap();
        let color2 = Color::new("red").unwrap();
        let color3 = Color::new("blue").unwrap();

        assert_eq!(color1, color2);
        assert_ne!(color1, color3);

        let mut set = HashSet::new();
        set.insert(color1);
        assert!(set.contains(&color2));
        assert!(!set.contains(&color3));
    }
}
