//! Theme element definitions.
//!
//! A theme maps element names (such as `axis.text.x`) to [`Element`] values.
//! Most elements are property bags whose properties may be left unset so they
//! can be inherited from parent elements during resolution.
//!
//! # Overview
//!
//! - [`Element`] - The closed set of element variants, including [`Element::Blank`]
//! - [`ElementKind`] - The capability tag an element name requires
//! - [`LineElement`], [`RectElement`], [`TextElement`] - Property bags
//! - [`Unit`], [`Margin`] - Atomic measurements
//! - [`Size`] and [`rel`] - Absolute or relative sizes
//! - [`Properties`] - Null-aware inheritance and update of property bags
//! - [`combine`] - Pairwise merge used by inheritance
//!
//! # Merging
//!
//! ```
//! use trellis_core::color::Color;
//! use trellis_core::element::{Element, LineElement, Size, combine, rel};
//!
//! let parent = Element::Line(
//!     LineElement::new()
//!         .with_color(Color::new("black").unwrap())
//!         .with_size(0.5),
//! );
//! let child = Element::Line(LineElement::new().with_size(rel(2.0)));
//!
//! let merged = combine(Some(child), Some(&parent)).unwrap();
//! let Element::Line(line) = merged else { unreachable!() };
//! assert_eq!(line.size(), Some(Size::Absolute(1.0)));
//! assert_eq!(line.color(), Some(Color::new("black").unwrap()));
//! ```

mod line;
mod rect;
mod size;
mod text;
mod unit;

pub use line::{LineElement, LineEnd, LineType};
pub use rect::RectElement;
pub use size::{Size, rel};
pub use text::{FontFace, TextElement};
pub use unit::{Margin, Unit, UnitKind};

use std::{fmt, str::FromStr};

// =============================================================================
// Element kinds
// =============================================================================

/// The capability tag of an element.
///
/// Each element name in the element tree requires one kind; a theme entry of
/// another kind is a configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Line,
    Rect,
    Text,
    Unit,
    Margin,
    Setting,
}

impl ElementKind {
    /// Names of the properties an element of this kind carries.
    ///
    /// Atomic kinds (units, margins, settings) report a single `value`
    /// property.
    pub fn property_names(self) -> &'static [&'static str] {
        match self {
            Self::Line => LineElement::NAMES,
            Self::Rect => RectElement::NAMES,
            Self::Text => TextElement::NAMES,
            Self::Unit | Self::Margin | Self::Setting => &["value"],
        }
    }

    /// Returns `true` for kinds whose value is replaced as a whole rather
    /// than merged property by property.
    pub fn is_atomic(self) -> bool {
        matches!(self, Self::Unit | Self::Margin | Self::Setting)
    }
}

impl FromStr for ElementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(Self::Line),
            "rect" => Ok(Self::Rect),
            "text" => Ok(Self::Text),
            "unit" => Ok(Self::Unit),
            "margin" => Ok(Self::Margin),
            "setting" => Ok(Self::Setting),
            _ => Err(format!(
                "invalid element kind `{s}`, valid values: line, rect, text, unit, margin, setting"
            )),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Line => "line",
            Self::Rect => "rect",
            Self::Text => "text",
            Self::Unit => "unit",
            Self::Margin => "margin",
            Self::Setting => "setting",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Elements
// =============================================================================

/// A theme element value.
///
/// [`Element::Blank`] means "draw nothing" for the element it is assigned
/// to. It has no kind and is never merged with ancestors.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Blank,
    Line(LineElement),
    Rect(RectElement),
    Text(TextElement),
    Unit(Unit),
    Margin(Margin),
    Setting(String),
}

impl Element {
    /// Returns the element's kind, or `None` for [`Element::Blank`].
    pub fn kind(&self) -> Option<ElementKind> {
        match self {
            Self::Blank => None,
            Self::Line(_) => Some(ElementKind::Line),
            Self::Rect(_) => Some(ElementKind::Rect),
            Self::Text(_) => Some(ElementKind::Text),
            Self::Unit(_) => Some(ElementKind::Unit),
            Self::Margin(_) => Some(ElementKind::Margin),
            Self::Setting(_) => Some(ElementKind::Setting),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    /// Names of the properties that are still unset.
    ///
    /// Blank and atomic elements never have unset properties.
    pub fn null_properties(&self) -> Vec<&'static str> {
        match self {
            Self::Line(line) => line.null_properties(),
            Self::Rect(rect) => rect.null_properties(),
            Self::Text(text) => text.null_properties(),
            Self::Blank | Self::Unit(_) | Self::Margin(_) | Self::Setting(_) => Vec::new(),
        }
    }

    /// Fills this element's unset properties from `parent` and resolves a
    /// relative size against the parent's size.
    ///
    /// Elements of different variants share no properties, so inheriting
    /// across variants (or from a blank parent) changes nothing.
    fn inherit_from(&mut self, parent: &Element) {
        match (self, parent) {
            (Self::Line(child), Self::Line(parent)) => child.inherit_from(parent),
            (Self::Rect(child), Self::Rect(parent)) => child.inherit_from(parent),
            (Self::Text(child), Self::Text(parent)) => child.inherit_from(parent),
            _ => {}
        }
    }
}

impl From<LineElement> for Element {
    fn from(line: LineElement) -> Self {
        Self::Line(line)
    }
}

impl From<RectElement> for Element {
    fn from(rect: RectElement) -> Self {
        Self::Rect(rect)
    }
}

impl From<TextElement> for Element {
    fn from(text: TextElement) -> Self {
        Self::Text(text)
    }
}

impl From<Unit> for Element {
    fn from(unit: Unit) -> Self {
        Self::Unit(unit)
    }
}

impl From<Margin> for Element {
    fn from(margin: Margin) -> Self {
        Self::Margin(margin)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "blank"),
            Self::Line(line) => fmt::Display::fmt(line, f),
            Self::Rect(rect) => fmt::Display::fmt(rect, f),
            Self::Text(text) => fmt::Display::fmt(text, f),
            Self::Unit(unit) => fmt::Display::fmt(unit, f),
            Self::Margin(margin) => fmt::Display::fmt(margin, f),
            Self::Setting(value) => write!(f, "{value:?}"),
        }
    }
}

/// Merges `secondary` into `primary`.
///
/// - `secondary` absent: `primary` is returned unchanged.
/// - `primary` absent: a copy of `secondary` is returned.
/// - Otherwise every property unset on `primary` takes `secondary`'s value,
///   and a relative size on `primary` is resolved against `secondary`'s size.
///
/// `primary` keeps its own variant. Callers check kind compatibility
/// beforehand. The merge is not associative once both operands leave the
/// same property unset, but `combine(a, None) == a` and
/// `combine(None, b) == b` always hold.
pub fn combine(primary: Option<Element>, secondary: Option<&Element>) -> Option<Element> {
    let Some(secondary) = secondary else {
        return primary;
    };
    let Some(mut primary) = primary else {
        return Some(secondary.clone());
    };

    primary.inherit_from(secondary);
    Some(primary)
}

// =============================================================================
// Property bags
// =============================================================================

/// Null-aware operations over an element's optional properties.
pub trait Properties {
    /// All property names, in declaration order.
    const NAMES: &'static [&'static str];

    /// Names of the properties that are unset, in declaration order.
    fn null_properties(&self) -> Vec<&'static str>;

    /// Fills unset properties from `parent`; a relative size becomes
    /// `parent size * multiplier`.
    fn inherit_from(&mut self, parent: &Self);

    /// Overwrites properties with every property that is set on `delta`.
    fn update_from(&mut self, delta: &Self);
}

fn fill<T: Clone>(slot: &mut Option<T>, from: &Option<T>) {
    if slot.is_none() {
        slot.clone_from(from);
    }
}

/// Scales the element's own size against the parent's, or takes the parent's
/// size as is when the element sets none.
fn fill_size(slot: &mut Option<Size>, from: Option<Size>) {
    match (*slot, from) {
        (Some(size), Some(parent_size)) => *slot = Some(size.resolve_against(parent_size)),
        (None, _) => *slot = from,
        (Some(_), None) => {}
    }
}

fn overwrite<T: Clone>(slot: &mut Option<T>, from: &Option<T>) {
    if from.is_some() {
        slot.clone_from(from);
    }
}

/// Writes `name = value` pairs separated by commas, skipping unset values.
struct PropertyWriter<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
    first: bool,
}

impl<'a, 'b> PropertyWriter<'a, 'b> {
    fn new(f: &'a mut fmt::Formatter<'b>) -> Self {
        Self { f, first: true }
    }

    fn field<T: fmt::Display>(&mut self, name: &str, value: Option<T>) -> fmt::Result {
        let Some(value) = value else {
            return Ok(());
        };
        if !self.first {
            write!(self.f, ", ")?;
        }
        self.first = false;
        write!(self.f, "{name} = {value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn black() -> Color {
        Color::new("black").unwrap()
    }

    #[test]
    fn test_element_kind() {
        assert_eq!(Element::Blank.kind(), None);
        assert_eq!(
            Element::Line(LineElement::new()).kind(),
            Some(ElementKind::Line)
        );
        assert_eq!(
            Element::Setting("right".to_string()).kind(),
            Some(ElementKind::Setting)
        );
        assert!(Element::Blank.is_blank());
    }

    #[test]
    fn test_element_kind_round_trips_through_str() {
        for kind in [
            ElementKind::Line,
            ElementKind::Rect,
            ElementKind::Text,
            ElementKind::Unit,
            ElementKind::Margin,
            ElementKind::Setting,
        ] {
            assert_eq!(kind.to_string().parse::<ElementKind>().unwrap(), kind);
        }
        assert!("circle".parse::<ElementKind>().is_err());
    }

    #[test]
    fn test_atomic_elements_have_no_nulls() {
        assert!(
            Element::Unit(Unit::new(1.0, UnitKind::Cm))
                .null_properties()
                .is_empty()
        );
        assert!(Element::Blank.null_properties().is_empty());
        assert_eq!(ElementKind::Margin.property_names(), &["value"]);
        assert!(ElementKind::Margin.is_atomic());
        assert!(!ElementKind::Text.is_atomic());
    }

    #[test]
    fn test_combine_with_absent_operands() {
        let line = Element::Line(LineElement::new().with_color(black()));
        assert_eq!(combine(Some(line.clone()), None), Some(line.clone()));
        assert_eq!(combine(None, Some(&line)), Some(line));
        assert_eq!(combine(None, None), None);
    }

    #[test]
    fn test_combine_primary_wins() {
        let primary = Element::Line(LineElement::new().with_color(black()));
        let secondary = Element::Line(
            LineElement::new()
                .with_color(Color::new("red").unwrap())
                .with_size(0.5),
        );

        let Some(Element::Line(merged)) = combine(Some(primary), Some(&secondary)) else {
            panic!("expected a line");
        };
        assert_eq!(merged.color(), Some(black()));
        assert_eq!(merged.size(), Some(Size::Absolute(0.5)));
    }

    #[test]
    fn test_combine_blank_secondary_changes_nothing() {
        let primary = Element::Line(LineElement::new().with_size(rel(0.5)));
        let merged = combine(Some(primary.clone()), Some(&Element::Blank));
        assert_eq!(merged, Some(primary));
    }

    #[test]
    fn test_combine_does_not_touch_secondary() {
        let secondary = Element::Text(TextElement::new().with_size(10.0));
        let primary = Element::Text(TextElement::new().with_size(rel(1.5)));

        let merged = combine(Some(primary), Some(&secondary)).unwrap();

        assert_eq!(
            merged,
            Element::Text(TextElement::new().with_size(15.0))
        );
        assert_eq!(
            secondary,
            Element::Text(TextElement::new().with_size(10.0))
        );
    }

    #[test]
    fn test_element_display() {
        assert_eq!(Element::Blank.to_string(), "blank");
        assert_eq!(Element::Setting("right".to_string()).to_string(), "\"right\"");
        assert_eq!(
            Element::Unit(Unit::new(0.25, UnitKind::Lines)).to_string(),
            "0.25lines"
        );
    }
}
