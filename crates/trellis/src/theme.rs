//! Theme store and the two theme merge operators.
//!
//! A [`Theme`] maps element names to [`Element`] values. A name that is not in
//! the map is *absent*: it inherits everything from its parents. An entry that
//! is present (even with every property unset) takes part in class checks.
//!
//! Themes combine in two ways:
//!
//! - **Replace** (`a + b`): every entry of `b` replaces `a`'s entry wholesale.
//! - **Update** (`(a | b)?`): every entry of `b` is merged property by
//!   property onto `a`'s entry; properties `b` leaves unset are kept.
//!
//! ```
//! # use trellis::theme::{Theme, theme_grey};
//! # use trellis::element::{Element, RectElement};
//! # use trellis::color::Color;
//! let red = Color::new("red").unwrap();
//! let delta: Theme = [(
//!     "panel.background",
//!     Element::Rect(RectElement::new().with_fill(red.clone())),
//! )]
//! .into_iter()
//! .collect();
//!
//! let updated = (theme_grey(12.0, "") | delta.clone()).unwrap();
//! let Some(Element::Rect(rect)) = updated.get("panel.background") else { unreachable!() };
//! assert_eq!(rect.fill(), Some(red));
//! assert!(rect.color().is_some());
//!
//! let replaced = theme_grey(12.0, "") + delta;
//! let Some(Element::Rect(rect)) = replaced.get("panel.background") else { unreachable!() };
//! assert_eq!(rect.color(), None);
//! ```

mod defaults;

pub use defaults::{theme_bw, theme_grey};

use std::ops::{Add, BitOr};

use indexmap::IndexMap;
use log::debug;

use trellis_core::element::{Element, Properties};

use crate::{error::ThemeError, tree::ElementTree};

/// An insertion-ordered mapping from element name to element.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    elements: IndexMap<String, Element>,
}

impl Theme {
    /// Creates a theme with no entries.
    pub fn new() -> Self {
        Self {
            elements: IndexMap::new(),
        }
    }

    /// Looks up an entry without applying any inheritance.
    pub fn get(&self, name: &str) -> Option<&Element> {
        self.elements.get(name)
    }

    /// Sets an entry, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, element: impl Into<Element>) -> Option<Element> {
        self.elements.insert(name.into(), element.into())
    }

    /// Removes an entry, making the element absent again.
    pub fn remove(&mut self, name: &str) -> Option<Element> {
        self.elements.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.elements.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Element)> {
        self.elements.iter().map(|(name, element)| (name.as_str(), element))
    }

    /// Checks every entry against the element tree.
    ///
    /// # Errors
    ///
    /// - [`ThemeError::UnknownElement`] for a name the tree does not declare
    /// - [`ThemeError::ClassMismatch`] for a non-blank entry of the wrong kind
    pub fn validate(&self, tree: &ElementTree) -> Result<(), ThemeError> {
        for (name, element) in &self.elements {
            let expected = tree.kind_of(name)?;
            match element.kind() {
                Some(found) if found != expected => {
                    return Err(ThemeError::ClassMismatch {
                        element: name.clone(),
                        expected,
                        found,
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns the names present in `baseline` but absent from this theme,
    /// in baseline order.
    pub fn missing_from(&self, baseline: &Theme) -> Vec<String> {
        baseline
            .elements
            .keys()
            .filter(|name| !self.contains(name))
            .cloned()
            .collect()
    }

    /// Replace-combines `other` onto this theme.
    ///
    /// Entries of `other` replace entries of the same name; entries only in
    /// `self` are kept.
    pub fn replace(&self, other: &Theme) -> Theme {
        let mut combined = self.clone();
        for (name, element) in &other.elements {
            combined.elements.insert(name.clone(), element.clone());
        }
        debug!(replaced = other.len(); "Theme replace-combined");
        combined
    }

    /// Update-combines `delta` onto this theme.
    ///
    /// For every entry of `delta`:
    ///
    /// - absent or blank in `self`: the delta entry is inserted as-is
    /// - blank in `delta`: the entry becomes blank
    /// - atomic values of the same kind: the delta value replaces the old one
    /// - property bags of the same kind: properties set in the delta overwrite
    ///   the old ones, unset ones are kept
    ///
    /// `self` is never modified.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::TypeMismatch`] when an entry would merge two
    /// elements of different kinds. No partial result is produced.
    pub fn update(&self, delta: &Theme) -> Result<Theme, ThemeError> {
        let mut combined = self.clone();
        for (name, right) in &delta.elements {
            let merged = match combined.elements.get(name) {
                None => right.clone(),
                Some(left) => update_element(name, left, right)?,
            };
            combined.elements.insert(name.clone(), merged);
        }
        debug!(updated = delta.len(); "Theme update-combined");
        Ok(combined)
    }
}

impl Default for Theme {
    /// The grey baseline theme at 12pt.
    fn default() -> Self {
        theme_grey(12.0, "")
    }
}

impl<N: Into<String>> FromIterator<(N, Element)> for Theme {
    fn from_iter<I: IntoIterator<Item = (N, Element)>>(iter: I) -> Self {
        Self {
            elements: iter
                .into_iter()
                .map(|(name, element)| (name.into(), element))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Theme {
    type Item = (&'a String, &'a Element);
    type IntoIter = indexmap::map::Iter<'a, String, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl Add for Theme {
    type Output = Theme;

    fn add(self, rhs: Theme) -> Theme {
        self.replace(&rhs)
    }
}

impl BitOr for Theme {
    type Output = Result<Theme, ThemeError>;

    fn bitor(self, rhs: Theme) -> Self::Output {
        self.update(&rhs)
    }
}

fn update_element(name: &str, left: &Element, right: &Element) -> Result<Element, ThemeError> {
    let merged = match (left, right) {
        (Element::Blank, _) | (_, Element::Blank) => right.clone(),
        (Element::Line(left), Element::Line(right)) => {
            let mut line = left.clone();
            line.update_from(right);
            Element::Line(line)
        }
        (Element::Rect(left), Element::Rect(right)) => {
            let mut rect = left.clone();
            rect.update_from(right);
            Element::Rect(rect)
        }
        (Element::Text(left), Element::Text(right)) => {
            let mut text = left.clone();
            text.update_from(right);
            Element::Text(text)
        }
        (Element::Unit(_), Element::Unit(_))
        | (Element::Margin(_), Element::Margin(_))
        | (Element::Setting(_), Element::Setting(_)) => right.clone(),
        _ => match (left.kind(), right.kind()) {
            (Some(left), Some(right)) => {
                return Err(ThemeError::TypeMismatch {
                    element: name.to_string(),
                    left,
                    right,
                });
            }
            _ => right.clone(),
        },
    };
    Ok(merged)
}
