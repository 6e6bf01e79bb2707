//! Element resolution.
//!
//! Resolving an element walks the element tree from the element up to the
//! roots, resolves every parent first and folds the results into the
//! element's own entry with [`combine`]. The first declared parent wins
//! properties the element leaves unset.

use log::trace;

use trellis_core::element::{Element, combine};

use crate::{error::ThemeError, theme::Theme, tree::ElementTree};

/// Resolves theme elements against an element tree.
///
/// Resolution is a pure function of the tree, the theme and the name:
/// resolving the same name twice against an unchanged theme yields equal
/// results.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    tree: &'a ElementTree,
}

impl<'a> Resolver<'a> {
    pub fn new(tree: &'a ElementTree) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &'a ElementTree {
        self.tree
    }

    /// Resolves `name` against `theme`.
    ///
    /// # Returns
    ///
    /// [`Element::Blank`] when the element (or, for an absent element, its
    /// first parent) is blank; otherwise the element with every inherited
    /// property filled in and relative sizes made absolute.
    ///
    /// # Errors
    ///
    /// - [`ThemeError::UnknownElement`] if `name` or a parent is not in the tree
    /// - [`ThemeError::ClassMismatch`] if an entry has the wrong kind
    /// - [`ThemeError::IncompleteElement`] if a root entry is absent or has
    ///   unset properties
    /// - [`ThemeError::InheritanceCycle`] if the tree loops back on itself
    pub fn resolve(&self, name: &str, theme: &Theme) -> Result<Element, ThemeError> {
        let mut visiting = Vec::new();
        self.resolve_inner(name, theme, &mut visiting)
    }

    /// Resolves every element of the tree, in tree order.
    ///
    /// Each element carries its own result so one broken entry does not hide
    /// the others.
    pub fn resolve_all(&self, theme: &Theme) -> Vec<(&'a str, Result<Element, ThemeError>)> {
        self.tree
            .names()
            .map(|name| (name, self.resolve(name, theme)))
            .collect()
    }

    fn resolve_inner(
        &self,
        name: &str,
        theme: &Theme,
        visiting: &mut Vec<String>,
    ) -> Result<Element, ThemeError> {
        let node = self.tree.node(name)?;
        let own = theme.get(name);

        if let Some(Element::Blank) = own {
            trace!(element = name; "Element is blank");
            return Ok(Element::Blank);
        }

        if let Some(found) = own.and_then(Element::kind) {
            if found != node.kind() {
                return Err(ThemeError::ClassMismatch {
                    element: name.to_string(),
                    expected: node.kind(),
                    found,
                });
            }
        }

        if visiting.iter().any(|visited| visited == name) {
            let mut path = visiting.clone();
            path.push(name.to_string());
            return Err(ThemeError::InheritanceCycle { path });
        }

        if node.is_root() {
            return resolve_root(name, node.kind().property_names(), own);
        }

        trace!(element = name, parents:? = node.parents(); "Resolving element");

        visiting.push(name.to_string());
        let parents: Result<Vec<_>, _> = node
            .parents()
            .iter()
            .map(|parent| self.resolve_inner(parent, theme, visiting))
            .collect();
        visiting.pop();
        let parents = parents?;

        // A defined element never inherits "draw nothing" from a parent.
        let mut resolved = own.cloned();
        for parent in parents
            .iter()
            .filter(|parent| own.is_none() || !parent.is_blank())
        {
            resolved = combine(resolved, Some(parent));
        }

        resolved.ok_or_else(|| ThemeError::IncompleteElement {
            element: name.to_string(),
            properties: node.kind().property_names().to_vec(),
        })
    }
}

fn resolve_root(
    name: &str,
    property_names: &'static [&'static str],
    own: Option<&Element>,
) -> Result<Element, ThemeError> {
    let Some(element) = own else {
        return Err(ThemeError::IncompleteElement {
            element: name.to_string(),
            properties: property_names.to_vec(),
        });
    };

    let missing = element.null_properties();
    if !missing.is_empty() {
        return Err(ThemeError::IncompleteElement {
            element: name.to_string(),
            properties: missing,
        });
    }

    Ok(element.clone())
}

/// Resolves `name` against `theme` using the built-in element tree.
///
/// # Example
///
/// ```
/// # use trellis::{calc_element, theme::theme_grey};
/// # use trellis::element::{Element, Size};
/// let theme = theme_grey(10.0, "");
/// let Element::Text(text) = calc_element("axis.text.x", &theme).unwrap() else {
///     unreachable!()
/// };
/// assert_eq!(text.size(), Some(Size::Absolute(8.0)));
/// assert_eq!(text.vjust(), Some(1.0));
/// ```
pub fn calc_element(name: &str, theme: &Theme) -> Result<Element, ThemeError> {
    Resolver::new(ElementTree::builtin()).resolve(name, theme)
}
