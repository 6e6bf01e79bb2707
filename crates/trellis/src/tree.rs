//! The element tree: which element inherits from which.
//!
//! Every themeable element name is registered here together with the
//! [`ElementKind`] its theme entries must have and the ordered list of parents
//! it inherits unset properties from. The built-in tree is fixed
//! configuration; [`ElementTree::new`] builds custom trees (mostly useful in
//! tests and for host libraries with extra elements).
//!
//! # Example
//!
//! ```
//! # use trellis::tree::ElementTree;
//! # use trellis::element::ElementKind;
//! let tree = ElementTree::builtin();
//! assert_eq!(tree.parents_of("axis.text.x").unwrap(), ["axis.text"]);
//! assert_eq!(tree.kind_of("plot.margin").unwrap(), ElementKind::Margin);
//! assert!(tree.parents_of("line").unwrap().is_empty());
//! ```

use std::sync::OnceLock;

use indexmap::IndexMap;
use log::debug;
use petgraph::{algo::toposort, graph::DiGraph};

use trellis_core::element::ElementKind;

use crate::error::ThemeError;

/// The built-in element tree, built on first use.
static BUILTIN_TREE: OnceLock<ElementTree> = OnceLock::new();

/// Declaration of one element: its name, required kind and parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    name: String,
    kind: ElementKind,
    parents: Vec<String>,
}

impl ElementNode {
    /// Creates a node declaration.
    ///
    /// # Arguments
    ///
    /// * `name` - The element name, e.g. `"axis.text.x"`
    /// * `kind` - The kind every theme entry for this name must have
    /// * `parents` - Parent element names in priority order (first wins)
    pub fn new(name: impl Into<String>, kind: ElementKind, parents: &[&str]) -> Self {
        Self {
            name: name.into(),
            kind,
            parents: parents.iter().map(|parent| parent.to_string()).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    /// A node without parents is a root of the inheritance graph.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

/// A static inheritance graph over element names.
///
/// The graph is assumed to be acyclic; [`ElementTree::check_acyclic`]
/// verifies it. Node order is declaration order.
#[derive(Debug, Clone)]
pub struct ElementTree {
    nodes: IndexMap<String, ElementNode>,
}

impl ElementTree {
    /// Builds a tree from node declarations.
    ///
    /// # Errors
    ///
    /// - [`ThemeError::DuplicateElement`] if a name is declared twice
    /// - [`ThemeError::UnknownElement`] if a parent is not itself declared
    pub fn new(nodes: impl IntoIterator<Item = ElementNode>) -> Result<Self, ThemeError> {
        let mut map = IndexMap::new();
        for node in nodes {
            if map.contains_key(&node.name) {
                return Err(ThemeError::DuplicateElement(node.name));
            }
            map.insert(node.name.clone(), node);
        }

        for node in map.values() {
            if let Some(parent) = node.parents.iter().find(|parent| !map.contains_key(*parent)) {
                return Err(ThemeError::UnknownElement(parent.clone()));
            }
        }

        debug!(nodes_count = map.len(); "Element tree built");
        Ok(Self { nodes: map })
    }

    /// Returns the built-in element tree.
    pub fn builtin() -> &'static Self {
        BUILTIN_TREE.get_or_init(|| {
            Self::new(builtin_nodes()).expect("built-in element tree is well formed")
        })
    }

    /// Returns the node declared for `name`.
    pub fn node(&self, name: &str) -> Result<&ElementNode, ThemeError> {
        self.nodes
            .get(name)
            .ok_or_else(|| ThemeError::UnknownElement(name.to_string()))
    }

    /// Returns the parents of `name` in priority order.
    pub fn parents_of(&self, name: &str) -> Result<&[String], ThemeError> {
        self.node(name).map(ElementNode::parents)
    }

    /// Returns the kind theme entries for `name` must have.
    pub fn kind_of(&self, name: &str) -> Result<ElementKind, ThemeError> {
        self.node(name).map(ElementNode::kind)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Returns all element names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Returns all nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &ElementNode> {
        self.nodes.values()
    }

    /// Returns the nodes without parents.
    pub fn roots(&self) -> impl Iterator<Item = &ElementNode> {
        self.nodes.values().filter(|node| node.is_root())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Verifies that no element inherits from itself, directly or not.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::InheritanceCycle`] naming an element on a cycle.
    pub fn check_acyclic(&self) -> Result<(), ThemeError> {
        let mut graph = DiGraph::<&str, ()>::with_capacity(self.nodes.len(), self.nodes.len());
        let indices: IndexMap<&str, _> = self
            .nodes
            .keys()
            .map(|name| (name.as_str(), graph.add_node(name.as_str())))
            .collect();

        for node in self.nodes.values() {
            let child = indices[node.name.as_str()];
            for parent in &node.parents {
                graph.add_edge(indices[parent.as_str()], child, ());
            }
        }

        toposort(&graph, None).map(|_| ()).map_err(|cycle| {
            let name = graph[cycle.node_id()];
            ThemeError::InheritanceCycle {
                path: vec![name.to_string()],
            }
        })
    }
}

/// Declarations of the built-in elements.
fn builtin_nodes() -> Vec<ElementNode> {
    use ElementKind::{Line, Margin, Rect, Setting, Text, Unit};

    vec![
        ElementNode::new("line", Line, &[]),
        ElementNode::new("rect", Rect, &[]),
        ElementNode::new("text", Text, &[]),
        ElementNode::new("title", Text, &["text"]),
        // Axes
        ElementNode::new("axis.line", Line, &["line"]),
        ElementNode::new("axis.text", Text, &["text"]),
        ElementNode::new("axis.title", Text, &["title"]),
        ElementNode::new("axis.ticks", Line, &["line"]),
        ElementNode::new("axis.line.x", Line, &["axis.line"]),
        ElementNode::new("axis.line.y", Line, &["axis.line"]),
        ElementNode::new("axis.text.x", Text, &["axis.text"]),
        ElementNode::new("axis.text.y", Text, &["axis.text"]),
        ElementNode::new("axis.ticks.length", Unit, &[]),
        ElementNode::new("axis.ticks.x", Line, &["axis.ticks"]),
        ElementNode::new("axis.ticks.y", Line, &["axis.ticks"]),
        ElementNode::new("axis.title.x", Text, &["axis.title"]),
        ElementNode::new("axis.title.y", Text, &["axis.title"]),
        ElementNode::new("axis.ticks.margin", Unit, &[]),
        // Legend
        ElementNode::new("legend.background", Rect, &["rect"]),
        ElementNode::new("legend.margin", Unit, &[]),
        ElementNode::new("legend.key", Rect, &["panel.background"]),
        ElementNode::new("legend.key.size", Unit, &[]),
        ElementNode::new("legend.key.height", Unit, &["legend.key.size"]),
        ElementNode::new("legend.key.width", Unit, &["legend.key.size"]),
        ElementNode::new("legend.text", Text, &["text"]),
        ElementNode::new("legend.title", Text, &["title"]),
        ElementNode::new("legend.position", Setting, &[]),
        ElementNode::new("legend.justification", Setting, &[]),
        // Panel
        ElementNode::new("panel.background", Rect, &["rect"]),
        ElementNode::new("panel.border", Rect, &["rect"]),
        ElementNode::new("panel.margin", Unit, &[]),
        ElementNode::new("panel.grid", Line, &["line"]),
        ElementNode::new("panel.grid.major", Line, &["panel.grid"]),
        ElementNode::new("panel.grid.minor", Line, &["panel.grid"]),
        ElementNode::new("panel.grid.major.x", Line, &["panel.grid.major"]),
        ElementNode::new("panel.grid.major.y", Line, &["panel.grid.major"]),
        ElementNode::new("panel.grid.minor.x", Line, &["panel.grid.minor"]),
        ElementNode::new("panel.grid.minor.y", Line, &["panel.grid.minor"]),
        // Facet strips
        ElementNode::new("strip.background", Rect, &["rect"]),
        ElementNode::new("strip.text", Text, &["text"]),
        ElementNode::new("strip.text.x", Text, &["strip.text"]),
        ElementNode::new("strip.text.y", Text, &["strip.text"]),
        // Whole plot
        ElementNode::new("plot.background", Rect, &["rect"]),
        ElementNode::new("plot.title", Text, &["title"]),
        ElementNode::new("plot.margin", Margin, &[]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tree_is_acyclic() {
        assert!(ElementTree::builtin().check_acyclic().is_ok());
    }

    #[test]
    fn test_builtin_tree_contents() {
        let tree = ElementTree::builtin();
        assert_eq!(tree.len(), 45);
        assert!(tree.contains("legend.key"));
        assert_eq!(tree.parents_of("legend.key").unwrap(), ["panel.background"]);
        assert_eq!(tree.kind_of("legend.key.height").unwrap(), ElementKind::Unit);

        let roots: Vec<_> = tree.roots().map(ElementNode::name).collect();
        assert!(roots.contains(&"line"));
        assert!(roots.contains(&"plot.margin"));
        assert!(!roots.contains(&"title"));
    }

    #[test]
    fn test_parents_share_child_kind() {
        let tree = ElementTree::builtin();
        for node in tree.nodes() {
            for parent in node.parents() {
                assert_eq!(
                    tree.kind_of(parent).unwrap(),
                    node.kind(),
                    "{} inherits from {} of a different kind",
                    node.name(),
                    parent
                );
            }
        }
    }

    #[test]
    fn test_unknown_element_lookup() {
        let tree = ElementTree::builtin();
        assert_eq!(
            tree.parents_of("axis.text.z"),
            Err(ThemeError::UnknownElement("axis.text.z".to_string()))
        );
        assert!(tree.kind_of("").is_err());
    }

    #[test]
    fn test_new_rejects_unknown_parent() {
        let result = ElementTree::new([
            ElementNode::new("line", ElementKind::Line, &[]),
            ElementNode::new("grid", ElementKind::Line, &["lines"]),
        ]);
        assert_eq!(
            result.unwrap_err(),
            ThemeError::UnknownElement("lines".to_string())
        );
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let result = ElementTree::new([
            ElementNode::new("line", ElementKind::Line, &[]),
            ElementNode::new("line", ElementKind::Line, &[]),
        ]);
        assert_eq!(
            result.unwrap_err(),
            ThemeError::DuplicateElement("line".to_string())
        );
    }

    #[test]
    fn test_check_acyclic_reports_cycle() {
        let tree = ElementTree::new([
            ElementNode::new("a", ElementKind::Line, &["b"]),
            ElementNode::new("b", ElementKind::Line, &["a"]),
        ])
        .unwrap();

        let Err(ThemeError::InheritanceCycle { path }) = tree.check_acyclic() else {
            panic!("expected a cycle");
        };
        assert_eq!(path.len(), 1);
        assert!(path[0] == "a" || path[0] == "b");
    }

    #[test]
    fn test_self_parent_is_a_cycle() {
        let tree = ElementTree::new([ElementNode::new("a", ElementKind::Text, &["a"])]).unwrap();
        assert!(tree.check_acyclic().is_err());
    }
}
