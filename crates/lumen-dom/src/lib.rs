//! DOM tree implementation for the Lumen style engine.
//!
//! This crate provides an arena-based DOM tree structure following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/). Trees are produced by
//! an HTML parser (or built by hand in tests and tools) and are only ever read
//! by the style engine.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues.

use std::collections::HashMap;
use std::fmt::Write as _;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    /// "Element nodes are simply known as elements."
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    /// "Text nodes are known as text."
    Text(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment(String),
}

/// Element-specific data.
///
/// NOTE: We only store the local name and the attribute list. Namespaces and
/// custom element state are out of scope for styling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data from a tag name and `(name, value)` attribute pairs.
    ///
    /// Later pairs replace earlier ones with the same name, so attribute
    /// names stay unique.
    #[must_use]
    pub fn new(tag_name: impl Into<String>, attrs: &[(&str, &str)]) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs: attrs
                .iter()
                .map(|&(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Returns the element's id attribute value if present.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The id attribute specifies its element's unique identifier (ID)."
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").map(String::as_str)
    }

    /// Returns the class names from the class attribute, in source order.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The class attribute, if specified, must have a value that is a set of
    /// space-separated tokens representing the various classes that the element belongs to."
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attrs
            .get("class")
            .map(String::as_str)
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    /// Whether the element carries an attribute with the given name.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }
}

/// Arena-based DOM tree with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// All nodes live in one contiguous vector and refer to each other by index.
/// The Document node is always at [`NodeId::ROOT`].
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new DOM tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                node_type: NodeType::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the Document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Appends `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either id was not allocated by this tree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Allocate an element and append it to `parent`.
    pub fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: &str,
        attrs: &[(&str, &str)],
    ) -> NodeId {
        let id = self.alloc(NodeType::Element(ElementData::new(tag_name, attrs)));
        self.append_child(parent, id);
        id
    }

    /// Allocate a text node and append it to `parent`.
    pub fn create_text(&mut self, parent: NodeId, data: &str) -> NodeId {
        let id = self.alloc(NodeType::Text(data.to_string()));
        self.append_child(parent, id);
        id
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is that
    /// document, if it exists; otherwise null."
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .copied()
            .find(|&id| self.as_element(id).is_some())
    }

    /// Count the nodes reachable from `id`, including `id` itself.
    #[must_use]
    pub fn subtree_size(&self, id: NodeId) -> usize {
        1 + self
            .children(id)
            .iter()
            .map(|&child| self.subtree_size(child))
            .sum::<usize>()
    }

    /// Find every element reached by following a dot-separated tag path.
    ///
    /// `root` itself must match the first segment, so `"html.body.p"` returns
    /// all `<p>` children of all `<body>` children of an `<html>` root. Text
    /// and comment nodes along the way are ignored, and a non-element `root`
    /// never matches.
    #[must_use]
    pub fn nodes_by_path(&self, root: NodeId, path: &str) -> Vec<NodeId> {
        let mut segments = path.split('.');
        let Some(first) = segments.next() else {
            return Vec::new();
        };

        if self.as_element(root).is_none_or(|e| e.tag_name != first) {
            return Vec::new();
        }

        let mut frontier = vec![root];
        for segment in segments {
            frontier = frontier
                .iter()
                .flat_map(|&id| self.children(id).iter().copied())
                .filter(|&child| self.as_element(child).is_some_and(|e| e.tag_name == segment))
                .collect();
            if frontier.is_empty() {
                break;
            }
        }
        frontier
    }

    /// Render the subtree at `id` as indented text, one node per line.
    ///
    /// ```text
    /// tag: span
    ///   value: hello
    /// ```
    ///
    /// Attributes are listed in name order so the output is stable.
    #[must_use]
    pub fn dump(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.dump_into(id, 0, &mut out);
        out
    }

    fn dump_into(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = self.get(id) else { return };
        let indent = "  ".repeat(depth);

        match &node.node_type {
            NodeType::Document => {
                let _ = writeln!(out, "{indent}document");
            }
            NodeType::Element(data) => {
                let _ = write!(out, "{indent}tag: {}", data.tag_name);
                let mut attrs: Vec<_> = data.attrs.iter().collect();
                attrs.sort();
                for (name, value) in attrs {
                    let _ = write!(out, " {name}=\"{value}\"");
                }
                out.push('\n');
            }
            NodeType::Text(text) => {
                let _ = writeln!(out, "{indent}value: {text}");
            }
            NodeType::Comment(text) => {
                let _ = writeln!(out, "{indent}comment: {text}");
            }
        }

        for &child in &node.children {
            self.dump_into(child, depth + 1, out);
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
