//! Style tree construction
//!
//! This module pairs every DOM node with the declarations that apply to it,
//! following a narrow reading of
//! [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/):
//! there is no specificity and no origin, only source order. A later matching
//! rule overrides an earlier one, and within a rule the declaration block has
//! already resolved duplicates (see [`crate::parser::Declarations`]).
//!
//! # Design
//!
//! The styled tree is an arena of [`StyledNode`]s addressed by
//! [`StyledNodeId`], mirroring [`lumen_dom::DomTree`]. It borrows the DOM it
//! was built from, so it cannot outlive it.

use std::fmt::Write as _;

use lumen_common::warning::warn_once;
use lumen_dom::{DomTree, ElementData, Node, NodeId, NodeType};
use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::media_query::{Context, matches_condition};
use crate::parser::{Rule, Stylesheet};
use crate::property_id::PropertyId;
use crate::selector::is_match;

/// [§ 6 Cascading](https://www.w3.org/TR/css-cascade-4/#cascading)
///
/// Collect the declarations of every rule that applies to `element`, in
/// stylesheet order.
///
/// A rule applies when its `@media` condition (if any) holds under `ctx` and
/// at least one of its selectors matches. All of its declarations are then
/// appended in their own order. Nothing is deduplicated: when a property
/// appears more than once, the last occurrence wins.
///
/// A media condition that cannot be evaluated disables its rule.
#[must_use]
pub fn matching_rules(
    element: &ElementData,
    stylesheet: &Stylesheet,
    ctx: &Context,
) -> Vec<(PropertyId, String)> {
    collect_declarations(element, &active_rules(stylesheet, ctx))
}

/// The rules whose `@media` condition (if any) holds under `ctx`, in
/// stylesheet order. Each condition is evaluated once per call.
fn active_rules<'s>(stylesheet: &'s Stylesheet, ctx: &Context) -> Vec<&'s Rule> {
    stylesheet
        .iter()
        .filter(|rule| {
            let Some(condition) = &rule.media_query else {
                return true;
            };
            matches_condition(condition, ctx).unwrap_or_else(|| {
                warn_once(
                    "CSS",
                    &format!("ignoring rules under unsupported @media {condition}"),
                );
                false
            })
        })
        .collect()
}

fn collect_declarations(element: &ElementData, rules: &[&Rule]) -> Vec<(PropertyId, String)> {
    let mut matched = Vec::new();

    for rule in rules {
        if rule.selectors.iter().any(|selector| is_match(element, selector)) {
            matched.extend(
                rule.declarations
                    .iter()
                    .map(|(name, value)| (PropertyId::from_name(name), value.clone())),
            );
        }
    }

    matched
}

/// A type-safe index into a [`StyleTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyledNodeId(pub usize);

impl StyledNodeId {
    /// The node styled first, for the DOM node the tree was built from.
    pub const ROOT: Self = Self(0);
}

/// One node of the styled tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledNode {
    /// The DOM node this entry styles.
    pub node: NodeId,
    /// Matched `(property, value)` pairs in match order. Empty for anything
    /// but elements.
    pub properties: Vec<(PropertyId, String)>,
    /// One entry per DOM child, in DOM order.
    pub children: Vec<StyledNodeId>,
    /// The styled node whose `children` hold this one. `None` for the root.
    pub parent: Option<StyledNodeId>,
}

/// The styled counterpart of (a subtree of) a [`DomTree`].
#[derive(Debug, Clone)]
pub struct StyleTree<'a> {
    dom: &'a DomTree,
    nodes: Vec<StyledNode>,
}

impl<'a> StyleTree<'a> {
    /// The styled node for the DOM node the tree was built from.
    #[must_use]
    pub const fn root(&self) -> StyledNodeId {
        StyledNodeId::ROOT
    }

    /// Get a styled node by its ID.
    #[must_use]
    pub fn get(&self, id: StyledNodeId) -> Option<&StyledNode> {
        self.nodes.get(id.0)
    }

    /// Number of styled nodes. Equal to the size of the styled DOM subtree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for a built tree, which holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The DOM this tree was built from.
    #[must_use]
    pub const fn dom(&self) -> &'a DomTree {
        self.dom
    }

    /// The DOM node styled by `id`.
    #[must_use]
    pub fn dom_node(&self, id: StyledNodeId) -> Option<&'a Node> {
        let dom = self.dom;
        self.get(id).and_then(|styled| dom.get(styled.node))
    }

    /// Children of `id`, in DOM order.
    #[must_use]
    pub fn children(&self, id: StyledNodeId) -> &[StyledNodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Parent of `id`.
    #[must_use]
    pub fn parent(&self, id: StyledNodeId) -> Option<StyledNodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// The value `id` ended up with for `property`: its last matched
    /// occurrence.
    #[must_use]
    pub fn property(&self, id: StyledNodeId, property: &PropertyId) -> Option<&str> {
        self.get(id)?
            .properties
            .iter()
            .rev()
            .find(|(p, _)| p == property)
            .map(|(_, value)| value.as_str())
    }

    /// [§ 7.2 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
    ///
    /// "Inheritance propagates property values from parent elements to their
    /// children."
    ///
    /// Like [`StyleTree::property`], but an inherited property that `id` does
    /// not set is looked up on its ancestors, nearest first.
    #[must_use]
    pub fn inherited_property(&self, id: StyledNodeId, property: &PropertyId) -> Option<&str> {
        if !property.is_inherited() {
            return self.property(id, property);
        }

        let mut current = Some(id);
        while let Some(node) = current {
            if let Some(value) = self.property(node, property) {
                return Some(value);
            }
            current = self.parent(node);
        }
        None
    }

    /// Render the subtree at `id` as indented text. Matched properties are
    /// listed under their node, prefixed with `-`.
    #[must_use]
    pub fn dump(&self, id: StyledNodeId) -> String {
        let mut out = String::new();
        self.dump_into(id, 0, &mut out);
        out
    }

    fn dump_into(&self, id: StyledNodeId, depth: usize, out: &mut String) {
        let (Some(styled), Some(node)) = (self.get(id), self.dom_node(id)) else {
            return;
        };
        let prefix = "  ".repeat(depth);

        match &node.node_type {
            NodeType::Document => {
                let _ = writeln!(out, "{prefix}Document");
            }
            NodeType::Element(data) => {
                let _ = writeln!(out, "{prefix}<{}>", data.tag_name);
            }
            NodeType::Text(data) => {
                let _ = writeln!(out, "{prefix}{data:?}");
            }
            NodeType::Comment(data) => {
                let _ = writeln!(out, "{prefix}<!-- {data} -->");
            }
        }

        for (property, value) in &styled.properties {
            let _ = writeln!(out, "{prefix}  - {property}: {value}");
        }

        for &child in &styled.children {
            self.dump_into(child, depth + 1, out);
        }
    }

    fn push(&mut self, node: NodeId) -> StyledNodeId {
        let id = StyledNodeId(self.nodes.len());
        self.nodes.push(StyledNode {
            node,
            properties: Vec::new(),
            children: Vec::new(),
            parent: None,
        });
        id
    }

    fn build(&mut self, current: StyledNodeId, rules: &[&Rule]) {
        let dom = self.dom;
        let dom_id = self.nodes[current.0].node;

        // Text and comment nodes are leaves.
        if matches!(
            dom.get(dom_id).map(|n| &n.node_type),
            Some(NodeType::Document | NodeType::Element(_))
        ) {
            for &child in dom.children(dom_id) {
                let child_id = self.push(child);
                self.nodes[current.0].children.push(child_id);
                self.build(child_id, rules);
                self.nodes[child_id.0].parent = Some(current);
            }
        }

        if let Some(element) = dom.as_element(dom_id) {
            self.nodes[current.0].properties = collect_declarations(element, rules);
        }
    }
}

/// Build the styled tree for the subtree of `dom` rooted at `root`.
///
/// Every DOM node in the subtree gets exactly one [`StyledNode`], so the two
/// trees have the same shape. Only elements get properties.
#[must_use]
pub fn style_tree<'a>(
    dom: &'a DomTree,
    root: NodeId,
    stylesheet: &Stylesheet,
    ctx: &Context,
) -> StyleTree<'a> {
    let mut tree = StyleTree {
        dom,
        nodes: Vec::with_capacity(dom.subtree_size(root)),
    };
    let rules = active_rules(stylesheet, ctx);
    let root_id = tree.push(root);
    tree.build(root_id, &rules);
    tree
}

/// Print the whole styled tree to stdout.
pub fn print_style_tree(tree: &StyleTree<'_>) {
    print!("{}", tree.dump(tree.root()));
}

impl Serialize for StyleTree<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SerializedNode {
            tree: self,
            id: self.root(),
        }
        .serialize(serializer)
    }
}

/// A styled node serialized as a nested object, children inline.
struct SerializedNode<'t, 'a> {
    tree: &'t StyleTree<'a>,
    id: StyledNodeId,
}

impl Serialize for SerializedNode<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let styled = self.tree.get(self.id);
        let label = match self.tree.dom_node(self.id).map(|n| &n.node_type) {
            Some(NodeType::Document) => "#document".to_string(),
            Some(NodeType::Element(data)) => data.tag_name.clone(),
            Some(NodeType::Text(_)) => "#text".to_string(),
            Some(NodeType::Comment(_)) => "#comment".to_string(),
            None => String::new(),
        };

        let mut state = serializer.serialize_struct("StyledNode", 3)?;
        state.serialize_field("node", &label)?;
        state.serialize_field(
            "properties",
            &styled.map_or(&[][..], |s| s.properties.as_slice()),
        )?;
        state.serialize_field(
            "children",
            &SerializedChildren {
                tree: self.tree,
                ids: self.tree.children(self.id),
            },
        )?;
        state.end()
    }
}

struct SerializedChildren<'t, 'a> {
    tree: &'t StyleTree<'a>,
    ids: &'t [StyledNodeId],
}

impl Serialize for SerializedChildren<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.ids.len()))?;
        for &id in self.ids {
            seq.serialize_element(&SerializedNode { tree: self.tree, id })?;
        }
        seq.end()
    }
}
