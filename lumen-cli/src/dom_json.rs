//! DOM trees described as JSON.
//!
//! There is no HTML parser in this workspace, so the CLI takes documents in a
//! small JSON shape instead:
//!
//! ```json
//! { "tag": "p", "attrs": { "class": "intro" }, "children": [ { "text": "hi" } ] }
//! ```
//!
//! The top level is either one node or an array of nodes. Either way they
//! become children of the Document node.

use std::collections::BTreeMap;

use lumen_dom::{DomTree, NodeId};
use serde::Deserialize;

/// One node of a JSON document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum JsonNode {
    /// `{ "text": "..." }`
    Text {
        /// Character data.
        text: String,
    },
    /// `{ "tag": "...", "attrs": {...}, "children": [...] }`
    Element {
        /// Local name.
        tag: String,
        /// Attributes, in name order.
        #[serde(default)]
        attrs: BTreeMap<String, String>,
        /// Child nodes in document order.
        #[serde(default)]
        children: Vec<JsonNode>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonDocument {
    Many(Vec<JsonNode>),
    One(JsonNode),
}

/// Parse a JSON document into a fresh [`DomTree`].
///
/// # Errors
///
/// Returns an error if `json` is not valid JSON or a node has neither a
/// `tag` nor a `text` field.
pub fn parse_dom(json: &str) -> serde_json::Result<DomTree> {
    let nodes = match serde_json::from_str(json)? {
        JsonDocument::Many(nodes) => nodes,
        JsonDocument::One(node) => vec![node],
    };

    let mut tree = DomTree::new();
    for node in &nodes {
        append(&mut tree, NodeId::ROOT, node);
    }
    Ok(tree)
}

fn append(tree: &mut DomTree, parent: NodeId, node: &JsonNode) {
    match node {
        JsonNode::Text { text } => {
            let _ = tree.create_text(parent, text);
        }
        JsonNode::Element {
            tag,
            attrs,
            children,
        } => {
            let attrs: Vec<(&str, &str)> = attrs
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            let id = tree.create_element(parent, tag, &attrs);
            for child in children {
                append(tree, id, child);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_root() {
        let tree = parse_dom(
            r#"{ "tag": "span", "attrs": { "id": "x" }, "children": [ { "text": "hello" } ] }"#,
        )
        .unwrap();
        assert_eq!(
            tree.dump(tree.root()),
            "document\n  tag: span id=\"x\"\n    value: hello\n"
        );
    }

    #[test]
    fn test_array_root() {
        let tree = parse_dom(r#"[ { "text": "a" }, { "tag": "p" } ]"#).unwrap();
        assert_eq!(tree.children(tree.root()).len(), 2);
        assert_eq!(tree.document_element(), Some(NodeId(2)));
    }

    #[test]
    fn test_rejects_unknown_shapes() {
        assert!(parse_dom(r#"{ "name": "p" }"#).is_err());
        assert!(parse_dom("not json").is_err());
    }
}
