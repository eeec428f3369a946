//! CSS parsing, media queries, selector matching and style-tree construction
//! for the Lumen engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Parser** ([§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing))
//!   - Rule-sets and `@media` blocks
//!   - Declaration parsing, `padding` and `margin` shorthand expansion
//!   - Comment handling, skipping of other at-rules
//!
//! - **Media Queries** ([Media Queries Level 4](https://www.w3.org/TR/mediaqueries-4/))
//!   - `min-width`, `max-width` and `width` in `px`
//!   - Media types, `and`, `not`, `only` and comma lists for whole preludes
//!
//! - **CSS Selectors** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, class, ID and universal selectors
//!   - `:link` and `:any-link`
//!
//! - **Style Tree** ([CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/))
//!   - Source-order matching of rules against elements
//!   - A styled tree with the same shape as the DOM
//!
//! # Not Yet Implemented
//!
//! - Specificity and cascade origins
//! - Combinators, attribute selectors and pseudo-elements
//! - Custom properties
//! - Media features other than the viewport width

/// Parse failure reasons.
pub mod error;
/// Media queries per [Media Queries Level 4](https://www.w3.org/TR/mediaqueries-4/).
pub mod media_query;
/// CSS parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod parser;
/// Property identifiers.
pub mod property_id;
/// CSS selector parsing and matching per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod selector;
/// Style tree construction per [CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/).
pub mod style;
/// Lexical helpers for CSS text.
pub mod values;

// Re-exports for convenience
pub use error::{MediaQueryError, ShorthandError};
pub use media_query::{Context, MediaQuery, Query, Width, matches_condition};
pub use parser::{Declarations, Rule, Stylesheet, parse, parse_declarations};
pub use property_id::PropertyId;
pub use selector::is_match;
pub use style::{StyleTree, StyledNode, StyledNodeId, matching_rules, style_tree};

use lumen_dom::{DomTree, NodeId, NodeType};

/// [HTML Standard § 4.2.6 The style element](https://html.spec.whatwg.org/multipage/semantics.html#the-style-element)
///
/// Extract CSS text from all `<style>` elements in the DOM tree, in document
/// order, one element per line.
#[must_use]
pub fn extract_style_content(tree: &DomTree) -> String {
    let mut css = String::new();
    collect_style_content(tree, tree.root(), &mut css);
    css
}

/// Recursively collect CSS text from style elements.
fn collect_style_content(tree: &DomTree, id: NodeId, css: &mut String) {
    let Some(node) = tree.get(id) else { return };

    match &node.node_type {
        NodeType::Element(data) if data.tag_name.eq_ignore_ascii_case("style") => {
            for &child_id in tree.children(id) {
                if let Some(text) = tree.as_text(child_id) {
                    css.push_str(text);
                }
            }
            css.push('\n');
            return;
        }
        _ => {}
    }

    for &child_id in tree.children(id) {
        collect_style_content(tree, child_id, css);
    }
}
