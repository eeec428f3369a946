//! CSS parser module.

/// CSS parser implementation per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod css_parser;

/// Expansion of `padding` and `margin` into longhands.
pub mod shorthand;

pub use css_parser::{CssParser, Declarations, Rule, Stylesheet, parse, parse_declarations};
pub use shorthand::Shorthand;
