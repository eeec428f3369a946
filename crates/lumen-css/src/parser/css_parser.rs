//! CSS Parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
//!
//! A single-pass recursive-descent parser over the source text. It recognizes
//! rule-sets, `@media` blocks and declaration lists, and skips everything else
//! it does not understand instead of failing.
//!
//! Selectors are stored as raw strings; they are interpreted at match time by
//! [`crate::selector`].

use std::slice;

use lumen_common::warning::warn_once;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::shorthand::Shorthand;
use crate::values::{is_whitespace, split, strip_comments, trim};

/// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
///
/// The declarations of one rule, keyed by property name.
///
/// Keys are unique and keep the position of their first insertion; writing
/// an existing key replaces its value in place (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    entries: Vec<(String, String)>,
}

impl Declarations {
    /// An empty declaration block.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set `name` to `value`, replacing any earlier value for `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// The value declared for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether a value is declared for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of distinct properties declared.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the block declares nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, (String, String)> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Declarations {
    type Item = &'a (String, String);
    type IntoIter = slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Declarations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
///
/// One rule-set: a selector list and its declaration block, plus the raw
/// condition of the `@media` block it was nested in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// Selector strings in source order, trimmed. Duplicates are kept.
    pub selectors: Vec<String>,
    /// The rule's declarations, shorthands already expanded.
    pub declarations: Declarations,
    /// The enclosing `@media` prelude, verbatim apart from trimming.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_query: Option<String>,
}

/// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
///
/// A parsed CSS stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stylesheet {
    /// The rules in source order.
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the stylesheet has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in source order.
    pub fn iter(&self) -> slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a Stylesheet {
    type Item = &'a Rule;
    type IntoIter = slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Parse a complete stylesheet. Never fails; see [`CssParser`].
#[must_use]
pub fn parse(text: &str) -> Stylesheet {
    CssParser::new(text).parse_stylesheet()
}

/// Parse the body of a declaration block, such as a `style` attribute.
#[must_use]
pub fn parse_declarations(text: &str) -> Declarations {
    CssParser::new(text).parse_declaration_list()
}

/// CSS parser
///
/// Works directly on the source text. Recovery is always local: a malformed
/// declaration, rule or at-rule is dropped with a warning and parsing
/// continues after it.
pub struct CssParser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> CssParser<'a> {
    /// Create a new parser over `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
    ///
    /// "To parse a stylesheet from input..."
    pub fn parse_stylesheet(&mut self) -> Stylesheet {
        // "Consume a list of rules from input, with the top-level flag set."
        let rules = self.consume_list_of_rules(None);
        Stylesheet { rules }
    }

    /// [§ 5.3.6 Parse a list of declarations](https://www.w3.org/TR/css-syntax-3/#parse-list-of-declarations)
    ///
    /// Parse declarations from a style attribute or similar.
    pub fn parse_declaration_list(&mut self) -> Declarations {
        self.consume_list_of_declarations(false)
    }

    /// [§ 5.4.1 Consume a list of rules](https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules)
    ///
    /// At the top level `media` is `None`. Inside an `@media` block it holds
    /// the block's prelude and the list ends at the closing `}`.
    fn consume_list_of_rules(&mut self, media: Option<&str>) -> Vec<Rule> {
        // "Create an initially empty list of rules."
        let mut rules = Vec::new();
        let top_level = media.is_none();

        loop {
            self.skip_whitespace_and_comments();
            match self.peek() {
                // "<EOF-token>"
                // "Return the list of rules."
                None => {
                    if !top_level {
                        warn_once("CSS", "unterminated @media block");
                    }
                    return rules;
                }

                Some('}') => {
                    let _ = self.consume();
                    if !top_level {
                        return rules;
                    }
                    warn_once("CSS", "ignoring unexpected '}'");
                }

                // "<at-keyword-token>"
                Some('@') => {
                    if top_level {
                        rules.extend(self.consume_at_rule());
                    } else {
                        let name = self.consume_at_keyword();
                        warn_once(
                            "CSS",
                            &format!("skipping nested @{name} inside @media"),
                        );
                        self.skip_at_rule_body();
                    }
                }

                // "anything else"
                // "Reconsume the current input token. Consume a qualified rule. If
                // anything is returned, append it to the list of rules."
                Some(_) => {
                    if let Some(rule) = self.consume_qualified_rule(media) {
                        rules.push(rule);
                    }
                }
            }
        }
    }

    /// [§ 5.4.2 Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-at-rule)
    ///
    /// Only `@media` produces rules. Every other at-rule is skipped.
    fn consume_at_rule(&mut self) -> Vec<Rule> {
        let name = self.consume_at_keyword();

        if !name.eq_ignore_ascii_case("media") {
            warn_once("CSS", &format!("skipping unsupported at-rule @{name}"));
            self.skip_at_rule_body();
            return Vec::new();
        }

        let prelude = trim(self.consume_until(&['{', ';', '}']));
        match self.peek() {
            // "<{-token>"
            // "Consume a simple block and assign it to the at-rule's block."
            Some('{') => {
                let _ = self.consume();
                self.consume_list_of_rules(Some(prelude))
            }
            // "<semicolon-token>" or "<EOF-token>": an @media without a block.
            _ => {
                warn_once("CSS", &format!("@media {prelude} has no block"));
                if self.peek() == Some(';') {
                    let _ = self.consume();
                }
                Vec::new()
            }
        }
    }

    /// Consume `@` and the identifier after it.
    fn consume_at_keyword(&mut self) -> &'a str {
        let _ = self.consume(); // @
        let start = self.position;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            let _ = self.consume();
        }
        &self.input[start..self.position]
    }

    /// Skip an at-rule's prelude and then either its `;` or its whole block.
    fn skip_at_rule_body(&mut self) {
        let _ = self.consume_until(&['{', ';', '}']);
        match self.peek() {
            Some(';') => {
                let _ = self.consume();
            }
            Some('{') => self.skip_block(),
            // A `}` here closes the enclosing block, so leave it alone.
            _ => {}
        }
    }

    /// Skip a `{ ... }` block, including any blocks nested inside it.
    fn skip_block(&mut self) {
        let mut depth = 0usize;
        loop {
            let _ = self.consume_until(&['{', '}']);
            match self.consume() {
                Some('{') => depth += 1,
                Some('}') => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                _ => return,
            }
        }
    }

    /// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
    fn consume_qualified_rule(&mut self, media: Option<&str>) -> Option<Rule> {
        let prelude = self.consume_until(&['{', '}']);

        if self.peek() != Some('{') {
            // "<EOF-token>"
            // "This is a parse error. Return nothing."
            warn_once(
                "CSS",
                &format!("dropping selector '{}' without a block", trim(prelude)),
            );
            return None;
        }
        let _ = self.consume(); // {

        // [§ 5.1 Selector Lists](https://www.w3.org/TR/selectors-4/#selector-list)
        // "A selector list is a comma-separated list of selectors"
        let prelude = strip_comments(prelude);
        let selectors: Vec<String> = split(&prelude, ",")
            .into_iter()
            .map(trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let declarations = self.consume_list_of_declarations(true);

        if selectors.is_empty() {
            warn_once("CSS", "dropping declaration block without a selector");
            return None;
        }

        Some(Rule {
            selectors,
            declarations,
            media_query: media.map(str::to_string),
        })
    }

    /// [§ 5.4.5 Consume a list of declarations](https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations)
    ///
    /// In a block, consumes up to and including the closing `}`.
    fn consume_list_of_declarations(&mut self, in_block: bool) -> Declarations {
        let mut declarations = Declarations::new();

        loop {
            self.skip_whitespace_and_comments();
            match self.peek() {
                // "<EOF-token>"
                // "Return the list of declarations."
                None => {
                    if in_block {
                        warn_once("CSS", "unterminated declaration block");
                    }
                    return declarations;
                }

                Some('}') => {
                    let _ = self.consume();
                    return declarations;
                }

                // "<semicolon-token>"
                // "Do nothing."
                Some(';') => {
                    let _ = self.consume();
                }

                Some(_) => self.consume_declaration(&mut declarations),
            }
        }
    }

    /// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
    ///
    /// Parses one `name: value` pair and stores it, expanding shorthands.
    fn consume_declaration(&mut self, declarations: &mut Declarations) {
        let raw = strip_comments(self.consume_until(&[';', '}']));

        // "If the next input token is anything other than a <colon-token>, this is a parse error.
        // Return nothing."
        let Some((name, value)) = raw.split_once(':') else {
            warn_once(
                "CSS",
                &format!("dropping declaration '{}' without ':'", trim(&raw)),
            );
            return;
        };
        // Property names are ASCII case-insensitive; store them lowercased so
        // `PADDING` and `padding-top` write to the same keys.
        let name = trim(name).to_ascii_lowercase();
        let value = trim(value);
        if name.is_empty() || value.is_empty() {
            warn_once(
                "CSS",
                &format!("dropping incomplete declaration '{}'", trim(&raw)),
            );
            return;
        }

        let Some(shorthand) = Shorthand::from_name(&name) else {
            declarations.insert(name, value);
            return;
        };

        match shorthand.expand(value) {
            Ok(longhands) => {
                for (longhand, value) in longhands {
                    declarations.insert(longhand, value);
                }
            }
            Err(err) => warn_once("CSS", &format!("dropping declaration: {err}")),
        }
    }

    /// Consume input up to, not including, the first of `stops` found outside
    /// strings, comments and parentheses. Returns the consumed text.
    fn consume_until(&mut self, stops: &[char]) -> &'a str {
        let start = self.position;
        let mut paren_depth = 0usize;

        while let Some(c) = self.peek() {
            if paren_depth == 0 && stops.contains(&c) {
                break;
            }
            if self.at_comment_start() {
                self.skip_comment();
                continue;
            }
            let _ = self.consume();
            match c {
                '"' | '\'' => self.skip_string(c),
                '(' => paren_depth += 1,
                ')' => paren_depth = paren_depth.saturating_sub(1),
                _ => {}
            }
        }

        &self.input[start..self.position]
    }

    /// [§ 4.3.5 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    ///
    /// The opening quote has already been consumed.
    fn skip_string(&mut self, ending: char) {
        while let Some(c) = self.consume() {
            match c {
                c if c == ending => return,
                // "This is a parse error. Reconsume the current input code point,
                // create a <bad-string-token>, and return it."
                '\n' => return,
                '\\' => {
                    let _ = self.consume();
                }
                _ => {}
            }
        }
    }

    /// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    fn skip_comment(&mut self) {
        self.position += 2; // /*
        if let Some(end) = self.input[self.position..].find("*/") {
            self.position += end + 2;
        } else {
            // "If the preceding paragraph ended by consuming an EOF code point,
            // this is a parse error."
            warn_once("CSS", "unterminated comment");
            self.position = self.input.len();
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(is_whitespace) {
                let _ = self.consume();
            }
            if !self.at_comment_start() {
                return;
            }
            self.skip_comment();
        }
    }

    fn at_comment_start(&self) -> bool {
        self.input[self.position..].starts_with("/*")
    }

    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_until_respects_nesting() {
        let mut parser = CssParser::new("url(\"a;b\") x; rest");
        assert_eq!(parser.consume_until(&[';']), "url(\"a;b\") x");
        assert_eq!(parser.peek(), Some(';'));
    }

    #[test]
    fn test_declarations_overwrite_in_place() {
        let mut declarations = Declarations::new();
        declarations.insert("color", "red");
        declarations.insert("width", "1px");
        declarations.insert("color", "blue");

        let entries: Vec<_> = declarations
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
            .collect();
        assert_eq!(entries, vec![("color", "blue"), ("width", "1px")]);
    }
}
