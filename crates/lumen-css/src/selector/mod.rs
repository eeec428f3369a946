//! CSS Selector parsing and matching
//!
//! This module implements the subset of
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/) the style engine
//! understands: one compound selector made of an optional type, class, id or
//! universal selector and an optional pseudo-class. There are no combinators,
//! so a selector is matched against a single element without looking at its
//! ancestors or siblings.
//!
//! Rules store their selectors as raw strings. They are parsed here, lazily,
//! each time they are matched.

use lumen_dom::ElementData;

use crate::values::split_once;

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
///
/// The part of a selector before any pseudo-class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseSelector<'a> {
    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    /// "The universal selector is a single asterisk (*) and represents the
    /// qualified name of any element type."
    Universal,

    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// "A type selector is the name of a document language element type,
    /// and represents an instance of that element type in the document tree."
    ///
    /// Compared to the tag name exactly.
    Type(&'a str),

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    /// "The class selector is given as a full stop (. U+002E) immediately
    /// followed by an identifier."
    Class(&'a str),

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    /// "An ID selector is a hash (#, U+0023) immediately followed by the
    /// ID value, which is an identifier."
    Id(&'a str),
}

/// [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoClass<'a> {
    /// [§ 8.2 :link](https://www.w3.org/TR/selectors-4/#the-link-pseudo)
    /// "The :link pseudo-class applies to links that have not yet been visited."
    ///
    /// Nothing is ever visited here, so this is the same as `:any-link`.
    Link,

    /// [§ 8.1 :any-link](https://www.w3.org/TR/selectors-4/#the-any-link-pseudo)
    /// "The :any-link pseudo-class represents an element that acts as the
    /// source anchor of a hyperlink."
    AnyLink,

    /// Any other pseudo-class or pseudo-element, by name. Never matches.
    ///
    /// Examples: `hover`, `first-child`, `:before` (from `::before`)
    Unsupported(&'a str),
}

impl<'a> PseudoClass<'a> {
    fn from_name(name: &'a str) -> Self {
        match name {
            "link" => Self::Link,
            "any-link" => Self::AnyLink,
            other => Self::Unsupported(other),
        }
    }
}

/// A selector split into its base and pseudo-class parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector<'a> {
    /// `None` when the selector is only a pseudo-class, as in `:link`.
    pub base: Option<BaseSelector<'a>>,
    /// The text after the first `:`, if any. A trailing `:` is ignored.
    pub pseudo: Option<PseudoClass<'a>>,
}

impl<'a> Selector<'a> {
    /// Split a raw selector into its parts. Never fails: text that is not a
    /// universal, class or id selector is taken as a type selector.
    #[must_use]
    pub fn parse(selector: &'a str) -> Self {
        let (base, pseudo) = split_once(selector, ":");
        let pseudo = (!pseudo.is_empty()).then(|| PseudoClass::from_name(pseudo));

        let base = if base.is_empty() {
            None
        } else if base == "*" {
            Some(BaseSelector::Universal)
        } else if let Some(class) = base.strip_prefix('.') {
            Some(BaseSelector::Class(class))
        } else if let Some(id) = base.strip_prefix('#') {
            Some(BaseSelector::Id(id))
        } else {
            Some(BaseSelector::Type(base))
        };

        Self { base, pseudo }
    }

    /// [§ 4.1 Selector Matching](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element)
    /// "A selector is said to match an element when..."
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self.pseudo {
            None => {}
            Some(PseudoClass::Link | PseudoClass::AnyLink) => {
                if !is_link(element) {
                    return false;
                }
                if self.base.is_none() {
                    return true;
                }
            }
            Some(PseudoClass::Unsupported(_)) => return false,
        }

        match self.base {
            None => false,
            Some(BaseSelector::Universal) => true,
            Some(BaseSelector::Type(name)) => element.tag_name == name,
            // Token match, not substring.
            Some(BaseSelector::Class(name)) => element.classes().any(|class| class == name),
            Some(BaseSelector::Id(id)) => element.id() == Some(id),
        }
    }
}

/// An `<a>` or `<area>` element with an `href` attribute.
fn is_link(element: &ElementData) -> bool {
    matches!(element.tag_name.as_str(), "a" | "area") && element.has_attribute("href")
}

/// Whether `selector` matches `element`.
///
/// ```
/// use lumen_css::selector::is_match;
/// use lumen_dom::ElementData;
///
/// let link = ElementData::new("a", &[("href", "/"), ("class", "nav big")]);
/// assert!(is_match(&link, "a"));
/// assert!(is_match(&link, ".big"));
/// assert!(is_match(&link, ":link"));
/// assert!(!is_match(&link, "a:hover"));
/// ```
#[must_use]
pub fn is_match(element: &ElementData, selector: &str) -> bool {
    Selector::parse(selector).matches(element)
}
