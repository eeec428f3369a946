//! Integration tests for CSS selector matching.

use std::collections::HashMap;

use lumen_css::selector::{BaseSelector, PseudoClass, Selector, is_match};
use lumen_dom::ElementData;

fn make_element(tag: &str, id: Option<&str>, classes: &[&str]) -> ElementData {
    let mut attrs = HashMap::new();
    if let Some(id_val) = id {
        let _ = attrs.insert("id".to_string(), id_val.to_string());
    }
    if !classes.is_empty() {
        let _ = attrs.insert("class".to_string(), classes.join(" "));
    }
    ElementData {
        tag_name: tag.to_string(),
        attrs,
    }
}

fn make_link(tag: &str) -> ElementData {
    ElementData::new(tag, &[("href", "https://example.com")])
}

#[test]
fn test_universal_matches_everything() {
    assert!(is_match(&make_element("div", None, &[]), "*"));
    assert!(is_match(&make_element("p", Some("x"), &["a", "b"]), "*"));
}

#[test]
fn test_type_selector() {
    let element = make_element("span", None, &[]);
    assert!(is_match(&element, "span"));
    assert!(!is_match(&element, "div"));
    assert!(!is_match(&element, "SPAN"));
}

#[test]
fn test_class_selector_matches_tokens() {
    let element = make_element("div", None, &["first", "second"]);
    assert!(is_match(&element, ".first"));
    assert!(is_match(&element, ".second"));
    assert!(!is_match(&element, ".fir"));
    assert!(!is_match(&element, ".first second"));
}

#[test]
fn test_class_selector_is_not_a_substring_match() {
    let element = make_element("div", None, &["clsx"]);
    assert!(!is_match(&element, ".cls"));
}

#[test]
fn test_class_attribute_whitespace() {
    let element = ElementData::new("p", &[("class", "\tone\n  two ")]);
    assert!(is_match(&element, ".one"));
    assert!(is_match(&element, ".two"));
    assert!(!is_match(&element, "."));
}

#[test]
fn test_id_selector() {
    let element = make_element("div", Some("main"), &[]);
    assert!(is_match(&element, "#main"));
    assert!(!is_match(&element, "#mai"));
    assert!(!is_match(&make_element("div", None, &[]), "#main"));
}

#[test]
fn test_link_pseudo_classes() {
    for selector in [":link", ":any-link", "a:link", "a:any-link", "*:link"] {
        assert!(is_match(&make_link("a"), selector), "{selector}");
    }
    assert!(is_match(&make_link("area"), ":link"));
    assert!(!is_match(&make_link("area"), "a:link"));
}

#[test]
fn test_link_requires_href() {
    let anchor = make_element("a", None, &[]);
    assert!(!is_match(&anchor, ":link"));
    assert!(!is_match(&anchor, "a:any-link"));
    assert!(is_match(&anchor, "a"));
}

#[test]
fn test_link_requires_anchor_or_area() {
    assert!(!is_match(&make_link("link"), ":link"));
    assert!(!is_match(&make_link("div"), ":any-link"));
}

#[test]
fn test_other_pseudo_classes_never_match() {
    let anchor = make_link("a");
    assert!(!is_match(&anchor, "a:hover"));
    assert!(!is_match(&anchor, "a:visited"));
    assert!(!is_match(&anchor, ":first-child"));
    assert!(!is_match(&anchor, "a::before"));
}

#[test]
fn test_trailing_colon_is_ignored() {
    assert!(is_match(&make_element("p", None, &[]), "p:"));
}

#[test]
fn test_combinators_are_not_supported() {
    let element = make_element("p", None, &[]);
    assert!(!is_match(&element, "div p"));
    assert!(!is_match(&element, "div > p"));
    assert!(!is_match(&element, "p.intro"));
}

#[test]
fn test_selector_parse() {
    assert_eq!(
        Selector::parse(".a"),
        Selector {
            base: Some(BaseSelector::Class("a")),
            pseudo: None,
        }
    );
    assert_eq!(
        Selector::parse(":link"),
        Selector {
            base: None,
            pseudo: Some(PseudoClass::Link),
        }
    );
    assert_eq!(
        Selector::parse("li:hover"),
        Selector {
            base: Some(BaseSelector::Type("li")),
            pseudo: Some(PseudoClass::Unsupported("hover")),
        }
    );
    assert_eq!(Selector::parse("*").base, Some(BaseSelector::Universal));
}
