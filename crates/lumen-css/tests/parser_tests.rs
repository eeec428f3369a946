//! Integration tests for the CSS parser.

use lumen_css::parser::{Rule, parse, parse_declarations};

fn only_rule(css: &str) -> Rule {
    let stylesheet = parse(css);
    assert_eq!(stylesheet.len(), 1, "expected exactly one rule in {css:?}");
    stylesheet.rules.into_iter().next().unwrap()
}

fn padding(rule: &Rule) -> [&str; 4] {
    let side = |name| rule.declarations.get(name).unwrap();
    [
        side("padding-top"),
        side("padding-right"),
        side("padding-bottom"),
        side("padding-left"),
    ]
}

#[test]
fn test_simple_rule() {
    let body = only_rule("body { width: 50px; }");
    assert_eq!(body.selectors, vec!["body"]);
    assert_eq!(body.declarations.len(), 1);
    assert_eq!(body.declarations.get("width"), Some("50px"));
    assert_eq!(body.media_query, None);
}

#[test]
fn test_minified() {
    let stylesheet = parse("body{width:50px;font:inherit}head,p{display:none}");
    assert_eq!(stylesheet.len(), 2);

    let first = &stylesheet.rules[0];
    assert_eq!(first.selectors, vec!["body"]);
    assert_eq!(first.declarations.len(), 2);
    assert_eq!(first.declarations.get("width"), Some("50px"));
    assert_eq!(first.declarations.get("font"), Some("inherit"));

    let second = &stylesheet.rules[1];
    assert_eq!(second.selectors, vec!["head", "p"]);
    assert_eq!(second.declarations.len(), 1);
    assert_eq!(second.declarations.get("display"), Some("none"));
}

#[test]
fn test_multiple_rules() {
    let stylesheet = parse("body { width: 50px; }\np { font-size: 8em; }");
    assert_eq!(stylesheet.len(), 2);
    assert_eq!(stylesheet.rules[0].selectors, vec!["body"]);
    assert_eq!(stylesheet.rules[0].declarations.get("width"), Some("50px"));
    assert_eq!(stylesheet.rules[1].selectors, vec!["p"]);
    assert_eq!(stylesheet.rules[1].declarations.get("font-size"), Some("8em"));
}

#[test]
fn test_multiple_selectors() {
    let rule = only_rule("body, p { width: 50px; }");
    assert_eq!(rule.selectors, vec!["body", "p"]);
    assert_eq!(rule.declarations.get("width"), Some("50px"));
}

#[test]
fn test_duplicate_selectors_are_kept() {
    let rule = only_rule("p, p , ,div{color:red}");
    assert_eq!(rule.selectors, vec!["p", "p", "div"]);
}

#[test]
fn test_multiple_declarations() {
    let rule = only_rule("body { width: 50px; height: 300px; }");
    assert_eq!(rule.declarations.len(), 2);
    assert_eq!(rule.declarations.get("width"), Some("50px"));
    assert_eq!(rule.declarations.get("height"), Some("300px"));
}

#[test]
fn test_class_and_id_selectors_stay_raw() {
    assert_eq!(only_rule(".cls { width: 50px; }").selectors, vec![".cls"]);
    assert_eq!(only_rule("#cls { width: 50px; }").selectors, vec!["#cls"]);
    assert_eq!(only_rule("a:link { color: blue; }").selectors, vec!["a:link"]);
}

#[test]
fn test_empty_rule() {
    let body = only_rule("body {}");
    assert_eq!(body.selectors, vec!["body"]);
    assert!(body.declarations.is_empty());
}

#[test]
fn test_no_rules() {
    assert!(parse("").is_empty());
    assert!(parse("  \n\t ").is_empty());
}

#[test]
fn test_trailing_semicolon_is_optional() {
    let rule = only_rule("p { color: red; width: 1px }");
    assert_eq!(rule.declarations.get("width"), Some("1px"));
}

#[test]
fn test_media_query() {
    let stylesheet = parse(
        "@media screen and (min-width: 900px) {\n\
         article { width: 50px; }\n\
         p { font-size: 9em; }\n\
         }\n\
         a { background-color: indigo; }",
    );
    assert_eq!(stylesheet.len(), 3);

    let article = &stylesheet.rules[0];
    assert_eq!(article.selectors, vec!["article"]);
    assert_eq!(article.declarations.get("width"), Some("50px"));
    assert_eq!(
        article.media_query.as_deref(),
        Some("screen and (min-width: 900px)")
    );

    let p = &stylesheet.rules[1];
    assert_eq!(p.selectors, vec!["p"]);
    assert_eq!(p.declarations.get("font-size"), Some("9em"));
    assert_eq!(p.media_query.as_deref(), Some("screen and (min-width: 900px)"));

    let a = &stylesheet.rules[2];
    assert_eq!(a.selectors, vec!["a"]);
    assert_eq!(a.declarations.get("background-color"), Some("indigo"));
    assert_eq!(a.media_query, None);
}

#[test]
fn test_media_prelude_is_kept_verbatim() {
    let rule = only_rule("@media   (max-width:600px)  and   print{p{color:red}}");
    assert_eq!(rule.media_query.as_deref(), Some("(max-width:600px)  and   print"));
}

#[test]
fn test_media_prelude_keeps_comments() {
    let rule = only_rule("@media /* c */ (min-width: 1px) { p { color: red } }");
    assert_eq!(rule.media_query.as_deref(), Some("/* c */ (min-width: 1px)"));
    assert_eq!(rule.declarations.get("color"), Some("red"));
}

#[test]
fn test_nested_media_is_skipped() {
    let stylesheet = parse(
        "@media (min-width: 1px) {\
           @media (max-width: 2px) { p { color: red; } }\
           div { color: blue; }\
         }",
    );
    assert_eq!(stylesheet.len(), 1);
    assert_eq!(stylesheet.rules[0].selectors, vec!["div"]);
    assert_eq!(stylesheet.rules[0].media_query.as_deref(), Some("(min-width: 1px)"));
}

#[test]
fn test_unsupported_at_rules_are_skipped() {
    let stylesheet = parse(
        "@charset \"utf-8\";\n\
         @import url(\"theme.css\") screen;\n\
         @font-face { font-family: Foo; src: url(foo.woff); }\n\
         @keyframes spin { from { width: 0; } to { width: 10px; } }\n\
         p { color: red; }",
    );
    assert_eq!(stylesheet.len(), 1);
    assert_eq!(stylesheet.rules[0].selectors, vec!["p"]);
    assert_eq!(stylesheet.rules[0].declarations.get("color"), Some("red"));
}

#[test]
fn test_comments_are_ignored() {
    let stylesheet = parse(
        "/* header */ body /* between */ , p { /* inside */ width: /* value */ 50px; }\n\
         /* trailing */",
    );
    assert_eq!(stylesheet.len(), 1);
    let rule = &stylesheet.rules[0];
    assert_eq!(rule.selectors, vec!["body", "p"]);
    assert_eq!(rule.declarations.len(), 1);
    assert_eq!(rule.declarations.get("width"), Some("50px"));
}

#[test]
fn test_unterminated_comment_swallows_the_rest() {
    let stylesheet = parse("p { color: red; } /* div { color: blue; }");
    assert_eq!(stylesheet.len(), 1);
    assert_eq!(stylesheet.rules[0].selectors, vec!["p"]);
}

#[test]
fn test_values_keep_strings_and_functions() {
    let rule = only_rule(
        "p { background-image: url(\"a;b.png\"); font-family: \"Foo; Bar\", serif; }",
    );
    assert_eq!(
        rule.declarations.get("background-image"),
        Some("url(\"a;b.png\")")
    );
    assert_eq!(rule.declarations.get("font-family"), Some("\"Foo; Bar\", serif"));
}

#[test]
fn test_malformed_declarations_are_dropped() {
    let rule = only_rule("p { color red; width:; : 1px; height: 2px }");
    assert_eq!(rule.declarations.len(), 1);
    assert_eq!(rule.declarations.get("height"), Some("2px"));
}

#[test]
fn test_unterminated_block_keeps_declarations() {
    let rule = only_rule("p { color: red; width: 1px");
    assert_eq!(rule.declarations.get("color"), Some("red"));
    assert_eq!(rule.declarations.get("width"), Some("1px"));
}

#[test]
fn test_selector_without_block_is_dropped() {
    let stylesheet = parse("p { color: red; } div");
    assert_eq!(stylesheet.len(), 1);
}

#[test]
fn test_block_without_selector_is_dropped() {
    let stylesheet = parse("{ color: red; } , { width: 1px; } p { height: 2px; }");
    assert_eq!(stylesheet.len(), 1);
    assert_eq!(stylesheet.rules[0].selectors, vec!["p"]);
}

#[test]
fn test_stray_closing_brace_is_ignored() {
    let stylesheet = parse("} p { color: red; }");
    assert_eq!(stylesheet.len(), 1);
    assert_eq!(stylesheet.rules[0].selectors, vec!["p"]);
}

#[test]
fn test_last_write_wins() {
    let rule = only_rule("p { color: red; width: 1px; color: blue; }");
    assert_eq!(rule.declarations.len(), 2);
    assert_eq!(rule.declarations.get("color"), Some("blue"));
    let names: Vec<&str> = rule.declarations.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["color", "width"]);
}

#[test]
fn test_property_names_are_lowercased() {
    let rule = only_rule("p { COLOR: red; Color: blue; }");
    assert_eq!(rule.declarations.len(), 1);
    assert_eq!(rule.declarations.get("color"), Some("blue"));
}

#[test]
fn test_shorthand_then_longhand_in_mixed_case() {
    let rule = only_rule("p { PADDING: 1px; Padding-Top: 2px; }");
    assert_eq!(rule.declarations.len(), 4);
    assert_eq!(padding(&rule), ["2px", "1px", "1px", "1px"]);
    assert!(!rule.declarations.contains("Padding-Top"));
}

#[test]
fn test_shorthand_padding_one_value() {
    let rule = only_rule("p { padding: 10px; }");
    assert_eq!(rule.declarations.len(), 4);
    assert_eq!(padding(&rule), ["10px", "10px", "10px", "10px"]);
}

#[test]
fn test_shorthand_padding_two_values() {
    let rule = only_rule("p { padding: 12em 36em; }");
    assert_eq!(rule.declarations.len(), 4);
    assert_eq!(padding(&rule), ["12em", "36em", "12em", "36em"]);
}

#[test]
fn test_shorthand_padding_three_values() {
    let rule = only_rule("p { padding: 12px 36px 52px; }");
    assert_eq!(rule.declarations.len(), 4);
    assert_eq!(padding(&rule), ["12px", "36px", "52px", "36px"]);
}

#[test]
fn test_shorthand_padding_four_values() {
    let rule = only_rule("p { padding: 12px 36px 52px 2px; }");
    assert_eq!(rule.declarations.len(), 4);
    assert_eq!(padding(&rule), ["12px", "36px", "52px", "2px"]);
}

#[test]
fn test_shorthand_insertion_order() {
    let rule = only_rule("p { padding: 1px 2px 3px 4px; }");
    let names: Vec<&str> = rule.declarations.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec!["padding-top", "padding-bottom", "padding-left", "padding-right"]
    );
}

#[test]
fn test_shorthand_padding_overridden() {
    let rule = only_rule(
        "p {\n\
         padding: 10px;\n\
         padding-top: 15px;\n\
         padding-left: 25px;\n\
         }\n",
    );
    assert_eq!(rule.declarations.len(), 4);
    assert_eq!(padding(&rule), ["15px", "10px", "10px", "25px"]);
}

#[test]
fn test_override_padding_with_shorthand() {
    let rule = only_rule(
        "p {\n\
         padding-bottom: 5px;\n\
         padding-left: 25px;\n\
         padding: 12px 40px;\n\
         }\n",
    );
    assert_eq!(rule.declarations.len(), 4);
    assert_eq!(padding(&rule), ["12px", "40px", "12px", "40px"]);
}

#[test]
fn test_shorthand_with_wrong_value_count_is_dropped() {
    let rule = only_rule("p { padding: 1px 2px 3px 4px 5px; padding-top: 7px; }");
    assert_eq!(rule.declarations.len(), 1);
    assert_eq!(rule.declarations.get("padding-top"), Some("7px"));
    assert!(!rule.declarations.contains("padding"));
}

#[test]
fn test_shorthand_margin() {
    let rule = only_rule("p { margin: 0 auto; }");
    assert_eq!(rule.declarations.get("margin-top"), Some("0"));
    assert_eq!(rule.declarations.get("margin-right"), Some("auto"));
    assert_eq!(rule.declarations.get("margin-bottom"), Some("0"));
    assert_eq!(rule.declarations.get("margin-left"), Some("auto"));
    assert!(!rule.declarations.contains("margin"));
}

#[test]
fn test_parse_declarations() {
    let declarations = parse_declarations("color: red; padding: 1px 2px; ; width: 3px");
    assert_eq!(declarations.len(), 6);
    assert_eq!(declarations.get("color"), Some("red"));
    assert_eq!(declarations.get("padding-left"), Some("2px"));
    assert_eq!(declarations.get("width"), Some("3px"));
}

#[test]
fn test_rules_serialize_to_json() {
    let stylesheet = parse("@media (min-width: 1px) { p { width: 1px; } } a { color: red; }");
    let json = serde_json::to_value(&stylesheet).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "rules": [
                {
                    "selectors": ["p"],
                    "declarations": { "width": "1px" },
                    "media_query": "(min-width: 1px)"
                },
                {
                    "selectors": ["a"],
                    "declarations": { "color": "red" }
                }
            ]
        })
    );
}
