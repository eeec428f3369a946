//! Lumen CLI
//!
//! Parses a stylesheet and, given a DOM, prints the styled tree. Useful for
//! checking what the parser made of a stylesheet and which rules reach which
//! elements at a given viewport width.

mod dom_json;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Parser;
use lumen_common::warning::take_warnings;
use lumen_css::extract_style_content;
use lumen_css::media_query::Context;
use lumen_css::parser::{Stylesheet, parse};
use lumen_css::style::{StyleTree, print_style_tree, style_tree};
use lumen_dom::DomTree;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Lumen: inspect CSS parsing and style resolution
#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the rules of a stylesheet
    lumen style.css

    # Parse inline CSS
    lumen --css 'body, p { padding: 1px 2px; }'

    # Style a document at a 600px wide viewport
    lumen style.css --dom page.json --width 600

    # Machine-readable output
    lumen style.css --dom page.json --json
"#)]
struct Cli {
    /// Path to a CSS file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse CSS text directly instead of a file
    #[arg(long, value_name = "CSS", conflicts_with = "path")]
    css: Option<String>,

    /// Document to style, as JSON (`{"tag", "attrs", "children"}` / `{"text"}` nodes)
    #[arg(long, value_name = "FILE")]
    dom: Option<PathBuf>,

    /// Viewport width media queries are evaluated against
    #[arg(long, default_value = "1024")]
    width: i32,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// List the distinct warnings raised while parsing and styling
    #[arg(long)]
    warnings: bool,
}

/// Everything the CLI prints in `--json` mode.
#[derive(Serialize)]
struct Report<'a> {
    stylesheet: &'a Stylesheet,
    #[serde(skip_serializing_if = "Option::is_none")]
    styled_tree: Option<&'a StyleTree<'a>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let dom = cli.dom.as_deref().map(load_dom).transpose()?;

    // STEP 1: Gather the CSS: the stylesheet argument first, then any
    // <style> elements in document order.
    let mut css = load_css(&cli)?;
    if let Some(dom) = &dom {
        css.push_str(&extract_style_content(dom));
    }
    if css.is_empty() && dom.is_none() {
        anyhow::bail!("nothing to do: pass a CSS file, --css or --dom");
    }

    // STEP 2: Parse, then style the document if there is one.
    let stylesheet = parse(&css);
    let ctx = Context::with_window_width(cli.width);
    let styled = dom
        .as_ref()
        .map(|dom| style_tree(dom, dom.root(), &stylesheet, &ctx));

    if cli.json {
        let report = Report {
            stylesheet: &stylesheet,
            styled_tree: styled.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_stylesheet(&stylesheet);
        if let (Some(dom), Some(styled)) = (&dom, &styled) {
            println!("\n{}", "=== DOM Tree ===".bold());
            print!("{}", dom.dump(dom.root()));
            println!("\n{}", format!("=== Styled Tree ({}px) ===", cli.width).bold());
            print_style_tree(styled);
        }
    }

    if cli.warnings {
        let warnings = take_warnings();
        eprintln!("{} warning(s)", warnings.len());
        for warning in warnings {
            eprintln!("  {}", warning.yellow());
        }
    }

    Ok(())
}

fn load_css(cli: &Cli) -> Result<String> {
    match (&cli.css, &cli.path) {
        (Some(css), _) => Ok(css.clone()),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read stylesheet {}", path.display())),
        (None, None) => Ok(String::new()),
    }
}

fn load_dom(path: &Path) -> Result<DomTree> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read DOM {}", path.display()))?;
    dom_json::parse_dom(&json).with_context(|| format!("invalid DOM JSON in {}", path.display()))
}

/// Print rules in source order, grouped under their `@media` condition.
fn print_stylesheet(stylesheet: &Stylesheet) {
    println!(
        "{}",
        format!("=== Stylesheet ({} rules) ===", stylesheet.len()).bold()
    );

    for rule in stylesheet {
        let indent = if let Some(condition) = &rule.media_query {
            println!("{} {condition}", "@media".cyan());
            "  "
        } else {
            ""
        };
        println!("{indent}{} {{", rule.selectors.join(", ").green());
        for (name, value) in &rule.declarations {
            println!("{indent}  {name}: {value};");
        }
        println!("{indent}}}");
    }
}
