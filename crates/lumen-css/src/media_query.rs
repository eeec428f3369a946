//! Media queries per [Media Queries Level 4](https://www.w3.org/TR/mediaqueries-4/).
//!
//! Only a narrow subset is understood: a single `<media-in-parens>` holding a
//! plain width feature (`(min-width: 900px)`, `(max-width: 600px)`,
//! `(width: 0)`). [`matches_condition`] layers media types, `and`, `not`,
//! `only` and comma-separated lists on top of that so that whole `@media`
//! preludes can be evaluated.

use crate::error::MediaQueryError;
use crate::values::{is_whitespace, parse_number_prefix, strip_comments, trim};

/// The rendering environment media queries are evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Context {
    /// Viewport width in CSS pixels.
    pub window_width: i32,
}

impl Context {
    /// A context with the given viewport width.
    #[must_use]
    pub const fn with_window_width(window_width: i32) -> Self {
        Self { window_width }
    }
}

/// [§ 4.1 Width](https://www.w3.org/TR/mediaqueries-4/#width)
///
/// An inclusive range of viewport widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Width {
    /// Smallest matching width.
    pub min: i32,
    /// Largest matching width.
    pub max: i32,
}

impl Default for Width {
    fn default() -> Self {
        Self {
            min: 0,
            max: i32::MAX,
        }
    }
}

impl Width {
    /// True iff `min <= ctx.window_width <= max`.
    #[must_use]
    pub const fn evaluate(&self, ctx: &Context) -> bool {
        self.min <= ctx.window_width && ctx.window_width <= self.max
    }
}

/// The media features this engine knows how to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// `min-width`, `max-width` or `width`.
    Width(Width),
}

/// A parsed, evaluable media feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaQuery {
    /// The feature condition.
    pub query: Query,
}

impl MediaQuery {
    /// [§ 3 Syntax](https://w3c.github.io/csswg-drafts/mediaqueries/#mq-syntax)
    ///
    /// Parse a `<media-in-parens>` holding a plain width feature.
    ///
    /// Returns `None` for anything outside the supported subset.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::try_parse(s).ok()
    }

    /// Like [`MediaQuery::parse`], reporting why parsing failed.
    ///
    /// # Errors
    ///
    /// Returns a [`MediaQueryError`] describing the first unsupported or
    /// malformed part of the input.
    pub fn try_parse(s: &str) -> Result<Self, MediaQueryError> {
        // STEP 1: We only handle media-in-parens right now.
        let inner = s
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .ok_or(MediaQueryError::MissingParens)?;

        // STEP 2: ...and only mf-plain: `<mf-name> : <mf-value>`.
        let inner = trim(inner);
        let name_end = inner
            .find([' ', ':'])
            .ok_or(MediaQueryError::MissingFeatureName)?;
        let (feature_name, rest) = inner.split_at(name_end);

        let value_str = rest.trim_start_matches([' ', ':']);
        if value_str.is_empty() {
            return Err(MediaQueryError::MissingValue);
        }

        // STEP 3: A number, then a unit. Zero may be unitless; anything else
        // must be in px.
        let (value, unit) = parse_number_prefix(value_str)
            .ok_or_else(|| MediaQueryError::InvalidNumber(value_str.to_string()))?;
        if value != 0.0 {
            if unit.is_empty() {
                return Err(MediaQueryError::MissingUnit(value));
            }
            if unit != "px" {
                return Err(MediaQueryError::UnsupportedUnit(unit.to_string()));
            }
        }

        // STEP 4: ...and only the width features.
        let px = to_px(value);
        let width = match feature_name {
            "min-width" => Width {
                min: px,
                ..Width::default()
            },
            "max-width" => Width {
                max: px,
                ..Width::default()
            },
            "width" => Width { min: px, max: px },
            other => return Err(MediaQueryError::UnsupportedFeature(other.to_string())),
        };

        Ok(Self {
            query: Query::Width(width),
        })
    }

    /// Evaluate the condition against `ctx`. Pure and deterministic.
    #[must_use]
    pub const fn evaluate(&self, ctx: &Context) -> bool {
        match &self.query {
            Query::Width(width) => width.evaluate(ctx),
        }
    }
}

/// Float-to-int casts saturate and truncate toward zero.
#[allow(clippy::cast_possible_truncation)]
const fn to_px(value: f32) -> i32 {
    value as i32
}

/// [§ 2 Media Queries](https://www.w3.org/TR/mediaqueries-4/#media)
///
/// Evaluate a raw `@media` prelude such as `screen and (min-width: 900px)`.
///
/// - A comma-separated list matches if any entry matches.
/// - An entry is `[not | only]? <media-type>? [and <media-in-parens>]*`, or
///   starts directly with a `<media-in-parens>`.
/// - `all` and `screen` match, `print` and other media types do not.
/// - Every feature must parse with [`MediaQuery::parse`].
/// - Comments count as whitespace.
/// - An empty prelude matches.
///
/// Returns `None` when the prelude uses syntax outside this subset and no
/// list entry matched. Callers decide what an unsupported condition means.
#[must_use]
pub fn matches_condition(raw: &str, ctx: &Context) -> Option<bool> {
    let raw = strip_comments(raw);
    let raw = trim(&raw);
    if raw.is_empty() {
        return Some(true);
    }

    let mut unsupported = false;
    for entry in raw.split(',') {
        match evaluate_entry(trim(entry), ctx) {
            Some(true) => return Some(true),
            Some(false) => {}
            None => unsupported = true,
        }
    }

    if unsupported { None } else { Some(false) }
}

/// A lexical piece of a media query list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part<'a> {
    /// A bare identifier such as `screen`, `and` or `not`.
    Word(&'a str),
    /// A parenthesized block, parens included.
    Parens(&'a str),
}

/// Split an entry into words and balanced parenthesized blocks.
fn split_parts(entry: &str) -> Option<Vec<Part<'_>>> {
    let mut parts = Vec::new();
    let mut rest = entry;

    loop {
        rest = rest.trim_start_matches(is_whitespace);
        let Some(first) = rest.chars().next() else {
            return Some(parts);
        };

        let end = if first == '(' {
            let mut depth = 0usize;
            let mut end = None;
            for (i, c) in rest.char_indices() {
                match c {
                    '(' => depth += 1,
                    ')' => {
                        depth -= 1;
                        if depth == 0 {
                            end = Some(i + 1);
                            break;
                        }
                    }
                    _ => {}
                }
            }
            let end = end?;
            parts.push(Part::Parens(&rest[..end]));
            end
        } else {
            let end = rest
                .find(|c: char| is_whitespace(c) || c == '(')
                .unwrap_or(rest.len());
            parts.push(Part::Word(&rest[..end]));
            end
        };
        rest = &rest[end..];
    }
}

fn evaluate_entry(entry: &str, ctx: &Context) -> Option<bool> {
    let parts = split_parts(entry)?;
    let mut parts = parts.iter().peekable();

    // STEP 1: Optional modifier.
    let negate = match parts.peek() {
        Some(Part::Word(w)) if w.eq_ignore_ascii_case("not") => {
            let _ = parts.next();
            true
        }
        Some(Part::Word(w)) if w.eq_ignore_ascii_case("only") => {
            let _ = parts.next();
            false
        }
        _ => false,
    };

    // STEP 2: Optional media type. Without one, a feature must come first.
    let mut result = true;
    let mut expect_and = false;
    if let Some(Part::Word(media_type)) = parts.peek() {
        if media_type.eq_ignore_ascii_case("and") {
            return None;
        }
        result = ["all", "screen"]
            .iter()
            .any(|t| media_type.eq_ignore_ascii_case(t));
        let _ = parts.next();
        expect_and = true;
    }

    // STEP 3: `and`-joined features; all of them must hold.
    for part in parts {
        if expect_and {
            match part {
                Part::Word(w) if w.eq_ignore_ascii_case("and") => {}
                _ => return None,
            }
            expect_and = false;
            continue;
        }
        let Part::Parens(feature) = part else {
            return None;
        };
        result &= MediaQuery::parse(feature)?.evaluate(ctx);
        expect_and = true;
    }

    // A dangling `and`, or a bare `not`/`only`, is malformed.
    if !expect_and {
        return None;
    }

    Some(result != negate)
}
