//! Lexical helpers shared by the stylesheet parser and the media query engine.
//!
//! Everything here works on borrowed `&str` slices. Only
//! [`strip_comments`] allocates, and only when there is a comment to remove.

use std::borrow::Cow;

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#whitespace)
///
/// "whitespace: A newline, U+0009 CHARACTER TABULATION, or U+0020 SPACE."
#[must_use]
pub const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

/// Trim CSS whitespace from both ends.
#[must_use]
pub fn trim(s: &str) -> &str {
    s.trim_matches(is_whitespace)
}

/// Split on every occurrence of `delim`, keeping empty pieces.
#[must_use]
pub fn split<'a>(s: &'a str, delim: &str) -> Vec<&'a str> {
    s.split(delim).collect()
}

/// Split on the first occurrence of `delim`.
///
/// When the delimiter is absent the whole input is returned as the first
/// half and the second half is empty.
#[must_use]
pub fn split_once<'a>(s: &'a str, delim: &str) -> (&'a str, &'a str) {
    s.split_once(delim).unwrap_or((s, ""))
}

/// Split on runs of CSS whitespace, dropping empty pieces.
#[must_use]
pub fn split_whitespace_tokens(s: &str) -> Vec<&str> {
    s.split(is_whitespace).filter(|t| !t.is_empty()).collect()
}

/// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
///
/// Remove `/* ... */` comments from a slice of source text. Each comment is
/// replaced by a single space so the tokens on either side stay separate. An
/// unterminated comment runs to the end of the input.
#[must_use]
pub fn strip_comments(text: &str) -> Cow<'_, str> {
    if !text.contains("/*") {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        out.push(' ');
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => rest = "",
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// [§ 4.3.12 Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
///
/// Parse the longest numeric prefix of `s` and return it together with the
/// rest of the input (normally a unit such as `px`).
///
/// Accepted shape: `[+-]? (digits ('.' digits)? | '.' digits) ([eE] [+-]? digits)?`.
/// Returns `None` when `s` does not start with a number.
///
/// ```
/// use lumen_css::values::parse_number_prefix;
///
/// assert_eq!(parse_number_prefix("900px"), Some((900.0, "px")));
/// assert_eq!(parse_number_prefix("-1.5em"), Some((-1.5, "em")));
/// assert_eq!(parse_number_prefix("px"), None);
/// ```
#[must_use]
pub fn parse_number_prefix(s: &str) -> Option<(f32, &str)> {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    // STEP 1: Optional sign.
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    // STEP 2: Integer part, then an optional fraction. At least one digit
    // must appear in one of the two.
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return None;
    }

    // STEP 3: Exponent, only when digits follow so `1em` keeps its unit.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    let value = s[..end].parse::<f32>().ok()?;
    Some((value, &s[end..]))
}
