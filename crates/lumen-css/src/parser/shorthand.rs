//! Box-edge shorthand expansion.
//!
//! [§ 6.2 Padding shorthand](https://www.w3.org/TR/css-box-4/#padding-shorthand)
//!
//! "The padding property is a shorthand property for setting padding-top,
//! padding-right, padding-bottom, and padding-left in a single declaration."
//!
//! `margin` follows the same one-to-four value rules, so both go through
//! [`Shorthand::expand`].

use crate::error::ShorthandError;
use crate::values::split_whitespace_tokens;

/// The shorthands the parser expands into longhands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shorthand {
    /// `padding`
    Padding,
    /// `margin`
    Margin,
}

impl Shorthand {
    /// Look up a shorthand by property name, ASCII case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("padding") {
            Some(Self::Padding)
        } else if name.eq_ignore_ascii_case("margin") {
            Some(Self::Margin)
        } else {
            None
        }
    }

    /// The shorthand's own property name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Padding => "padding",
            Self::Margin => "margin",
        }
    }

    /// Longhand names in top, right, bottom, left order.
    #[must_use]
    pub const fn longhands(self) -> [&'static str; 4] {
        match self {
            Self::Padding => [
                "padding-top",
                "padding-right",
                "padding-bottom",
                "padding-left",
            ],
            Self::Margin => ["margin-top", "margin-right", "margin-bottom", "margin-left"],
        }
    }

    /// Expand a shorthand value into `(longhand, value)` pairs, in the order
    /// they are inserted into a declaration block: top, bottom, left, right.
    ///
    /// "If there is only one component value, it applies to all sides. If
    /// there are two values, the top and bottom are set to the first value
    /// and the right and left are set to the second. If there are three
    /// values, the top is set to the first value, the left and right are set
    /// to the second, and the bottom is set to the third. If there are four
    /// values they apply to the top, right, bottom, and left, respectively."
    ///
    /// # Errors
    ///
    /// Returns [`ShorthandError::WrongValueCount`] unless the value holds
    /// one to four whitespace-separated tokens.
    pub fn expand(self, value: &str) -> Result<[(&'static str, String); 4], ShorthandError> {
        let tokens = split_whitespace_tokens(value);
        let [top, right, bottom, left] = match tokens.as_slice() {
            &[all] => [all; 4],
            &[vertical, horizontal] => [vertical, horizontal, vertical, horizontal],
            &[top, horizontal, bottom] => [top, horizontal, bottom, horizontal],
            &[top, right, bottom, left] => [top, right, bottom, left],
            _ => {
                return Err(ShorthandError::WrongValueCount {
                    property: self.name().to_string(),
                    count: tokens.len(),
                });
            }
        };

        let [top_name, right_name, bottom_name, left_name] = self.longhands();
        Ok([
            (top_name, top.to_string()),
            (bottom_name, bottom.to_string()),
            (left_name, left.to_string()),
            (right_name, right.to_string()),
        ])
    }
}
