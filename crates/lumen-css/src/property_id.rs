//! Property identifiers.
//!
//! Declarations are stored by their source name; matched properties on the
//! styled tree are keyed by [`PropertyId`] so consumers can match on known
//! properties without string comparisons.

use core::fmt;

use serde::{Serialize, Serializer};
use strum_macros::{EnumString, IntoStaticStr};

/// A CSS property, or the source name of one the engine has no variant for.
///
/// Names are matched ASCII case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum PropertyId {
    /// [§ 2 display](https://www.w3.org/TR/css-display-3/#the-display-properties)
    Display,
    /// [§ 3.1 color](https://www.w3.org/TR/css-color-4/#the-color-property)
    Color,
    /// `background` shorthand (not expanded).
    Background,
    /// [§ 3.2 background-color](https://www.w3.org/TR/css-backgrounds-3/#background-color)
    BackgroundColor,
    /// `background-image`
    BackgroundImage,

    /// `width`
    Width,
    /// `height`
    Height,
    /// `min-width`
    MinWidth,
    /// `max-width`
    MaxWidth,
    /// `min-height`
    MinHeight,
    /// `max-height`
    MaxHeight,

    /// `margin` shorthand. Expanded by the parser, so never matched.
    Margin,
    /// `margin-top`
    MarginTop,
    /// `margin-right`
    MarginRight,
    /// `margin-bottom`
    MarginBottom,
    /// `margin-left`
    MarginLeft,

    /// `padding` shorthand. Expanded by the parser, so never matched.
    Padding,
    /// `padding-top`
    PaddingTop,
    /// `padding-right`
    PaddingRight,
    /// `padding-bottom`
    PaddingBottom,
    /// `padding-left`
    PaddingLeft,

    /// `border` shorthand (not expanded).
    Border,
    /// `border-radius`
    BorderRadius,
    /// `border-top-width`
    BorderTopWidth,
    /// `border-right-width`
    BorderRightWidth,
    /// `border-bottom-width`
    BorderBottomWidth,
    /// `border-left-width`
    BorderLeftWidth,
    /// `border-top-style`
    BorderTopStyle,
    /// `border-right-style`
    BorderRightStyle,
    /// `border-bottom-style`
    BorderBottomStyle,
    /// `border-left-style`
    BorderLeftStyle,
    /// `border-top-color`
    BorderTopColor,
    /// `border-right-color`
    BorderRightColor,
    /// `border-bottom-color`
    BorderBottomColor,
    /// `border-left-color`
    BorderLeftColor,

    /// `font` shorthand (not expanded).
    Font,
    /// `font-family`
    FontFamily,
    /// `font-size`
    FontSize,
    /// `font-style`
    FontStyle,
    /// `font-weight`
    FontWeight,
    /// `line-height`
    LineHeight,
    /// `text-align`
    TextAlign,
    /// `text-decoration`
    TextDecoration,
    /// `text-transform`
    TextTransform,
    /// `white-space`
    WhiteSpace,

    /// `position`
    Position,
    /// `top`
    Top,
    /// `right`
    Right,
    /// `bottom`
    Bottom,
    /// `left`
    Left,
    /// `float`
    Float,
    /// `overflow`
    Overflow,
    /// `visibility`
    Visibility,
    /// `z-index`
    ZIndex,

    /// Any property without a dedicated variant, by its source name.
    #[strum(default)]
    Unknown(String),
}

impl PropertyId {
    /// Look up a property by name. Never fails: unrecognized names become
    /// [`PropertyId::Unknown`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        name.parse()
            .unwrap_or_else(|_| Self::Unknown(name.to_string()))
    }

    /// The canonical (lowercase, kebab-case) name, or the source name for
    /// unknown properties.
    #[must_use]
    pub fn as_name(&self) -> &str {
        match self {
            Self::Unknown(name) => name,
            known => <&'static str>::from(known),
        }
    }

    /// [§ 7.1 Inherited Properties](https://www.w3.org/TR/css-cascade-4/#inherited-property)
    ///
    /// "Some properties are inherited from an ancestor element to its descendants."
    #[must_use]
    pub const fn is_inherited(&self) -> bool {
        matches!(
            self,
            Self::Color
                | Self::Font
                | Self::FontFamily
                | Self::FontSize
                | Self::FontStyle
                | Self::FontWeight
                | Self::LineHeight
                | Self::TextAlign
                | Self::TextTransform
                | Self::Visibility
                | Self::WhiteSpace
        )
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_name())
    }
}

impl Serialize for PropertyId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_name())
    }
}
