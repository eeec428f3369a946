//! Reasons a piece of CSS could not be understood.
//!
//! The public parsing entry points report failure as absence (`None`, a
//! skipped rule or declaration). These types carry the reason for the
//! `try_` variants and for the warnings printed through
//! [`lumen_common::warning::warn_once`].

use thiserror::Error;

/// Why a `<media-in-parens>` feature failed to parse.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MediaQueryError {
    /// The condition is not wrapped in `(` and `)`.
    #[error("media feature must be wrapped in parentheses")]
    MissingParens,
    /// No space or colon separates a feature name from its value.
    #[error("missing media feature name")]
    MissingFeatureName,
    /// Nothing follows the feature name.
    #[error("missing media feature value")]
    MissingValue,
    /// The value does not start with a number.
    #[error("invalid media feature value '{0}'")]
    InvalidNumber(String),
    /// A non-zero length was given without a unit.
    #[error("non-zero length {0} requires a unit")]
    MissingUnit(f32),
    /// Only `px` lengths are understood.
    #[error("unsupported unit '{0}'")]
    UnsupportedUnit(String),
    /// Only the width features are understood.
    #[error("unsupported media feature '{0}'")]
    UnsupportedFeature(String),
}

/// Why a shorthand declaration could not be expanded into longhands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShorthandError {
    /// Box-edge shorthands take between one and four values.
    #[error("'{property}' takes 1 to 4 values, got {count}")]
    WrongValueCount {
        /// The shorthand property name.
        property: String,
        /// How many whitespace-separated values were found.
        count: usize,
    },
}
