//! Common utilities for the Lumen style engine.
//!
//! This crate provides shared infrastructure used by all style components:
//! - **Warning System** - colored, deduplicated terminal output for
//!   unsupported or malformed input

pub mod warning;
