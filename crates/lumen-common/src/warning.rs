//! Style-engine warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the CSS parser, media query engine and style builder to report
//! input that was skipped or could not be understood.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// A poisoned lock only means another thread panicked mid-insert; the set
/// itself is still usable.
fn warned() -> MutexGuard<'static, Option<HashSet<String>>> {
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Warn about skipped or unsupported input (prints once per unique message)
///
/// # Example
/// ```
/// lumen_common::warning::warn_once("CSS", "skipping unsupported at-rule '@import'");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = warned().get_or_insert_with(HashSet::new).insert(key);

    if should_print {
        eprintln!("{}", format!("[Lumen {component}] ⚠ {message}").yellow());
    }
}

/// Drain every warning recorded so far, sorted for stable output.
///
/// The drained messages will be printed again if they recur.
#[must_use]
pub fn take_warnings() -> Vec<String> {
    let mut taken: Vec<String> = warned()
        .as_mut()
        .map(|set| set.drain().collect())
        .unwrap_or_default();
    taken.sort();
    taken
}

/// Clear all recorded warnings (call before styling a new document)
pub fn clear_warnings() {
    if let Some(set) = warned().as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_are_recorded_once() {
        warn_once("Test", "recorded once");
        warn_once("Test", "recorded once");

        let taken = take_warnings();
        let hits = taken
            .iter()
            .filter(|w| w.as_str() == "[Test] recorded once")
            .count();
        assert_eq!(hits, 1);
    }
}
