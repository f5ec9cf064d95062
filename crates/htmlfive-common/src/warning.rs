//! Document warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the tokenizer, tree builder and serializers to report input that is
//! accepted but probably not what the author meant.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn registry() -> MutexGuard<'static, Option<HashSet<String>>> {
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about a suspicious construct (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("HTML Tokenizer", "unknown character reference '&foo;'");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_print = registry()
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if should_print {
        eprintln!("{}", format!("[htmlfive {component}] ⚠ {message}").yellow());
    }
}

/// Returns true if this exact warning has been emitted since the last
/// [`clear_warnings`].
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    registry()
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Clear all recorded warnings (call before processing a new document)
pub fn clear_warnings() {
    if let Some(set) = registry().as_mut() {
        set.clear();
    }
}
