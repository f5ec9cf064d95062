//! Tests for the deduplicating warning registry.
//!
//! The registry is process-wide, so everything runs in one test to keep
//! `clear_warnings` from racing with the other assertions.

use htmlfive_common::warning::{clear_warnings, has_warned, warn_once};

#[test]
fn test_warning_registry() {
    warn_once("Test", "recorded warning");
    assert!(has_warned("Test", "recorded warning"));
    assert!(!has_warned("Test", "some other warning"));
    assert!(!has_warned("Other", "recorded warning"));

    // Repeats are deduplicated, not an error
    warn_once("Test", "recorded warning");
    assert!(has_warned("Test", "recorded warning"));

    clear_warnings();
    assert!(!has_warned("Test", "recorded warning"));

    warn_once("Test", "recorded warning");
    assert!(has_warned("Test", "recorded warning"));
}
