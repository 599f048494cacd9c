//! Diagnostic warnings with colored terminal output.
//!
//! Provides deduplication so that a tree built in a loop does not repeat the
//! same message for every node. Used by the DOM and the CLI to report
//! features that are accepted but degraded (e.g. doctype identifiers that are
//! never serialized).

use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Warnings already printed, keyed by `[component] message`.
static WARNED: Mutex<BTreeSet<String>> = Mutex::new(BTreeSet::new());

/// Warn about a degraded feature (prints once per unique message).
///
/// # Example
/// ```ignore
/// warn_once("DOM", "no behavior registered for <x-card>; using a generic element");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(key);

    if should_print {
        eprintln!("{YELLOW}[Sprig {component}] ⚠ {message}{RESET}");
    }
}

/// Snapshot of every warning reported since the last [`clear_warnings`],
/// formatted as `[component] message`, in sorted order.
#[must_use]
pub fn recorded_warnings() -> Vec<String> {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .cloned()
        .collect()
}

/// Forget all recorded warnings so they are printed again.
pub fn clear_warnings() {
    WARNED.lock().unwrap_or_else(PoisonError::into_inner).clear();
}
