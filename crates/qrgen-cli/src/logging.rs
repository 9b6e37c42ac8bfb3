//! Verbosity-gated console logging for the command-line front ends.
//!
//! A message carries a threshold; it prints when the global verbosity
//! (set from `-v` occurrences) reaches that threshold. Errors ignore the
//! gate. Threshold 0 marks the messages every run should show, 1 covers
//! per-item progress, 2 covers encoding decisions.

use std::sync::atomic::{AtomicUsize, Ordering};

static VERBOSITY: AtomicUsize = AtomicUsize::new(0);

const BLUE: &str = "\x1b[94m";
const GREEN: &str = "\x1b[92m";
const YELLOW: &str = "\x1b[93m";
const RED: &str = "\x1b[91m";
const RESET: &str = "\x1b[0m";

/// Sets the global verbosity from the command line.
pub fn set_verbosity(level: usize) {
    VERBOSITY.store(level, Ordering::Relaxed);
}

/// True when a message at `threshold` should be printed.
pub fn shall_log(threshold: usize) -> bool {
    threshold <= VERBOSITY.load(Ordering::Relaxed)
}

pub fn info(message: &str, threshold: usize) {
    if shall_log(threshold) {
        println!("{BLUE}[INFO] {message}{RESET}");
    }
}

pub fn success(message: &str, threshold: usize) {
    if shall_log(threshold) {
        println!("{GREEN}[SUCCESS] {message}{RESET}");
    }
}

pub fn warning(message: &str, threshold: usize) {
    if shall_log(threshold) {
        eprintln!("{YELLOW}[WARNING] {message}{RESET}");
    }
}

/// Errors print regardless of verbosity.
pub fn error(message: &str) {
    eprintln!("{RED}[ERROR] {message}{RESET}");
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn gate_messages_by_threshold() {
        set_verbosity(1);
        assert!(shall_log(0));
        assert!(shall_log(1));
        assert!(!shall_log(2));
        set_verbosity(0);
    }
}
