//! Terminal helpers for tagged status lines.

use colored::*;
use std::env;

/// Check if colored output should be used
fn use_colored_output() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" || term == "unknown" {
            return false;
        }
    }
    if env::var("CI").is_ok() || env::var("CONTINUOUS_INTEGRATION").is_ok() {
        return false;
    }
    true
}

pub fn print_success(tag: &str, message: &str) {
    if use_colored_output() {
        println!("[{}] {}", tag.bright_green().bold(), message);
    } else {
        println!("[{}] {}", tag, message);
    }
}

pub fn print_error(tag: &str, message: &str) {
    if use_colored_output() {
        println!("[{}] {}", tag.bright_red().bold(), message);
    } else {
        println!("[{}] {}", tag, message);
    }
}
