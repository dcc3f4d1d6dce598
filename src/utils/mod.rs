//! Utility functions and helpers.

pub mod http;
pub mod log;
pub mod url;

/// Drop every non-ASCII character.
pub fn ascii_fold(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}
