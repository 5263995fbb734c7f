//! Console helpers: colored diagnostic prefixes for stderr messages.
//!
//! Colors are disabled when `NO_COLOR` is set.

use owo_colors::OwoColorize;

pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn prefix(label: &str, paint: fn(&str) -> String) -> String {
    if colors_enabled() {
        paint(label)
    } else {
        label.to_string()
    }
}

pub fn error_prefix() -> String {
    prefix("error:", |s| s.red().bold().to_string())
}

pub fn note_prefix() -> String {
    prefix("note:", |s| s.yellow().bold().to_string())
}

pub fn info_prefix() -> String {
    prefix("info:", |s| s.blue().bold().to_string())
}

pub fn ok_prefix() -> String {
    prefix("saved:", |s| s.green().bold().to_string())
}
