//! Utility helpers for paths and terminal prefixes.

use owo_colors::OwoColorize;
use std::path::Path;

/// Return a path relative to the current working directory when possible.
pub fn rel_to_wd(p: &Path) -> String {
    match std::env::current_dir() {
        Ok(wd) => match pathdiff::diff_paths(p, wd) {
            Some(r) => r.to_string_lossy().to_string(),
            None => p.to_string_lossy().to_string(),
        },
        Err(_) => p.to_string_lossy().to_string(),
    }
}

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if colors_enabled() {
        "✖ ⟦error⟧".red().bold().to_string()
    } else {
        "✖ ⟦error⟧".to_string()
    }
}

pub fn note_prefix() -> String {
    if colors_enabled() {
        "ℹ️  note:".blue().bold().to_string()
    } else {
        "ℹ️  note:".to_string()
    }
}
