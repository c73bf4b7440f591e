//! Shared CLI helpers — path expansion and response printing.

use std::path::PathBuf;

use colored::Colorize;

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Print the spoken answer to stdout.
pub fn print_response(spoken_text: &str) {
    println!();
    println!("{}", "🤖 kgbot".cyan().bold());
    println!("{spoken_text}");
    println!();
}

/// Green check or a dimmed note, for status lines.
pub fn mark(ok: bool, note: &str) -> String {
    if ok {
        format!("{} {}", "✓".green(), note)
    } else {
        format!("{}", format!("· {note}").dimmed())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_tilde_home() {
        let result = expand_tilde("~/foo/bar");
        assert!(result.ends_with("foo/bar"));
        assert!(!result.starts_with("~"));
    }

    #[test]
    fn expand_tilde_no_tilde() {
        let result = expand_tilde("/absolute/path");
        assert_eq!(result, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn expand_tilde_bare() {
        let result = expand_tilde("~");
        assert!(!result.to_string_lossy().contains('~'));
    }

    #[test]
    fn mark_keeps_note() {
        assert!(mark(true, "key set").contains("key set"));
        assert!(mark(false, "not configured").contains("not configured"));
    }
}
