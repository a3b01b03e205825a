//! Common helper functions for output formatting.

/// Truncates a string to at most `max_len` characters, ending in "...".
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("exactly ten", 11), "exactly ten");
        assert_eq!(truncate_str("a longer value", 8), "a lon...");
    }

    #[test]
    fn test_truncate_str_multibyte() {
        assert_eq!(truncate_str("ÄÖÜäöüß", 5), "ÄÖ...");
    }
}
