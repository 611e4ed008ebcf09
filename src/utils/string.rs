//! String utilities

/// Maximum number of characters of an upstream reply kept in log lines
pub const LOG_PREVIEW_CHARS: usize = 200;

/// Truncate to at most `max_chars` characters, appending `suffix` if anything was cut.
///
/// Cuts on character boundaries, so CJK text in model replies is never split
/// mid code point.
pub fn truncate_with_suffix(s: &str, max_chars: usize, suffix: &str) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}{}", &s[..idx], suffix),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(truncate_with_suffix("Hi", 5, "..."), "Hi");
        assert_eq!(truncate_with_suffix("", 5, "..."), "");
    }

    #[test]
    fn test_exact_length_untouched() {
        assert_eq!(truncate_with_suffix("Hello", 5, "..."), "Hello");
    }

    #[test]
    fn test_cjk_boundaries() {
        let text = "床前明月光，疑是地上霜";
        assert_eq!(truncate_with_suffix(text, 5, "…"), "床前明月光…");
    }
}
