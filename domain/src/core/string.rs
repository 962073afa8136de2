//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// First non-empty line of `s`, truncated to `max_len`
///
/// Used for one-line previews of a turn in progress displays.
pub fn preview(s: &str, max_len: usize) -> String {
    let line = s.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
    truncate(line, max_len)
}

/// `"1 turn"`, `"2 turns"`: a count with an English plural
pub fn count_noun(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_noun() {
        assert_eq!(count_noun(0, "turn"), "0 turns");
        assert_eq!(count_noun(1, "turn"), "1 turn");
        assert_eq!(count_noun(15, "turn"), "15 turns");
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // '巴' is 3 bytes
        assert_eq!(truncate("巴菲特", 9), "巴菲特");
        assert_eq!(truncate("巴菲特芒格", 9), "巴菲...");
    }

    #[test]
    fn test_preview_skips_blank_lines() {
        assert_eq!(preview("\n\n  Price is what you pay.\nmore", 40), "Price is what you pay.");
        assert_eq!(preview("", 10), "");
    }
}
