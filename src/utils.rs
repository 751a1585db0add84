//! Shared utility functions used across modules.

use unicode_width::UnicodeWidthChar;

use crate::constants::SPINNER_CHARS;

/// Truncate a string to `max_len` characters, appending "..." if truncated.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Get the spinner character for the current tick.
pub fn spinner_char(tick: u64) -> &'static str {
    SPINNER_CHARS[(tick % SPINNER_CHARS.len() as u64) as usize]
}

/// Get animated loading dots for the current tick.
pub fn loading_dots(tick: u64) -> &'static str {
    match tick % 4 {
        0 => "",
        1 => ".",
        2 => "..",
        _ => "...",
    }
}

/// Byte offset where a single-line view of `text` should start so that the
/// cursor (a byte offset) stays visible inside `width` columns.
pub fn input_view_start(text: &str, cursor: usize, width: usize) -> usize {
    if width == 0 {
        return cursor;
    }
    // One column is reserved for the cursor cell itself.
    let budget = width - 1;
    let mut used = 0;
    let mut start = cursor;
    for (idx, c) in text[..cursor].char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        start = idx;
    }
    start
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── truncate_str ──────────────────────────────────────────────

    #[test]
    fn truncate_str_short_string_unchanged() {
        assert_eq!(truncate_str("hello", 10), "hello");
    }

    #[test]
    fn truncate_str_exact_length() {
        assert_eq!(truncate_str("hello", 5), "hello");
    }

    #[test]
    fn truncate_str_needs_truncation() {
        assert_eq!(truncate_str("hello world", 8), "hello...");
    }

    #[test]
    fn truncate_str_max_len_3_or_less() {
        assert_eq!(truncate_str("abcdef", 3), "abc");
        assert_eq!(truncate_str("abcdef", 1), "a");
        assert_eq!(truncate_str("abcdef", 0), "");
    }

    #[test]
    fn truncate_str_multibyte_safe() {
        assert_eq!(truncate_str("conexão perdida", 7), "cone...");
        assert_eq!(truncate_str("日本語テキスト", 5), "日本...");
    }

    // ── spinner_char / loading_dots ───────────────────────────────

    #[test]
    fn spinner_char_cycles() {
        assert_eq!(spinner_char(0), "◐");
        assert_eq!(spinner_char(3), "◒");
        assert_eq!(spinner_char(4), "◐");
    }

    #[test]
    fn loading_dots_cycles() {
        assert_eq!(loading_dots(0), "");
        assert_eq!(loading_dots(3), "...");
        assert_eq!(loading_dots(5), ".");
    }

    // ── input_view_start ──────────────────────────────────────────

    #[test]
    fn input_fits_starts_at_zero() {
        assert_eq!(input_view_start("hello", 5, 20), 0);
    }

    #[test]
    fn long_input_scrolls_to_keep_cursor() {
        // width 5 -> 4 columns before the cursor cell
        assert_eq!(input_view_start("abcdefgh", 8, 5), 4);
    }

    #[test]
    fn cursor_at_start_shows_start() {
        assert_eq!(input_view_start("abcdefgh", 0, 3), 0);
    }

    #[test]
    fn wide_chars_count_double() {
        // "日本語" is 6 columns; 3 fit before the cursor in width 4.
        let text = "日本語";
        let start = input_view_start(text, text.len(), 4);
        assert_eq!(&text[start..], "語");
    }

    #[test]
    fn zero_width_view() {
        assert_eq!(input_view_start("abc", 2, 0), 2);
    }
}
