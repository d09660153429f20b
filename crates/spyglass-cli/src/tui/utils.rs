//! Text width utilities shared by the renderer and the sidebar

use unicode_width::UnicodeWidthChar;

/// Truncate `s` to at most `max_width` display columns, ending with an
/// ellipsis when anything was cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let mut width = 0usize;
    let mut out = String::new();
    for (i, ch) in s.char_indices() {
        let ch_width = ch.width().unwrap_or(1);
        if width + ch_width > max_width {
            // Re-walk to leave room for the ellipsis
            let mut trimmed = String::new();
            let mut trimmed_width = 0usize;
            for ch in s[..i].chars() {
                let w = ch.width().unwrap_or(1);
                if trimmed_width + w > max_width.saturating_sub(1) {
                    break;
                }
                trimmed.push(ch);
                trimmed_width += w;
            }
            trimmed.push('…');
            return trimmed;
        }
        out.push(ch);
        width += ch_width;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_string_untouched() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello", 5), "hello");
    }

    #[test]
    fn test_truncates_with_ellipsis() {
        assert_eq!(truncate_to_width("hello world", 8), "hello w…");
    }

    #[test]
    fn test_wide_characters() {
        // Each CJK char is two columns
        assert_eq!(truncate_to_width("漢字かな", 8), "漢字かな");
        assert_eq!(truncate_to_width("漢字かな", 5), "漢字…");
    }

    #[test]
    fn test_zero_width() {
        assert_eq!(truncate_to_width("anything", 0), "");
    }
}
