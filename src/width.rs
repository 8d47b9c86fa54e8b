//! Terminal display width helpers.

use unicode_width::UnicodeWidthChar;

/// Display width of `text` after stripping ANSI escapes.
pub fn display_width(text: &str) -> usize {
    unicode_width::UnicodeWidthStr::width(strip_ansi(text).as_str())
}

pub fn strip_ansi(text: &str) -> String {
    let clean = strip_ansi_escapes::strip(text);
    String::from_utf8_lossy(&clean).into_owned()
}

/// Longest ANSI-free prefix of `text` that fits in `max` columns.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in strip_ansi(text).chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi_sequences_have_no_width() {
        assert_eq!(display_width("\x1b[31mdose\x1b[0m"), 4);
    }

    #[test]
    fn truncation_respects_wide_chars() {
        assert_eq!(truncate_to_width("線量計", 5), "線量");
        assert_eq!(truncate_to_width("count", 10), "count");
    }
}
