//! Keeps comment text on a single log line.
//!
//! Extracted comments legitimately contain newlines and tabs, so anything we
//! echo into the log gets escaped and capped first.

/// Cap on how much of a comment is echoed into a log line.
const PREVIEW_LEN: usize = 80;

/// Render `s` as a one-line, bounded preview suitable for logging.
pub fn preview(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(PREVIEW_LEN) + 4);
    for ch in s.chars().take(PREVIEW_LEN) {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.extend(c.escape_default()),
            c => out.push(c),
        }
    }
    if s.chars().count() > PREVIEW_LEN {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::preview;

    #[test]
    fn escapes_line_breaks_and_tabs() {
        assert_eq!(preview("a\nb\tc\r"), "a\\nb\\tc\\r");
    }

    #[test]
    fn caps_long_text_with_ellipsis() {
        let long = "x".repeat(200);
        let p = preview(&long);
        assert!(p.ends_with('…'));
        assert_eq!(p.chars().count(), 81);
    }
}
