//! Sanitization for user- and host-supplied text fields.
//!
//! Every text field passes through one of these before persistence, whatever
//! its origin. Neither function can grow the input.

/// Sanitize a single-line field (event names, categories).
///
/// Strips control characters, collapses whitespace runs to a single space,
/// and trims the ends.
pub fn sanitize_line(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;

    for ch in input.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else if !ch.is_control() {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }

    out
}

/// Sanitize a multi-line field (notes).
///
/// Normalizes line endings to `\n`, strips other control characters, and
/// trims trailing whitespace.
pub fn sanitize_multiline(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for ch in input.replace("\r\n", "\n").chars() {
        if ch == '\n' || ch == '\t' || !ch.is_control() {
            out.push(ch);
        }
    }

    out.truncate(out.trim_end().len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_collapses_whitespace_and_trims() {
        assert_eq!(sanitize_line("  Plugin   updated \t now "), "Plugin updated now");
    }

    #[test]
    fn line_strips_control_characters() {
        assert_eq!(sanitize_line("bad\u{0000}name\u{001b}"), "badname");
    }

    #[test]
    fn line_of_only_whitespace_is_empty() {
        assert_eq!(sanitize_line(" \t "), "");
    }

    #[test]
    fn multiline_keeps_newlines_and_tabs() {
        assert_eq!(sanitize_multiline("line one\r\nline\ttwo\n"), "line one\nline\ttwo");
    }

    #[test]
    fn multiline_strips_other_control_characters() {
        assert_eq!(sanitize_multiline("a\u{0007}b"), "ab");
    }
}
