//! Terminal escape sequence removal for task log output.
//!
//! Task runners stream raw terminal output (Ansible, shell scripts) that is
//! typically colorized. Everything surfaced to observers or CI logs goes
//! through [`strip_ansi`] first.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// ESC followed by either a single Fe byte or a bracketed CSI sequence
/// (parameter bytes `0-?`, intermediate bytes ` -/`, final byte `@-~`).
const ANSI_PATTERN: &str = r"\x1B(?:[@-Z\\-_]|\[[0-?]*[ -/]*[@-~])";

fn ansi_escape() -> &'static Regex {
    static ANSI_ESCAPE: OnceLock<Regex> = OnceLock::new();
    ANSI_ESCAPE.get_or_init(|| Regex::new(ANSI_PATTERN).expect("hard-coded pattern is valid"))
}

/// Remove all ANSI/terminal escape sequences from `input`.
///
/// Every other character, including newlines and multi-byte Unicode, passes
/// through unchanged and in order. Sanitizing already-sanitized text is a
/// no-op, and input without any escape sequence is returned borrowed.
///
/// # Examples
///
/// ```rust
/// use semaphore_link::strip_ansi;
///
/// let cleaned = strip_ansi("\x1B[31mRed Text\x1B[0m Normal Text");
/// assert_eq!(cleaned, "Red Text Normal Text");
/// ```
pub fn strip_ansi(input: &str) -> Cow<'_, str> {
    ansi_escape().replace_all(input, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_color_sequences() {
        let input = "\x1B[31mRed Text\x1B[0m Normal Text";
        assert_eq!(strip_ansi(input), "Red Text Normal Text");
    }

    #[test]
    fn test_removes_cursor_and_clear_sequences() {
        assert_eq!(strip_ansi("\x1B[2Jcleared"), "cleared");
        assert_eq!(strip_ansi("\x1B[1;32mok: [beta_host]\x1B[0m"), "ok: [beta_host]");
        // Bare Fe sequence (no bracket)
        assert_eq!(strip_ansi("\x1BMscrolled"), "scrolled");
    }

    #[test]
    fn test_plain_text_is_unchanged_and_borrowed() {
        let input = "PLAY RECAP *** ok=31   changed=13";
        let output = strip_ansi(input);
        assert_eq!(output, input);
        assert!(matches!(output, Cow::Borrowed(_)));
    }

    #[test]
    fn test_preserves_newlines_and_unicode() {
        let input = "\x1B[33mWarnung:\x1B[0m Schlüssel hinzugefügt\nnächste Zeile ✓";
        assert_eq!(strip_ansi(input), "Warnung: Schlüssel hinzugefügt\nnächste Zeile ✓");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "\x1B[31mRed\x1B[0m",
            "no escapes at all",
            "\x1B[0;36mmixed\x1B[0m and \x1B[1mmore\x1B[22m",
            "",
        ];
        for input in inputs {
            let once = strip_ansi(input).into_owned();
            let twice = strip_ansi(&once).into_owned();
            assert_eq!(once, twice, "sanitize must be idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(strip_ansi(""), "");
    }
}
