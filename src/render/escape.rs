//! Backslash escapes and their placeholder tokens.
//!
//! Escaped markup characters are swapped for Unicode noncharacters (U+FDD0 and up)
//! before any scanning happens, so no block or inline rule can see them as markup.
//! Noncharacters are reserved for internal use and never valid interchange text;
//! any that arrive in the input are dropped by [`normalize`].

/// Characters that may be escaped with a backslash, in token order.
pub const ESCAPABLE: [char; 10] = ['*', '_', '`', '~', '|', '\\', '[', ']', '(', ')'];

const TOKEN_BASE: u32 = 0xFDD0;
const RESERVED_END: u32 = 0xFDEF;

fn token_for(c: char) -> Option<char> {
    let index = ESCAPABLE.iter().position(|&e| e == c)?;
    char::from_u32(TOKEN_BASE + index as u32)
}

fn literal_for(token: char) -> Option<char> {
    let code = token as u32;
    if code < TOKEN_BASE {
        return None;
    }
    ESCAPABLE.get((code - TOKEN_BASE) as usize).copied()
}

fn is_reserved(c: char) -> bool {
    (TOKEN_BASE..=RESERVED_END).contains(&(c as u32))
}

/// Normalize line endings to `\n` and drop reserved noncharacters.
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            c if is_reserved(c) => {}
            c => out.push(c),
        }
    }
    out
}

/// Replace every backslash escape of an [`ESCAPABLE`] character with its token.
///
/// A backslash in front of any other character is left alone.
pub fn protect(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(token) = chars.peek().copied().and_then(token_for)
        {
            chars.next();
            out.push(token);
            continue;
        }
        out.push(c);
    }
    out
}

/// Turn tokens back into the literal characters they stand for.
pub fn restore(input: &str) -> String {
    if !input.chars().any(is_reserved) {
        return input.to_string();
    }
    input.chars().map(|c| literal_for(c).unwrap_or(c)).collect()
}

/// Turn tokens back into their original two-character escape (`\*`).
///
/// Used for code, which is shown exactly as written.
pub fn restore_verbatim(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match literal_for(c) {
            Some(literal) => {
                out.push('\\');
                out.push(literal);
            }
            None => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize("a\r\nb\rc\n"), "a\nb\nc\n");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_drops_reserved_characters() {
        assert_eq!(normalize("a\u{FDD0}b\u{FDEF}c"), "abc");
    }

    #[test]
    fn test_protect_hides_markup() {
        let protected = protect(r"\*not italic\*");
        assert!(!protected.contains('*'));
        assert!(!protected.contains('\\'));
        assert_eq!(restore(&protected), "*not italic*");
    }

    #[test]
    fn test_protect_leaves_other_backslashes() {
        assert_eq!(protect(r"C:\path\n"), r"C:\path\n");
        assert_eq!(protect("trailing\\"), "trailing\\");
    }

    #[test]
    fn test_escaped_backslash_consumes_pair() {
        // `\\*` is an escaped backslash followed by a live asterisk
        let protected = protect(r"\\*");
        assert!(protected.ends_with('*'));
        assert_eq!(restore(&protected), r"\*");
    }

    #[test]
    fn test_every_escapable_character_round_trips() {
        for c in ESCAPABLE {
            let source = format!("\\{c}");
            let protected = protect(&source);
            assert_eq!(protected.chars().count(), 1, "escape of {c:?} should become one token");
            assert_eq!(restore(&protected), c.to_string());
            assert_eq!(restore_verbatim(&protected), source);
        }
    }
}
