//! Lexical helpers (spec.md §4.1): small, pure functions over character
//! ranges that the parser builds on. None of them know about opcodes,
//! directives or addressing modes.

use crate::reserved::is_reserved;

pub const MAX_LABEL_LEN: usize = 31;
pub const MAX_LINE_LEN: usize = 80;

/// Splits `text` into its first whitespace-delimited word and the
/// (untrimmed) remainder that follows it.
pub fn extract_first_word(text: &str) -> (&str, &str) {
    let trimmed = text.trim_start();
    match trimmed.find(char::is_whitespace) {
        Some(idx) => (&trimmed[..idx], &trimmed[idx..]),
        None => (trimmed, ""),
    }
}

/// Advances `cursor` past one comma-delimited token, trimming the token's
/// surrounding whitespace. Returns the token together with whether a
/// comma delimiter was actually found (as opposed to running off the end
/// of the string). A cursor that is already sitting on a comma (i.e. the
/// token before it is empty) yields an empty token and `true`.
pub fn extract_token_until_comma(cursor: &mut &str) -> (String, bool) {
    match cursor.find(',') {
        Some(idx) => {
            let token = cursor[..idx].trim().to_string();
            *cursor = &cursor[idx + 1..];
            (token, true)
        }
        None => {
            let token = cursor.trim().to_string();
            *cursor = "";
            (token, false)
        }
    }
}

/// First char alphabetic, the rest alphanumeric, length within the limit,
/// and not a reserved word.
pub fn is_valid_label_syntax(s: &str) -> bool {
    if s.is_empty() || s.len() > MAX_LABEL_LEN {
        return false;
    }
    let mut chars = s.chars();
    let first_ok = chars.next().map(|c| c.is_alphabetic()).unwrap_or(false);
    if !first_ok {
        return false;
    }
    if !chars.clone().all(|c| c.is_alphanumeric()) {
        return false;
    }
    !is_reserved(s)
}

/// Optional leading sign, one or more decimal digits, nothing else
/// (embedded whitespace, dots and letters are all rejected).
pub fn parse_integer(s: &str) -> Result<i32, ()> {
    let s = s.trim();
    if s.is_empty() {
        return Err(());
    }
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(());
    }
    s.parse::<i32>().map_err(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_word_splits_on_whitespace() {
        assert_eq!(extract_first_word("  mov r1, r2"), ("mov", " r1, r2"));
        assert_eq!(extract_first_word("hlt"), ("hlt", ""));
        assert_eq!(extract_first_word(""), ("", ""));
    }

    #[test]
    fn token_until_comma_advances_and_trims() {
        let mut cursor = "  r1 , r2  ";
        let (tok, had_comma) = extract_token_until_comma(&mut cursor);
        assert_eq!(tok, "r1");
        assert!(had_comma);
        assert_eq!(cursor, " r2  ");

        let (tok2, had_comma2) = extract_token_until_comma(&mut cursor);
        assert_eq!(tok2, "r2");
        assert!(!had_comma2);
        assert_eq!(cursor, "");
    }

    #[test]
    fn token_until_comma_detects_leading_comma() {
        let mut cursor = ", r2";
        let (tok, had_comma) = extract_token_until_comma(&mut cursor);
        assert_eq!(tok, "");
        assert!(had_comma);
    }

    #[test]
    fn label_syntax_rules() {
        assert!(is_valid_label_syntax("MAIN"));
        assert!(is_valid_label_syntax("a1"));
        assert!(!is_valid_label_syntax("1a"));
        assert!(!is_valid_label_syntax("mov"));
        assert!(!is_valid_label_syntax(""));
        assert!(!is_valid_label_syntax(&"a".repeat(32)));
    }

    #[test]
    fn integer_parsing_rejects_garbage() {
        assert_eq!(parse_integer("42"), Ok(42));
        assert_eq!(parse_integer("-7"), Ok(-7));
        assert_eq!(parse_integer("+7"), Ok(7));
        assert!(parse_integer("4 2").is_err());
        assert!(parse_integer("4.2").is_err());
        assert!(parse_integer("4a").is_err());
        assert!(parse_integer("").is_err());
    }
}
