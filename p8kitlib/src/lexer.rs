//! Lexeme scanner.
//!
//! Splits one comment-free line into raw candidate lexemes. The scanner does
//! not assign types; it only cuts the line into spans that might be tokens.
//! Whitespace and characters that fit no shape are dropped silently, so odd
//! source never stops a count.
//!
//! Shapes are tried in this order at each position, first match wins:
//!
//! 1. double-quoted string, running to the next `"` (no escapes)
//! 2. `nil`, `false`, `true` as whole words
//! 3. a maximal run of word characters
//! 4. `<digits>.<digits>`
//! 5. one punctuation character from `[]{}()<>.,;:+=-*/%~^#`
//! 6. a button glyph
//!
//! Shape 3 swallows the integer part of a decimal before shape 4 gets a
//! chance, so `1.5` comes out as `1`, `.`, `5`; the merger puts it back
//! together.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classify::BUTTON_GLYPHS;

static LEXEME_REGEX: Lazy<Regex> = Lazy::new(|| {
    let glyphs: Vec<String> = BUTTON_GLYPHS.iter().map(|g| regex::escape(g)).collect();
    let pattern = format!(
        r#""[^"]*"|\bnil\b|\bfalse\b|\btrue\b|\b\w+\b|\d+\.\d+|[\[\]{{}}()<>.,;:+=\-*/%~^#]|{}"#,
        glyphs.join("|")
    );
    Regex::new(&pattern).expect("lexeme pattern is valid")
});

/// Scan one line into raw lexemes, left to right.
pub fn scan(line: &str) -> Vec<&str> {
    LEXEME_REGEX.find_iter(line).map(|m| m.as_str()).collect()
}
