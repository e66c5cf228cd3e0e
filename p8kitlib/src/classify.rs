//! Token classification.
//!
//! PICO-8 charges one token per word, literal and operator, but lets closing
//! brackets, commas, colons, `end` and `local` through for free. This module
//! holds the category sets and the single function that decides, for one
//! merged lexeme, whether it is charged.
//!
//! Rules are evaluated in a fixed order (see [`classify`]); the first one that
//! matches decides. The non-counted set is checked first so that nothing in it
//! can be picked up by the broader numeric/identifier checks further down.

use serde::{Deserialize, Serialize};

/// Literal words counted as one token each.
pub const LITERAL_WORDS: &[&str] = &["nil", "false", "true"];

/// Operators, including the compound forms produced by the merger.
pub const OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%", "^", "#", "=", "==", "+=", "-=", ">=", "<=", "~=", "<", ">", "..",
    "and", "or", "not",
];

/// Opening brackets. The matching pair costs one token, charged on the opener.
pub const OPENING_SYMBOLS: &[&str] = &["(", "[", "{"];

/// Keywords that cost a token. `end` and `local` are deliberately absent.
pub const KEYWORDS: &[&str] = &[
    "if", "then", "else", "elseif", "while", "do", "for", "in", "repeat", "until", "function",
    "return", "break",
];

/// Button glyphs: ❎ ⬆️ ⬇️ ⬅️ ➡️. The arrows carry a trailing variation
/// selector, so each one spans two codepoints but is one token.
pub const BUTTON_GLYPHS: &[&str] = &[
    "\u{274E}",
    "\u{2B06}\u{FE0F}",
    "\u{2B07}\u{FE0F}",
    "\u{2B05}\u{FE0F}",
    "\u{27A1}\u{FE0F}",
];

/// Lexemes that appear in source but are never charged.
pub const NON_TOKENS: &[&str] = &["end", ",", ")", "}", "]", ":"];

/// Words that look like identifiers but are structural.
const FREE_WORDS: &[&str] = &["end", "local"];

/// The category set a lexeme was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    LiteralWord,
    Operator,
    OpeningSymbol,
    Keyword,
    ButtonGlyph,
}

impl Category {
    /// All categories, in lookup order.
    pub const ALL: [Category; 5] = [
        Category::LiteralWord,
        Category::Operator,
        Category::OpeningSymbol,
        Category::Keyword,
        Category::ButtonGlyph,
    ];

    /// The constant set backing this category.
    pub fn members(self) -> &'static [&'static str] {
        match self {
            Category::LiteralWord => LITERAL_WORDS,
            Category::Operator => OPERATORS,
            Category::OpeningSymbol => OPENING_SYMBOLS,
            Category::Keyword => KEYWORDS,
            Category::ButtonGlyph => BUTTON_GLYPHS,
        }
    }

    /// Find the category containing `lexeme`, if any.
    pub fn of(lexeme: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| category.members().contains(&lexeme))
    }
}

/// Outcome of classifying one lexeme, naming the rule that decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Explicitly free: closing punctuation, `end`, comma, colon
    NonToken,
    /// Member of one of the category sets
    Category(Category),
    /// Numeric literal not caught by a category
    Numeric,
    /// String literal
    String,
    /// Identifier-shaped word
    Identifier,
    /// Nothing matched
    Unrecognized,
}

impl Classification {
    /// Whether this lexeme is charged one token.
    pub fn counts(self) -> bool {
        !matches!(
            self,
            Classification::NonToken | Classification::Unrecognized
        )
    }
}

/// Classify one merged lexeme.
///
/// Rule order:
/// 1. non-counted set
/// 2. category sets (literal words, operators, opening symbols, keywords, glyphs)
/// 3. numeric shapes: digit run, `0x` prefix, `-` prefix, or digits around one `.`
/// 4. leading quote
/// 5. identifier other than `end`/`local`
pub fn classify(lexeme: &str) -> Classification {
    let lexeme = lexeme.trim();

    if NON_TOKENS.contains(&lexeme) {
        return Classification::NonToken;
    }

    if let Some(category) = Category::of(lexeme) {
        return Classification::Category(category);
    }

    if is_numeric_literal(lexeme) {
        return Classification::Numeric;
    }

    if lexeme.starts_with(['"', '\'']) {
        return Classification::String;
    }

    if is_identifier(lexeme) && !FREE_WORDS.contains(&lexeme) {
        return Classification::Identifier;
    }

    Classification::Unrecognized
}

/// Shorthand for `classify(lexeme).counts()`.
pub fn is_token(lexeme: &str) -> bool {
    classify(lexeme).counts()
}

/// A non-empty run of ASCII digits.
pub fn is_digit_run(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn is_numeric_literal(text: &str) -> bool {
    is_digit_run(text)
        || text.starts_with("0x")
        || text.starts_with('-')
        || is_digit_run(&text.replacen('.', "", 1))
}

/// Letter or underscore, then letters, digits or underscores.
fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_tokens_are_free() {
        for lexeme in NON_TOKENS {
            assert_eq!(classify(lexeme), Classification::NonToken, "{lexeme}");
            assert!(!is_token(lexeme));
        }
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            classify("nil"),
            Classification::Category(Category::LiteralWord)
        );
        assert_eq!(classify("=="), Classification::Category(Category::Operator));
        assert_eq!(classify("and"), Classification::Category(Category::Operator));
        assert_eq!(
            classify("("),
            Classification::Category(Category::OpeningSymbol)
        );
        assert_eq!(
            classify("function"),
            Classification::Category(Category::Keyword)
        );
        assert_eq!(
            classify("\u{2B05}\u{FE0F}"),
            Classification::Category(Category::ButtonGlyph)
        );
    }

    #[test]
    fn test_category_sets_are_disjoint() {
        for (i, a) in Category::ALL.iter().enumerate() {
            for b in &Category::ALL[i + 1..] {
                for member in a.members() {
                    assert!(!b.members().contains(member), "{member} in {a:?} and {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_numeric_literals() {
        assert_eq!(classify("42"), Classification::Numeric);
        assert_eq!(classify("1.5"), Classification::Numeric);
        assert_eq!(classify("0x1f"), Classification::Numeric);
        assert_eq!(classify("-5"), Classification::Numeric);
        assert_eq!(classify("1.2.3"), Classification::Unrecognized);
    }

    #[test]
    fn test_strings() {
        assert_eq!(classify("\"hello\""), Classification::String);
        assert_eq!(classify("\"\""), Classification::String);
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(classify("player_x"), Classification::Identifier);
        assert_eq!(classify("_init"), Classification::Identifier);
        assert!(!is_token("local"));
        assert!(!is_token("end"));
    }

    #[test]
    fn test_unrecognized() {
        assert!(!is_token("."));
        assert!(!is_token(";"));
        assert!(!is_token("~"));
        assert!(!is_token("1abc"));
        assert!(!is_token(""));
    }

    #[test]
    fn test_digit_run() {
        assert!(is_digit_run("0"));
        assert!(is_digit_run("123"));
        assert!(!is_digit_run(""));
        assert!(!is_digit_run("12a"));
        assert!(!is_digit_run("-1"));
    }
}
