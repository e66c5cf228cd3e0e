//! Lexeme merger.
//!
//! Folds fixed runs of adjacent raw lexemes into one logical unit. The pass is
//! single, left to right, greedy and non-overlapping: at each cursor position
//! the rules in [`MergeRule::PRIORITY`] are tried in order, the first that
//! matches consumes its lexemes, and scanning resumes after them. If none
//! match, the lexeme passes through unchanged.
//!
//! The signed-literal rule needs left context. The previously emitted lexeme
//! is handed to each rule explicitly; the pass keeps no other state.

use std::borrow::Cow;

use crate::classify::is_digit_run;

/// Two-lexeme sequences that form one compound operator.
const COMPOUND_OPERATORS: &[(&str, &str, &str)] = &[
    ("=", "=", "=="),
    ("+", "=", "+="),
    ("-", "=", "-="),
    (">", "=", ">="),
    ("<", "=", "<="),
];

/// Lexemes after which a `-` reads as the sign of a literal rather than
/// subtraction.
const VALUE_EXPECTING: &[&str] = &[
    // keywords
    "and", "or", "if", "elseif", "while", "until", "return", "not", "local",
    // operators and punctuation
    "+", "-", "*", "/", "%", "^", "=", "==", "!=", "+=", "-=", ">=", "<=", "~=", "<", ">", ".",
    "(", ")", "[", "]", "{", "}", ";", ":", "?", "&", "|",
];

/// One merged unit: the combined text and how many raw lexemes it used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merge<'a> {
    pub lexeme: Cow<'a, str>,
    pub consumed: usize,
}

/// The merge rules, one variant per pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeRule {
    /// `<digits>` `.` `<digits>` into `<digits>.<digits>`
    DecimalLiteral,
    /// `=` `=` into `==`, and likewise `+=`, `-=`, `>=`, `<=`
    CompoundOperator,
    /// `-` `<digits>` into `-<digits>` after a value-expecting lexeme
    SignedLiteral,
}

impl MergeRule {
    /// Rules in the order they are tried.
    pub const PRIORITY: [MergeRule; 3] = [
        MergeRule::DecimalLiteral,
        MergeRule::CompoundOperator,
        MergeRule::SignedLiteral,
    ];

    /// Try this rule against the start of `window`.
    ///
    /// `previous` is the last lexeme emitted by the pass, `None` at the start
    /// of a line.
    pub fn apply<'a>(self, window: &[&'a str], previous: Option<&str>) -> Option<Merge<'a>> {
        match self {
            MergeRule::DecimalLiteral => match window {
                [whole, ".", frac, ..] if is_digit_run(whole) && is_digit_run(frac) => {
                    Some(Merge {
                        lexeme: Cow::Owned(format!("{whole}.{frac}")),
                        consumed: 3,
                    })
                }
                _ => None,
            },
            MergeRule::CompoundOperator => match window {
                [first, second, ..] => COMPOUND_OPERATORS
                    .iter()
                    .find(|(a, b, _)| a == first && b == second)
                    .map(|(_, _, op)| Merge {
                        lexeme: Cow::Borrowed(*op),
                        consumed: 2,
                    }),
                _ => None,
            },
            MergeRule::SignedLiteral => match (window, previous) {
                (["-", digits, ..], Some(prev))
                    if is_digit_run(digits) && VALUE_EXPECTING.contains(&prev) =>
                {
                    Some(Merge {
                        lexeme: Cow::Owned(format!("-{digits}")),
                        consumed: 2,
                    })
                }
                _ => None,
            },
        }
    }
}

/// Run the merge pass over one line's raw lexemes.
pub fn merge<'a>(lexemes: &[&'a str]) -> Vec<Cow<'a, str>> {
    let mut merged: Vec<Cow<'a, str>> = Vec::with_capacity(lexemes.len());
    let mut i = 0;

    while i < lexemes.len() {
        let window = &lexemes[i..];
        let previous = merged.last().map(|p| &**p);

        let step = MergeRule::PRIORITY
            .into_iter()
            .find_map(|rule| rule.apply(window, previous));

        match step {
            Some(Merge { lexeme, consumed }) => {
                merged.push(lexeme);
                i += consumed;
            }
            None => {
                merged.push(Cow::Borrowed(lexemes[i]));
                i += 1;
            }
        }
    }

    merged
}
