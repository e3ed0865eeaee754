//! Verb pattern compilation.
//!
//! A pattern is a whitespace-separated list of tokens. Plain words are
//! literals. `<name>` is an object slot that binds one or more input words
//! naming a visible object, and `<name...>` is a slot that must take every
//! remaining word. The rest slot is only allowed as the final token.

use std::fmt;

use crate::error::{CoreError, CoreResult};

/// One compiled pattern token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A word that must appear verbatim (ignoring ASCII case). Stored with
    /// ASCII letters lowercased; other characters are kept as written.
    Literal(String),
    /// An argument bound to a vocabulary entry.
    Slot {
        /// Slot name, used only for display.
        name: String,
        /// Whether the slot consumes all remaining input.
        rest: bool,
    },
}

/// A compiled verb pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    tokens: Vec<Token>,
}

impl Pattern {
    /// Compile a pattern from its source text.
    pub fn parse(source: &str) -> CoreResult<Self> {
        let invalid = |reason: &str| CoreError::InvalidPattern {
            pattern: source.to_string(),
            reason: reason.to_string(),
        };

        let words: Vec<&str> = source.split_whitespace().collect();
        if words.is_empty() {
            return Err(invalid("pattern is empty"));
        }

        let mut tokens = Vec::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            let token = if let Some(inner) = word.strip_prefix('<') {
                let inner = inner
                    .strip_suffix('>')
                    .ok_or_else(|| invalid("unclosed slot"))?;
                let (name, rest) = match inner.strip_suffix("...") {
                    Some(name) => (name, true),
                    None => (inner, false),
                };
                if name.is_empty() {
                    return Err(invalid("slot has no name"));
                }
                if name.contains(['<', '>']) {
                    return Err(invalid("nested slot"));
                }
                if rest && i + 1 != words.len() {
                    return Err(invalid("rest slot must come last"));
                }
                Token::Slot {
                    name: name.to_string(),
                    rest,
                }
            } else if word.contains(['<', '>']) {
                return Err(invalid("stray angle bracket"));
            } else {
                Token::Literal(word.to_ascii_lowercase())
            };
            tokens.push(token);
        }

        Ok(Self {
            source: source.to_string(),
            tokens,
        })
    }

    /// The source text the pattern was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled tokens.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of argument slots.
    pub fn arity(&self) -> usize {
        self.tokens
            .iter()
            .filter(|t| matches!(t, Token::Slot { .. }))
            .count()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_are_lowercased() {
        let pattern = Pattern::parse("Look  Around").unwrap();
        assert_eq!(
            pattern.tokens(),
            &[
                Token::Literal("look".to_string()),
                Token::Literal("around".to_string())
            ]
        );
        assert_eq!(pattern.arity(), 0);
        assert_eq!(pattern.source(), "Look  Around");
    }

    #[test]
    fn non_ascii_letters_keep_their_case() {
        let pattern = Pattern::parse("Öffne TÜR").unwrap();
        assert_eq!(
            pattern.tokens(),
            &[
                Token::Literal("Öffne".to_string()),
                Token::Literal("tÜr".to_string())
            ]
        );
    }

    #[test]
    fn slots_and_rest_slots() {
        let pattern = Pattern::parse("put <thing> in <container...>").unwrap();
        assert_eq!(pattern.arity(), 2);
        assert_eq!(
            pattern.tokens()[1],
            Token::Slot {
                name: "thing".to_string(),
                rest: false
            }
        );
        assert_eq!(
            pattern.tokens()[3],
            Token::Slot {
                name: "container".to_string(),
                rest: true
            }
        );
    }

    #[test]
    fn rejects_malformed_patterns() {
        for source in ["", "   ", "take <>", "take <thing", "take <a...> now", "x<y>", "<...>"] {
            let err = Pattern::parse(source).unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidPattern { .. }),
                "{source:?} gave {err}"
            );
        }
    }
}
