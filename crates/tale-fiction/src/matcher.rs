//! Verb pattern matching against the visible-object vocabulary.

use std::fmt;

use tale_core::{Entity, EntityId, Story, Token, Verb, VerbBody};

use crate::config::VocabularyScope;

/// Leading words ignored when naming an object ("take the key").
const ARTICLES: &[&str] = &["the", "a", "an"];

/// Objects that verb arguments may bind to, in priority order.
///
/// Built fresh for every input line so it always reflects the current tree.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary<'s> {
    entries: Vec<&'s Entity>,
}

impl<'s> Vocabulary<'s> {
    /// Wrap an explicit list of entries.
    pub fn new(entries: Vec<&'s Entity>) -> Self {
        Self { entries }
    }

    /// The vocabulary of `story` for the given scope.
    ///
    /// The player's holdings always come last so that held objects stay
    /// nameable wherever the player is.
    pub fn for_story(story: &'s Story, scope: VocabularyScope) -> Self {
        let mut entries = match scope {
            VocabularyScope::Story => story.objects(),
            VocabularyScope::Location => story
                .location_context()
                .map(|room| room.child_objects().iter().map(|c| c.entity()).collect())
                .unwrap_or_default(),
        };
        entries.extend(
            story
                .player_context()
                .child_objects()
                .iter()
                .map(|c| c.entity()),
        );
        Self { entries }
    }

    /// The entries in order.
    pub fn entries(&self) -> &[&'s Entity] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing can be named.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first entry named by `phrase` (id, name, or alias).
    pub fn resolve(&self, phrase: &str) -> Option<&'s Entity> {
        self.entries.iter().copied().find(|e| e.matches_phrase(phrase))
    }

    /// Resolve a span of input words, retrying without a leading article.
    fn resolve_words(&self, words: &[&str]) -> Option<&'s Entity> {
        if words.is_empty() {
            return None;
        }
        self.resolve(&words.join(" ")).or_else(|| match words {
            [first, rest @ ..] if !rest.is_empty() && is_article(first) => {
                self.resolve(&rest.join(" "))
            }
            _ => None,
        })
    }
}

fn is_article(word: &str) -> bool {
    ARTICLES.iter().any(|a| a.eq_ignore_ascii_case(word))
}

/// A successful match: which verb, which pattern, and the bound arguments.
#[derive(Clone)]
pub struct MatchResult {
    /// Name of the matched verb.
    pub verb: String,
    /// Source text of the pattern that matched.
    pub pattern: String,
    /// Bound objects in slot order.
    pub args: Vec<EntityId>,
    /// The verb's body.
    pub body: VerbBody,
}

impl fmt::Debug for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchResult")
            .field("verb", &self.verb)
            .field("pattern", &self.pattern)
            .field("args", &self.args)
            .finish()
    }
}

/// One verb's patterns compiled against a vocabulary.
///
/// Matching is pure: it reads the vocabulary and the input and never
/// touches the story, so repeated calls give equal results.
pub struct Matcher<'v, 's> {
    verb: &'v Verb,
    vocabulary: &'v Vocabulary<'s>,
}

impl<'v, 's> Matcher<'v, 's> {
    /// Pair a verb with the vocabulary of the current input line.
    pub fn new(verb: &'v Verb, vocabulary: &'v Vocabulary<'s>) -> Self {
        Self { verb, vocabulary }
    }

    /// The verb being matched.
    pub fn verb(&self) -> &'v Verb {
        self.verb
    }

    /// True if any of the verb's patterns consumes the whole input.
    pub fn matches(&self, input: &str) -> bool {
        self.resolve(input).is_some()
    }

    /// Match the input, trying the verb's patterns in declaration order.
    pub fn resolve(&self, input: &str) -> Option<MatchResult> {
        let words: Vec<&str> = input.split_whitespace().collect();
        self.verb.patterns().iter().find_map(|pattern| {
            let mut args = Vec::with_capacity(pattern.arity());
            bind(pattern.tokens(), &words, self.vocabulary, &mut args).then(|| MatchResult {
                verb: self.verb.name().to_string(),
                pattern: pattern.source().to_string(),
                args,
                body: self.verb.body(),
            })
        })
    }
}

/// Bind `tokens` to all of `words`, pushing slot bindings onto `args`.
///
/// Slots try the shortest resolvable span first and backtrack when the rest
/// of the pattern fails.
fn bind(
    tokens: &[Token],
    words: &[&str],
    vocabulary: &Vocabulary<'_>,
    args: &mut Vec<EntityId>,
) -> bool {
    let Some((token, rest)) = tokens.split_first() else {
        return words.is_empty();
    };

    match token {
        Token::Literal(literal) => match words.split_first() {
            Some((word, remaining)) if word.eq_ignore_ascii_case(literal) => {
                bind(rest, remaining, vocabulary, args)
            }
            _ => false,
        },
        Token::Slot { rest: true, .. } => match vocabulary.resolve_words(words) {
            Some(entity) => {
                args.push(entity.id.clone());
                if bind(rest, &[], vocabulary, args) {
                    return true;
                }
                args.pop();
                false
            }
            None => false,
        },
        Token::Slot { rest: false, .. } => {
            for len in 1..=words.len() {
                let (span, remaining) = words.split_at(len);
                if let Some(entity) = vocabulary.resolve_words(span) {
                    args.push(entity.id.clone());
                    if bind(rest, remaining, vocabulary, args) {
                        return true;
                    }
                    args.pop();
                }
            }
            false
        }
    }
}
