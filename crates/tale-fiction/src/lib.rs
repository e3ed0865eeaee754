//! Command interpretation for Tale stories.
//!
//! An [`Interpreter`] owns a [`tale_core::Story`] and turns each line of
//! player input into at most one verb execution. Verbs are tried in the
//! order they were registered; the first whose pattern matches the whole
//! input, with every slot bound to a nameable object, runs. Input nothing
//! matches writes the configured fallback message and changes nothing else.
//!
//! Stories come from code ([`tale_core::StoryBuilder`] plus
//! [`StandardVerbs`]) or from JSON files via [`load_story`].

/// Interpreter configuration.
pub mod config;
/// Error types for the fiction engine.
pub mod error;
/// Line-by-line command interpretation.
pub mod interpreter;
/// JSON story files.
pub mod loader;
/// Verb pattern matching.
pub mod matcher;
/// The standard verb set.
pub mod stdlib;

pub use config::{DEFAULT_FALLBACK, InterpreterConfig, VocabularyScope};
pub use error::{FictionError, FictionResult};
pub use interpreter::{Interpreter, Outcome};
pub use loader::{StoryFile, load_story, parse_story};
pub use matcher::{MatchResult, Matcher, Vocabulary};
pub use stdlib::{StandardVerbs, standard_verbs};
