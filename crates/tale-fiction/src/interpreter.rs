//! Turning one line of input into one executed verb.

use tale_core::{EntityId, Scope, Story};
use tracing::debug;

use crate::config::InterpreterConfig;
use crate::error::{FictionError, FictionResult};
use crate::matcher::{MatchResult, Matcher, Vocabulary};

/// What happened to one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A verb matched and its body ran to completion.
    Executed {
        /// Name of the verb that ran.
        verb: String,
        /// The objects bound to its slots.
        args: Vec<EntityId>,
    },
    /// No verb matched. The fallback message was written and nothing else
    /// changed.
    Unrecognized,
}

impl Outcome {
    /// True for [`Outcome::Executed`].
    pub fn is_executed(&self) -> bool {
        matches!(self, Self::Executed { .. })
    }
}

/// Owns a story and interprets player commands against it.
pub struct Interpreter {
    story: Story,
    config: InterpreterConfig,
}

impl Interpreter {
    /// Interpret commands with the default configuration.
    pub fn new(story: Story) -> Self {
        Self::with_config(story, InterpreterConfig::default())
    }

    /// Interpret commands with a custom configuration.
    pub fn with_config(story: Story, config: InterpreterConfig) -> Self {
        Self { story, config }
    }

    /// The story being played.
    pub fn story(&self) -> &Story {
        &self.story
    }

    /// Mutable access to the story, for drivers and tests.
    pub fn story_mut(&mut self) -> &mut Story {
        &mut self.story
    }

    /// Give the story back.
    pub fn into_story(self) -> Story {
        self.story
    }

    /// The active configuration.
    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Find the verb that would run for `input` without running it.
    ///
    /// Verbs are tried in registration order against a vocabulary built
    /// from the current tree; the first one that accepts the input wins.
    pub fn resolve(&self, input: &str) -> Option<MatchResult> {
        let vocabulary = Vocabulary::for_story(&self.story, self.config.scope);
        self.story
            .verbs()
            .iter()
            .find_map(|verb| Matcher::new(verb, &vocabulary).resolve(input))
    }

    /// Interpret one line of input.
    ///
    /// A verb body error is returned as [`FictionError::Verb`]; whatever the
    /// body changed before failing is kept.
    pub fn interpret(&mut self, input: &str) -> FictionResult<Outcome> {
        let Some(found) = self.resolve(input) else {
            debug!(input, "no verb matched");
            self.story.write(self.config.fallback.clone());
            return Ok(Outcome::Unrecognized);
        };

        debug!(input, verb = %found.verb, pattern = %found.pattern, args = ?found.args, "executing verb");
        let mut scope = Scope::new(&mut self.story);
        (found.body)(&mut scope, &found.args).map_err(|source| FictionError::Verb {
            verb: found.verb.clone(),
            source,
        })?;

        Ok(Outcome::Executed {
            verb: found.verb,
            args: found.args,
        })
    }

    /// Whether a verb asked to end the session.
    pub fn is_finished(&self) -> bool {
        self.story.quit_requested()
    }

    /// Take the output written since the last drain.
    pub fn drain_output(&mut self) -> Vec<String> {
        self.story.drain_output()
    }
}
