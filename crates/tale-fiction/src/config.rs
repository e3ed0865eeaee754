//! Interpreter configuration.

/// Message written when no verb accepts the input.
pub const DEFAULT_FALLBACK: &str = "What do you mean?";

/// Which objects the matcher may bind verb arguments to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VocabularyScope {
    /// Every object in every room, then the player's holdings.
    #[default]
    Story,
    /// What is visible from the player's room, then the player's holdings.
    Location,
}

impl VocabularyScope {
    /// Parse a scope name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "story" => Some(Self::Story),
            "location" | "room" => Some(Self::Location),
            _ => None,
        }
    }
}

/// Configuration for an [`Interpreter`](crate::Interpreter).
#[derive(Debug, Clone)]
pub struct InterpreterConfig {
    /// Written when no verb matches.
    pub fallback: String,
    /// Vocabulary used for argument binding.
    pub scope: VocabularyScope,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            fallback: DEFAULT_FALLBACK.to_string(),
            scope: VocabularyScope::default(),
        }
    }
}

impl InterpreterConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback message.
    pub fn with_fallback(mut self, message: impl Into<String>) -> Self {
        self.fallback = message.into();
        self
    }

    /// Set the vocabulary scope.
    pub fn with_scope(mut self, scope: VocabularyScope) -> Self {
        self.scope = scope;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = InterpreterConfig::new();
        assert_eq!(config.fallback, "What do you mean?");
        assert_eq!(config.scope, VocabularyScope::Story);
    }

    #[test]
    fn builder_methods() {
        let config = InterpreterConfig::new()
            .with_fallback("Huh?")
            .with_scope(VocabularyScope::Location);
        assert_eq!(config.fallback, "Huh?");
        assert_eq!(config.scope, VocabularyScope::Location);
    }

    #[test]
    fn parse_scope() {
        assert_eq!(VocabularyScope::parse("Story"), Some(VocabularyScope::Story));
        assert_eq!(VocabularyScope::parse("room"), Some(VocabularyScope::Location));
        assert_eq!(VocabularyScope::parse("world"), None);
    }
}
