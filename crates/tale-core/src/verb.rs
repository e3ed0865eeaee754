use std::fmt;
use std::rc::Rc;

use crate::entity::EntityId;
use crate::error::{CoreError, CoreResult};
use crate::pattern::Pattern;
use crate::scope::Scope;

/// The executable part of a verb: called with the bound arguments in slot order.
pub type VerbBody = Rc<dyn Fn(&mut Scope<'_>, &[EntityId]) -> CoreResult<()>>;

/// A named action with one or more invocation patterns.
#[derive(Clone)]
pub struct Verb {
    names: Vec<String>,
    patterns: Vec<Pattern>,
    body: VerbBody,
}

impl Verb {
    /// Create a verb, compiling each of its names into a pattern.
    pub fn new<I, S, F>(names: I, body: F) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&mut Scope<'_>, &[EntityId]) -> CoreResult<()> + 'static,
    {
        Self::with_body(names, Rc::new(body))
    }

    /// Create a verb around an existing shared body.
    pub fn with_body<I, S>(names: I, body: VerbBody) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(CoreError::InvalidPattern {
                pattern: String::new(),
                reason: "verb has no names".to_string(),
            });
        }
        let patterns = names
            .iter()
            .map(|name| Pattern::parse(name))
            .collect::<CoreResult<Vec<_>>>()?;
        Ok(Self {
            names,
            patterns,
            body,
        })
    }

    /// A verb whose body does nothing. Mostly useful for tests.
    pub fn noop<I, S>(names: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names, |_, _| Ok(()))
    }

    /// The invocation names, in declaration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The first name, used when reporting which verb ran.
    pub fn name(&self) -> &str {
        &self.names[0]
    }

    /// The compiled patterns, one per name.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// A handle to the body.
    pub fn body(&self) -> VerbBody {
        Rc::clone(&self.body)
    }
}

impl fmt::Debug for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verb").field("names", &self.names).finish()
    }
}
