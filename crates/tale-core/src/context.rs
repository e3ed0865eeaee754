//! Visibility-aware views over entities.

use std::fmt;

use crate::entity::{Entity, EntityId};
use crate::story::Story;

/// A view of one entity together with the story it is attached to.
///
/// Contexts are handed out by [`Story`] and hold a shared borrow of it, so
/// the story reference is fixed for the life of the view and never has to
/// be found by walking the tree.
#[derive(Clone, Copy)]
pub struct Context<'s> {
    story: &'s Story,
    entity: &'s Entity,
}

/// Something [`Context::contains`] can look for: an id or another context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target<'t>(&'t str);

impl<'t> From<&'t str> for Target<'t> {
    fn from(id: &'t str) -> Self {
        Self(id)
    }
}

impl<'t> From<&'t EntityId> for Target<'t> {
    fn from(id: &'t EntityId) -> Self {
        Self(id.as_str())
    }
}

impl<'t> From<Context<'t>> for Target<'t> {
    fn from(context: Context<'t>) -> Self {
        Self(context.id().as_str())
    }
}

impl<'t> From<&Context<'t>> for Target<'t> {
    fn from(context: &Context<'t>) -> Self {
        Self(context.id().as_str())
    }
}

impl<'s> Context<'s> {
    pub(crate) fn new(story: &'s Story, entity: &'s Entity) -> Self {
        Self { story, entity }
    }

    /// The entity's id.
    pub fn id(&self) -> &'s EntityId {
        &self.entity.id
    }

    /// The entity's display name.
    pub fn name(&self) -> &'s str {
        &self.entity.name
    }

    /// The entity's description, if it has one.
    pub fn description(&self) -> Option<&'s str> {
        self.entity.description.as_deref()
    }

    /// The entity this context is bound to.
    pub fn entity(&self) -> &'s Entity {
        self.entity
    }

    /// The story the entity belongs to.
    pub fn story(&self) -> &'s Story {
        self.story
    }

    /// Direct children in declaration order, unfiltered.
    pub fn children(&self) -> Vec<Context<'s>> {
        self.entity
            .children()
            .iter()
            .filter_map(|id| self.story.context(id))
            .collect()
    }

    /// Objects this entity currently considers visible.
    ///
    /// Uses the entity's override when it has one. Otherwise every direct
    /// child followed by that child's own `objects()`.
    pub fn objects(&self) -> Vec<Context<'s>> {
        match self.entity.behavior().objects() {
            Some(query) => query(*self),
            None => self.child_objects(),
        }
    }

    /// Each direct child followed by that child's `objects()`.
    ///
    /// This is the vocabulary "starting here"; the entity's own override is
    /// not consulted, only its children's.
    pub fn child_objects(&self) -> Vec<Context<'s>> {
        let mut visible = Vec::new();
        for child in self.children() {
            visible.push(child);
            visible.extend(child.objects());
        }
        visible
    }

    /// True if `target` appears anywhere in [`Context::child_objects`].
    pub fn contains<'t>(&self, target: impl Into<Target<'t>>) -> bool {
        let Target(id) = target.into();
        self.child_objects().iter().any(|c| c.id() == id)
    }
}

impl PartialEq for Context<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.story, other.story) && self.entity.id == other.entity.id
    }
}

impl Eq for Context<'_> {}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Context").field(&self.entity.id).finish()
    }
}
