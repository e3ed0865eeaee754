use crate::entity::EntityId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when building or mutating a story.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Two entities (rooms, objects, or the player) share an identifier.
    #[error("duplicate id: \"{0}\"")]
    DuplicateId(EntityId),

    /// An exit or start location names a room that was never declared.
    #[error("unknown room: \"{0}\"")]
    UnknownRoom(EntityId),

    /// The requested entity does not exist in the story.
    #[error("entity not found: \"{0}\"")]
    EntityNotFound(EntityId),

    /// The entity exists but is not a room.
    #[error("not a room: \"{0}\"")]
    NotARoom(EntityId),

    /// The entity exists but is not an object.
    #[error("not an object: \"{0}\"")]
    NotAnObject(EntityId),

    /// Moving an entity would make it its own ancestor.
    #[error("cannot move \"{entity}\" into \"{target}\": it would contain itself")]
    WouldCycle {
        /// The entity being moved.
        entity: EntityId,
        /// The requested new owner.
        target: EntityId,
    },

    /// A verb pattern could not be compiled.
    #[error("invalid pattern \"{pattern}\": {reason}")]
    InvalidPattern {
        /// The pattern source text.
        pattern: String,
        /// Why compilation failed.
        reason: String,
    },

    /// A verb body gave up with an author-supplied message.
    #[error("{0}")]
    Action(String),
}

impl CoreError {
    /// Build an [`CoreError::Action`] from any message.
    pub fn action(message: impl Into<String>) -> Self {
        Self::Action(message.into())
    }
}
