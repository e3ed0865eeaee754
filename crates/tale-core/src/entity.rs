use std::borrow::Borrow;
use std::fmt;
use std::rc::Rc;

use crate::context::Context;
use crate::direction::Exits;

/// Author-chosen identifier, unique across every room, object and the player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
    /// Wrap an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for EntityId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EntityId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// What kind of node an entity is in the world tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    /// A place the player can stand in, with exits to other rooms.
    Room {
        /// Directed exits to other rooms.
        exits: Exits,
    },
    /// A thing inside a room, another object, or the player.
    Object,
    /// The player; its children are the player's holdings.
    Player,
}

/// Replacement for the default `objects()` visibility query of one entity.
pub type ObjectsQuery = Rc<dyn for<'s> Fn(Context<'s>) -> Vec<Context<'s>>>;

/// Per-entity context behavior, fixed when the entity is constructed.
///
/// Overrides apply to the entity that carries them only; its children keep
/// their own behavior.
#[derive(Clone, Default)]
pub struct Behavior {
    objects: Option<ObjectsQuery>,
}

impl Behavior {
    /// Behavior with a custom `objects()` query.
    pub fn with_objects(query: ObjectsQuery) -> Self {
        Self {
            objects: Some(query),
        }
    }

    /// The custom `objects()` query, if one was supplied.
    pub fn objects(&self) -> Option<&ObjectsQuery> {
        self.objects.as_ref()
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Behavior")
            .field("objects", &self.objects.as_ref().map(|_| "<override>"))
            .finish()
    }
}

/// A named node of the world tree: a room, an object, or the player.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Extra names the command matcher recognises.
    pub aliases: Vec<String>,
    /// Room, object, or player.
    pub kind: EntityKind,
    pub(crate) children: Vec<EntityId>,
    behavior: Behavior,
}

impl Entity {
    /// Create an object.
    pub fn object(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self::with_kind(id.into(), name, EntityKind::Object)
    }

    /// Create a room without exits.
    pub fn room(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self::with_kind(
            id.into(),
            name,
            EntityKind::Room {
                exits: Exits::new(),
            },
        )
    }

    /// Create the player entity.
    pub fn player(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self::with_kind(id.into(), name, EntityKind::Player)
    }

    fn with_kind(id: EntityId, name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            aliases: Vec::new(),
            kind,
            children: Vec::new(),
            behavior: Behavior::default(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add an alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Set the context behavior.
    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Owned children in declaration order.
    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    /// The context behavior.
    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// True for rooms.
    pub fn is_room(&self) -> bool {
        matches!(self.kind, EntityKind::Room { .. })
    }

    /// True for objects.
    pub fn is_object(&self) -> bool {
        self.kind == EntityKind::Object
    }

    /// Room exits, or `None` if this entity is not a room.
    pub fn exits(&self) -> Option<&Exits> {
        match &self.kind {
            EntityKind::Room { exits } => Some(exits),
            _ => None,
        }
    }

    /// Mutable room exits, or `None` if this entity is not a room.
    pub fn exits_mut(&mut self) -> Option<&mut Exits> {
        match &mut self.kind {
            EntityKind::Room { exits } => Some(exits),
            _ => None,
        }
    }

    /// True when `phrase` is this entity's id, name, or one of its aliases.
    ///
    /// Comparison ignores ASCII case.
    pub fn matches_phrase(&self, phrase: &str) -> bool {
        self.id.as_str().eq_ignore_ascii_case(phrase)
            || self.name.eq_ignore_ascii_case(phrase)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(phrase))
    }
}
