//! Declarative story construction.
//!
//! ```
//! use tale_core::Story;
//!
//! let story = Story::builder()
//!     .room("hall", "Hall", |room| {
//!         room.description("A draughty hall.")
//!             .north_to("garden")
//!             .object("box", "Box", |b| b.object("key", "Key", |k| k))
//!     })
//!     .room("garden", "Garden", |room| room)
//!     .verb(["look"], |scope, _| {
//!         scope.write("You look around.");
//!         Ok(())
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(story.objects().len(), 2);
//! ```

use std::rc::Rc;

use tracing::debug;

use crate::context::Context;
use crate::direction::Direction;
use crate::entity::{Behavior, Entity, EntityId};
use crate::error::{CoreError, CoreResult};
use crate::scope::Scope;
use crate::story::{DEFAULT_PLAYER_ID, DEFAULT_PLAYER_NAME, Story};
use crate::verb::Verb;

/// Collects room, object and verb declarations, then validates them all at
/// once in [`StoryBuilder::build`].
#[derive(Default)]
pub struct StoryBuilder {
    title: String,
    player: Option<(EntityId, String)>,
    start: Option<EntityId>,
    rooms: Vec<RoomBuilder>,
    verbs: Vec<Verb>,
    error: Option<CoreError>,
}

impl StoryBuilder {
    /// An empty declaration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the story title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replace the default player.
    pub fn player(mut self, id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        self.player = Some((id.into(), name.into()));
        self
    }

    /// Start the player in `room` instead of the first declared room.
    pub fn start(mut self, room: impl Into<EntityId>) -> Self {
        self.start = Some(room.into());
        self
    }

    /// Declare a room.
    pub fn room<F>(mut self, id: impl Into<EntityId>, name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(RoomBuilder) -> RoomBuilder,
    {
        self.rooms.push(f(RoomBuilder::new(id.into(), name.into())));
        self
    }

    /// Declare a verb. A bad pattern is reported by [`StoryBuilder::build`].
    pub fn verb<I, S, F>(self, names: I, body: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&mut Scope<'_>, &[EntityId]) -> CoreResult<()> + 'static,
    {
        match Verb::new(names, body) {
            Ok(verb) => self.add_verb(verb),
            Err(err) => self.fail(err),
        }
    }

    /// Register an already compiled verb.
    pub fn add_verb(mut self, verb: Verb) -> Self {
        self.verbs.push(verb);
        self
    }

    /// Remember the first declaration error.
    pub fn fail(mut self, err: CoreError) -> Self {
        if self.error.is_none() {
            self.error = Some(err);
        }
        self
    }

    /// Validate every declaration and assemble the story.
    ///
    /// Fails on the first duplicate id, unknown exit target, unknown start
    /// room, or bad verb pattern. No partial story is returned.
    pub fn build(self) -> CoreResult<Story> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let (player_id, player_name) = self.player.unwrap_or_else(|| {
            (
                EntityId::from(DEFAULT_PLAYER_ID),
                DEFAULT_PLAYER_NAME.to_string(),
            )
        });
        let mut story = Story::with_player(self.title, Entity::player(player_id, player_name));

        let mut exits = Vec::new();
        for room in self.rooms {
            let id = room.entity.id.clone();
            story.insert_room(room.entity)?;
            for object in room.objects {
                object.attach_to(&id, &mut story)?;
            }
            exits.extend(room.exits.into_iter().map(|(d, t)| (id.clone(), d, t)));
        }
        for (room, direction, target) in exits {
            story.set_exit(&room, direction, &target)?;
        }

        let start = self
            .start
            .or_else(|| story.rooms().first().map(|room| room.id.clone()));
        if let Some(start) = start {
            story.set_location(&start)?;
        }

        for verb in self.verbs {
            story.add_verb(verb);
        }

        debug!(
            title = story.title(),
            rooms = story.rooms().len(),
            objects = story.objects().len(),
            verbs = story.verbs().len(),
            "story built"
        );
        Ok(story)
    }
}

fn behavior_from<F>(query: F) -> Behavior
where
    F: for<'s> Fn(Context<'s>) -> Vec<Context<'s>> + 'static,
{
    Behavior::with_objects(Rc::new(query))
}

/// Declaration of one room.
pub struct RoomBuilder {
    entity: Entity,
    objects: Vec<ObjectBuilder>,
    exits: Vec<(Direction, EntityId)>,
}

impl RoomBuilder {
    fn new(id: EntityId, name: String) -> Self {
        Self {
            entity: Entity::room(id, name),
            objects: Vec::new(),
            exits: Vec::new(),
        }
    }

    /// Set the description.
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.entity = self.entity.with_description(text);
        self
    }

    /// Add an alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.entity = self.entity.with_alias(alias);
        self
    }

    /// Declare an exit.
    pub fn exit(mut self, direction: Direction, room: impl Into<EntityId>) -> Self {
        self.exits.push((direction, room.into()));
        self
    }

    /// Declare the exit to the north.
    pub fn north_to(self, room: impl Into<EntityId>) -> Self {
        self.exit(Direction::North, room)
    }

    /// Declare the exit to the east.
    pub fn east_to(self, room: impl Into<EntityId>) -> Self {
        self.exit(Direction::East, room)
    }

    /// Declare the exit to the south.
    pub fn south_to(self, room: impl Into<EntityId>) -> Self {
        self.exit(Direction::South, room)
    }

    /// Declare the exit to the west.
    pub fn west_to(self, room: impl Into<EntityId>) -> Self {
        self.exit(Direction::West, room)
    }

    /// Declare an object lying in the room.
    pub fn object<F>(mut self, id: impl Into<EntityId>, name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(ObjectBuilder) -> ObjectBuilder,
    {
        self.objects.push(f(ObjectBuilder::new(id.into(), name.into())));
        self
    }

    /// Replace the room's default `objects()` query.
    pub fn objects_with<F>(mut self, query: F) -> Self
    where
        F: for<'s> Fn(Context<'s>) -> Vec<Context<'s>> + 'static,
    {
        self.entity = self.entity.with_behavior(behavior_from(query));
        self
    }
}

/// Declaration of one object and the objects inside it.
pub struct ObjectBuilder {
    entity: Entity,
    objects: Vec<ObjectBuilder>,
}

impl ObjectBuilder {
    fn new(id: EntityId, name: String) -> Self {
        Self {
            entity: Entity::object(id, name),
            objects: Vec::new(),
        }
    }

    /// Set the description.
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.entity = self.entity.with_description(text);
        self
    }

    /// Add an alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.entity = self.entity.with_alias(alias);
        self
    }

    /// Declare an object inside this one.
    pub fn object<F>(mut self, id: impl Into<EntityId>, name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(ObjectBuilder) -> ObjectBuilder,
    {
        self.objects.push(f(ObjectBuilder::new(id.into(), name.into())));
        self
    }

    /// Replace this object's default `objects()` query.
    pub fn objects_with<F>(mut self, query: F) -> Self
    where
        F: for<'s> Fn(Context<'s>) -> Vec<Context<'s>> + 'static,
    {
        self.entity = self.entity.with_behavior(behavior_from(query));
        self
    }

    fn attach_to(self, parent: &EntityId, story: &mut Story) -> CoreResult<()> {
        let id = self.entity.id.clone();
        story.attach(parent, self.entity)?;
        for child in self.objects {
            child.attach_to(&id, story)?;
        }
        Ok(())
    }
}
