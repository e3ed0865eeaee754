use tracing::trace;

use crate::context::Context;
use crate::direction::Direction;
use crate::entity::Entity;
use crate::error::CoreResult;
use crate::story::Story;

/// The top-level context a verb body runs in.
///
/// A scope is not tied to any room or object. It gives a verb body global
/// access to the story, the player, and the output sink.
pub struct Scope<'a> {
    story: &'a mut Story,
}

impl<'a> Scope<'a> {
    /// Open a scope over the whole story.
    pub fn new(story: &'a mut Story) -> Self {
        Self { story }
    }

    /// The story, read-only.
    pub fn story(&self) -> &Story {
        self.story
    }

    /// The story, for mutation.
    pub fn story_mut(&mut self) -> &mut Story {
        self.story
    }

    /// The player entity.
    pub fn player(&self) -> &Entity {
        self.story.player()
    }

    /// Context of the player.
    pub fn inventory(&self) -> Context<'_> {
        self.story.player_context()
    }

    /// Context of the room the player stands in.
    pub fn here(&self) -> Option<Context<'_>> {
        self.story.location_context()
    }

    /// Context of any entity by id.
    pub fn context(&self, id: impl AsRef<str>) -> Option<Context<'_>> {
        self.story.context(id)
    }

    /// Display name of an entity, falling back to its id.
    pub fn name_of(&self, id: impl AsRef<str>) -> String {
        let id = id.as_ref();
        self.story
            .get_entity(id)
            .map_or_else(|| id.to_string(), |e| e.name.clone())
    }

    /// Write a line of output.
    pub fn write(&mut self, text: impl Into<String>) {
        self.story.write(text);
    }

    /// Move an object under a new owner.
    pub fn move_object(&mut self, id: impl AsRef<str>, owner: impl AsRef<str>) -> CoreResult<()> {
        self.story.move_object(id, owner)
    }

    /// True if the player can reach `id`: it is in the current room or held.
    pub fn can_reach(&self, id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        self.here().is_some_and(|room| room.contains(id)) || self.inventory().contains(id)
    }

    /// Follow the exit in `direction` from the current room.
    ///
    /// Returns `false` and leaves the player in place when there is no exit.
    pub fn go(&mut self, direction: Direction) -> CoreResult<bool> {
        let target = self
            .story
            .location()
            .and_then(|room| room.exits())
            .and_then(|exits| exits.get(direction))
            .cloned();
        match target {
            Some(room) => {
                trace!(%direction, room = room.as_str(), "following exit");
                self.story.set_location(room)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Ask the driver to stop after this command.
    pub fn quit(&mut self) {
        self.story.request_quit();
    }
}
