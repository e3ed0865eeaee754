use std::collections::HashMap;

use tracing::trace;

use crate::builder::StoryBuilder;
use crate::context::Context;
use crate::direction::{Direction, Exits};
use crate::entity::{Entity, EntityId};
use crate::error::{CoreError, CoreResult};
use crate::output::Output;
use crate::verb::Verb;

/// Id given to the player when the author does not supply one.
pub const DEFAULT_PLAYER_ID: &str = "player";
/// Name given to the player when the author does not supply one.
pub const DEFAULT_PLAYER_NAME: &str = "yourself";

/// The root registry. Owns every room and object, the verbs, the player and
/// the output sink.
///
/// Entities live in an arena keyed by id. Links only go from parent to
/// child; [`Story::owner_of`] finds the way back up by scanning.
#[derive(Debug)]
pub struct Story {
    title: String,
    entities: HashMap<EntityId, Entity>,
    rooms: Vec<EntityId>,
    verbs: Vec<Verb>,
    player: Entity,
    location: Option<EntityId>,
    output: Output,
    quit: bool,
}

impl Default for Story {
    fn default() -> Self {
        Self::new()
    }
}

impl Story {
    /// An empty story with the default player.
    pub fn new() -> Self {
        Self::with_player(
            String::new(),
            Entity::player(DEFAULT_PLAYER_ID, DEFAULT_PLAYER_NAME),
        )
    }

    /// Start declaring a story.
    pub fn builder() -> StoryBuilder {
        StoryBuilder::new()
    }

    pub(crate) fn with_player(title: String, player: Entity) -> Self {
        Self {
            title,
            entities: HashMap::new(),
            rooms: Vec::new(),
            verbs: Vec::new(),
            player,
            location: None,
            output: Output::new(),
            quit: false,
        }
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    fn insert(&mut self, entity: Entity) -> CoreResult<()> {
        if self.lookup(entity.id.as_str()).is_some() {
            return Err(CoreError::DuplicateId(entity.id));
        }
        self.entities.insert(entity.id.clone(), entity);
        Ok(())
    }

    pub(crate) fn insert_room(&mut self, room: Entity) -> CoreResult<()> {
        let id = room.id.clone();
        self.insert(room)?;
        self.rooms.push(id);
        Ok(())
    }

    /// Register `entity` and append it to the children of `parent`.
    pub(crate) fn attach(&mut self, parent: &EntityId, entity: Entity) -> CoreResult<()> {
        if self.lookup(parent.as_str()).is_none() {
            return Err(CoreError::EntityNotFound(parent.clone()));
        }
        let id = entity.id.clone();
        self.insert(entity)?;
        if let Some(owner) = self.lookup_mut(parent.as_str()) {
            owner.children.push(id);
        }
        Ok(())
    }

    /// Register a verb after every verb declared so far.
    pub fn add_verb(&mut self, verb: Verb) {
        self.verbs.push(verb);
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    fn lookup(&self, id: &str) -> Option<&Entity> {
        if self.player.id == id {
            Some(&self.player)
        } else {
            self.entities.get(id)
        }
    }

    fn lookup_mut(&mut self, id: &str) -> Option<&mut Entity> {
        if self.player.id == id {
            Some(&mut self.player)
        } else {
            self.entities.get_mut(id)
        }
    }

    /// The story title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Any entity (room, object or player) by id.
    pub fn get_entity(&self, id: impl AsRef<str>) -> Option<&Entity> {
        self.lookup(id.as_ref())
    }

    /// A room by id. `None` if absent or not a room.
    pub fn get_room(&self, id: impl AsRef<str>) -> Option<&Entity> {
        self.lookup(id.as_ref()).filter(|e| e.is_room())
    }

    /// An object by id. `None` if absent or not an object.
    pub fn get_object(&self, id: impl AsRef<str>) -> Option<&Entity> {
        self.lookup(id.as_ref()).filter(|e| e.is_object())
    }

    /// Context of any entity.
    pub fn context(&self, id: impl AsRef<str>) -> Option<Context<'_>> {
        self.get_entity(id).map(|e| Context::new(self, e))
    }

    /// Context of a room.
    pub fn room_context(&self, id: impl AsRef<str>) -> Option<Context<'_>> {
        self.get_room(id).map(|e| Context::new(self, e))
    }

    /// Context of an object.
    pub fn object_context(&self, id: impl AsRef<str>) -> Option<Context<'_>> {
        self.get_object(id).map(|e| Context::new(self, e))
    }

    /// Rooms in declaration order.
    pub fn rooms(&self) -> Vec<&Entity> {
        self.rooms
            .iter()
            .filter_map(|id| self.entities.get(id))
            .collect()
    }

    /// Every object across every room: a pre-order walk of each room in
    /// declaration order.
    ///
    /// Derived on each call, so it always reflects the current tree. The
    /// player's holdings are not part of any room and are not included.
    pub fn objects(&self) -> Vec<&Entity> {
        let mut flat = Vec::new();
        for room in &self.rooms {
            self.collect_descendants(room.as_str(), &mut flat);
        }
        flat
    }

    /// Every descendant of an entity in pre-order.
    pub fn descendants(&self, id: impl AsRef<str>) -> Vec<&Entity> {
        let mut flat = Vec::new();
        self.collect_descendants(id.as_ref(), &mut flat);
        flat
    }

    fn collect_descendants<'a>(&'a self, id: &str, out: &mut Vec<&'a Entity>) {
        let Some(entity) = self.lookup(id) else {
            return;
        };
        for child_id in &entity.children {
            if let Some(child) = self.lookup(child_id.as_str()) {
                out.push(child);
                self.collect_descendants(child_id.as_str(), out);
            }
        }
    }

    /// The entity whose children include `id`.
    pub fn owner_of(&self, id: impl AsRef<str>) -> Option<&Entity> {
        let id = id.as_ref();
        self.entities
            .values()
            .chain(std::iter::once(&self.player))
            .find(|e| e.children.iter().any(|c| c == id))
    }

    /// Registered verbs in declaration order.
    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    /// The player entity.
    pub fn player(&self) -> &Entity {
        &self.player
    }

    /// Context of the player; its children are the player's holdings.
    pub fn player_context(&self) -> Context<'_> {
        Context::new(self, &self.player)
    }

    /// The room the player is in, if the story has any rooms.
    pub fn location(&self) -> Option<&Entity> {
        self.location.as_ref().and_then(|id| self.get_room(id))
    }

    /// Context of the room the player is in.
    pub fn location_context(&self) -> Option<Context<'_>> {
        self.location().map(|e| Context::new(self, e))
    }

    /// Target of the exit from `room` in `direction`.
    pub fn exit(&self, room: impl AsRef<str>, direction: Direction) -> Option<&EntityId> {
        self.get_room(room)
            .and_then(|r| r.exits())
            .and_then(|exits| exits.get(direction))
    }

    // -----------------------------------------------------------------------
    // Output
    // -----------------------------------------------------------------------

    /// Append a line to the output sink.
    pub fn write(&mut self, text: impl Into<String>) {
        self.output.write(text);
    }

    /// The output sink.
    pub fn output(&self) -> &Output {
        &self.output
    }

    /// Take every buffered output line.
    pub fn drain_output(&mut self) -> Vec<String> {
        self.output.drain()
    }

    /// Ask the driver to stop reading commands.
    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Whether a verb asked the driver to stop.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Move the player to a room.
    pub fn set_location(&mut self, room: impl AsRef<str>) -> CoreResult<()> {
        let room = room.as_ref();
        let entity = self
            .lookup(room)
            .ok_or_else(|| CoreError::UnknownRoom(room.into()))?;
        if !entity.is_room() {
            return Err(CoreError::NotARoom(entity.id.clone()));
        }
        let id = entity.id.clone();
        trace!(room, "player location changed");
        self.location = Some(id);
        Ok(())
    }

    /// Move an object (with everything inside it) under a new owner.
    ///
    /// The new owner is appended to, so the moved object becomes its last
    /// child. Refuses to move an object into itself or its own contents.
    pub fn move_object(
        &mut self,
        id: impl AsRef<str>,
        new_owner: impl AsRef<str>,
    ) -> CoreResult<()> {
        let (id, new_owner) = (id.as_ref(), new_owner.as_ref());
        let entity = self
            .lookup(id)
            .ok_or_else(|| CoreError::EntityNotFound(id.into()))?;
        if !entity.is_object() {
            return Err(CoreError::NotAnObject(entity.id.clone()));
        }
        let object_id = entity.id.clone();
        if self.lookup(new_owner).is_none() {
            return Err(CoreError::EntityNotFound(new_owner.into()));
        }
        if id == new_owner || self.descendants(id).iter().any(|e| e.id == new_owner) {
            return Err(CoreError::WouldCycle {
                entity: object_id,
                target: new_owner.into(),
            });
        }

        self.detach(&object_id);
        if let Some(owner) = self.lookup_mut(new_owner) {
            owner.children.push(object_id);
        }
        trace!(object = id, owner = new_owner, "object moved");
        Ok(())
    }

    /// Add a new childless object under `parent` at run time.
    pub fn add_object(&mut self, parent: impl AsRef<str>, object: Entity) -> CoreResult<()> {
        if !object.is_object() {
            return Err(CoreError::NotAnObject(object.id));
        }
        self.attach(&EntityId::from(parent.as_ref()), object)
    }

    /// Remove an object and everything inside it.
    ///
    /// Returns the removed entities in pre-order, the object first.
    pub fn remove_object(&mut self, id: impl AsRef<str>) -> CoreResult<Vec<Entity>> {
        let id = id.as_ref();
        let entity = self
            .get_entity(id)
            .ok_or_else(|| CoreError::EntityNotFound(id.into()))?;
        if !entity.is_object() {
            return Err(CoreError::NotAnObject(entity.id.clone()));
        }

        let mut doomed = vec![entity.id.clone()];
        doomed.extend(self.descendants(id).into_iter().map(|e| e.id.clone()));

        self.detach(&doomed[0]);
        Ok(doomed
            .iter()
            .filter_map(|id| self.entities.remove(id))
            .collect())
    }

    fn detach(&mut self, id: &EntityId) {
        let owner = self.owner_of(id).map(|o| o.id.clone());
        if let Some(owner) = owner.and_then(|o| self.lookup_mut(o.as_str())) {
            owner.children.retain(|c| c != id);
        }
    }

    /// Point an exit of `room` at another room, returning the old target.
    pub fn set_exit(
        &mut self,
        room: impl AsRef<str>,
        direction: Direction,
        target: impl AsRef<str>,
    ) -> CoreResult<Option<EntityId>> {
        let target = target.as_ref();
        if self.get_room(target).is_none() {
            return Err(CoreError::UnknownRoom(target.into()));
        }
        Ok(self.exits_mut(room.as_ref())?.set(direction, target.into()))
    }

    /// Remove an exit of `room`, returning its old target.
    pub fn clear_exit(
        &mut self,
        room: impl AsRef<str>,
        direction: Direction,
    ) -> CoreResult<Option<EntityId>> {
        Ok(self.exits_mut(room.as_ref())?.clear(direction))
    }

    fn exits_mut(&mut self, room: &str) -> CoreResult<&mut Exits> {
        let entity = self
            .lookup_mut(room)
            .ok_or_else(|| CoreError::EntityNotFound(room.into()))?;
        let id = entity.id.clone();
        entity.exits_mut().ok_or(CoreError::NotARoom(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(entities: &[&Entity]) -> Vec<String> {
        entities.iter().map(|e| e.id.to_string()).collect()
    }

    fn two_rooms() -> Story {
        Story::builder()
            .room("foo", "foo", |room| {
                room.object("obj1", "obj1", |o| o)
                    .object("obj2", "obj2", |o| o.object("obj2_1", "obj2_1", |o| o))
                    .east_to("bar")
            })
            .room("bar", "bar", |room| room.object("obj3", "obj3", |o| o))
            .build()
            .unwrap()
    }

    #[test]
    fn new_story_is_empty_with_player() {
        let story = Story::new();
        assert!(story.rooms().is_empty());
        assert!(story.verbs().is_empty());
        assert!(story.objects().is_empty());
        assert_eq!(story.player().id, DEFAULT_PLAYER_ID);
        assert!(story.location().is_none());
    }

    #[test]
    fn objects_are_flattened_in_pre_order() {
        let story = two_rooms();
        assert_eq!(ids(&story.objects()), vec!["obj1", "obj2", "obj2_1", "obj3"]);
    }

    #[test]
    fn lookups_return_none_when_absent() {
        let story = two_rooms();
        assert!(story.get_object("foo").is_none());
        assert!(story.get_room("obj1").is_none());
        assert!(story.get_room("nowhere").is_none());
        assert!(story.get_object("nothing").is_none());

        let obj = story.get_object("obj1").unwrap();
        assert_eq!(obj.name, "obj1");
        assert_eq!(story.get_room("bar").unwrap().name, "bar");
    }

    #[test]
    fn contexts_share_the_story() {
        let story = two_rooms();
        for id in ["obj1", "obj2_1"] {
            assert!(std::ptr::eq(story.object_context(id).unwrap().story(), &story));
        }
        for id in ["foo", "bar"] {
            assert!(std::ptr::eq(story.room_context(id).unwrap().story(), &story));
        }
    }

    #[test]
    fn location_defaults_to_first_room() {
        let story = two_rooms();
        assert_eq!(story.location().unwrap().id, "foo");
        assert_eq!(story.exit("foo", Direction::East).unwrap(), "bar");
        assert!(story.exit("bar", Direction::West).is_none());
    }

    #[test]
    fn move_object_carries_contents() {
        let mut story = two_rooms();
        story.move_object("obj2", "bar").unwrap();

        assert_eq!(ids(&story.objects()), vec!["obj1", "obj3", "obj2", "obj2_1"]);
        assert_eq!(story.owner_of("obj2").unwrap().id, "bar");
        assert_eq!(story.owner_of("obj2_1").unwrap().id, "obj2");
    }

    #[test]
    fn move_into_player_leaves_the_rooms() {
        let mut story = two_rooms();
        story.move_object("obj1", DEFAULT_PLAYER_ID).unwrap();

        assert_eq!(ids(&story.objects()), vec!["obj2", "obj2_1", "obj3"]);
        assert!(story.player_context().contains("obj1"));
        assert_eq!(story.owner_of("obj1").unwrap().id, DEFAULT_PLAYER_ID);
    }

    #[test]
    fn move_refuses_cycles() {
        let mut story = two_rooms();
        assert!(matches!(
            story.move_object("obj2", "obj2_1"),
            Err(CoreError::WouldCycle { .. })
        ));
        assert!(matches!(
            story.move_object("obj2", "obj2"),
            Err(CoreError::WouldCycle { .. })
        ));
        assert!(matches!(
            story.move_object("foo", "bar"),
            Err(CoreError::NotAnObject(_))
        ));
        assert!(matches!(
            story.move_object("obj1", "void"),
            Err(CoreError::EntityNotFound(_))
        ));
        // Nothing moved.
        assert_eq!(ids(&story.objects()), vec!["obj1", "obj2", "obj2_1", "obj3"]);
    }

    #[test]
    fn add_object_keeps_ids_unique() {
        let mut story = two_rooms();
        story
            .add_object("obj3", Entity::object("coin", "Coin"))
            .unwrap();
        assert_eq!(story.owner_of("coin").unwrap().id, "obj3");

        let err = story
            .add_object("bar", Entity::object("obj1", "Another"))
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateId(_)));

        let err = story
            .add_object("bar", Entity::object(DEFAULT_PLAYER_ID, "Impostor"))
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateId(_)));

        let err = story
            .add_object("bar", Entity::room("attic", "Attic"))
            .unwrap_err();
        assert!(matches!(err, CoreError::NotAnObject(_)));
    }

    #[test]
    fn remove_object_takes_the_subtree() {
        let mut story = two_rooms();
        let removed = story.remove_object("obj2").unwrap();
        assert_eq!(ids(&removed.iter().collect::<Vec<_>>()), vec!["obj2", "obj2_1"]);
        assert!(story.get_object("obj2_1").is_none());
        assert_eq!(ids(&story.objects()), vec!["obj1", "obj3"]);
    }

    #[test]
    fn exits_can_change_at_run_time() {
        let mut story = two_rooms();
        assert_eq!(
            story.set_exit("bar", Direction::West, "foo").unwrap(),
            None
        );
        assert_eq!(story.exit("bar", Direction::West).unwrap(), "foo");
        assert_eq!(
            story.clear_exit("foo", Direction::East).unwrap(),
            Some(EntityId::from("bar"))
        );
        assert!(matches!(
            story.set_exit("bar", Direction::North, "obj1"),
            Err(CoreError::UnknownRoom(_))
        ));
        assert!(matches!(
            story.clear_exit("obj1", Direction::North),
            Err(CoreError::NotARoom(_))
        ));
    }

    #[test]
    fn set_location_requires_a_room() {
        let mut story = two_rooms();
        story.set_location("bar").unwrap();
        assert_eq!(story.location_context().unwrap().id(), "bar");
        assert!(matches!(
            story.set_location("obj1"),
            Err(CoreError::NotARoom(_))
        ));
    }

    #[test]
    fn output_and_quit() {
        let mut story = Story::new();
        story.write("fizzbuzz");
        assert_eq!(story.output().lines(), &["fizzbuzz"]);
        assert_eq!(story.drain_output(), vec!["fizzbuzz"]);
        assert!(!story.quit_requested());
        story.request_quit();
        assert!(story.quit_requested());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Rooms, each holding objects whose parent is either the room (`0`) or
    /// an earlier object of the same room (`k` means object `k - 1`).
    fn layouts() -> impl Strategy<Value = Vec<Vec<usize>>> {
        prop::collection::vec(
            prop::collection::vec(any::<prop::sample::Index>(), 0..8),
            1..5,
        )
        .prop_map(|rooms| {
            rooms
                .into_iter()
                .map(|objects| {
                    objects
                        .iter()
                        .enumerate()
                        .map(|(j, idx)| idx.index(j + 1))
                        .collect()
                })
                .collect()
        })
    }

    fn object_id(room: usize, object: usize) -> String {
        format!("r{room}o{object}")
    }

    fn preorder(room: usize, parents: &[usize], parent: usize, out: &mut Vec<String>) {
        for (j, p) in parents.iter().enumerate() {
            if *p == parent {
                out.push(object_id(room, j));
                preorder(room, parents, j + 1, out);
            }
        }
    }

    fn build(layout: &[Vec<usize>]) -> Story {
        let mut builder = Story::builder();
        for r in 0..layout.len() {
            builder = builder.room(format!("r{r}"), format!("Room {r}"), |room| room);
        }
        let mut story = builder.build().unwrap();
        for (r, parents) in layout.iter().enumerate() {
            for (j, p) in parents.iter().enumerate() {
                let parent = if *p == 0 {
                    format!("r{r}")
                } else {
                    object_id(r, p - 1)
                };
                story
                    .add_object(parent, Entity::object(object_id(r, j), "thing"))
                    .unwrap();
            }
        }
        story
    }

    proptest! {
        #[test]
        fn objects_is_a_preorder_walk(layout in layouts()) {
            let story = build(&layout);
            let mut expected = Vec::new();
            for (r, parents) in layout.iter().enumerate() {
                preorder(r, parents, 0, &mut expected);
            }
            let actual: Vec<String> = story.objects().iter().map(|e| e.id.to_string()).collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn room_child_objects_match_descendants(layout in layouts()) {
            let story = build(&layout);
            for room in story.rooms() {
                let visible: Vec<&EntityId> = story
                    .room_context(&room.id)
                    .unwrap()
                    .child_objects()
                    .iter()
                    .map(|c| c.id())
                    .collect();
                let descendants: Vec<&EntityId> =
                    story.descendants(&room.id).iter().map(|e| &e.id).collect();
                prop_assert_eq!(visible, descendants);
            }
        }

        #[test]
        fn duplicate_ids_always_fail(picks in prop::collection::vec(0..6usize, 1..10)) {
            let mut builder = Story::builder();
            for p in &picks {
                builder = builder.room(format!("room{p}"), "Room", |room| room);
            }
            let mut seen = std::collections::HashSet::new();
            let distinct = picks.iter().all(|p| seen.insert(*p));
            match builder.build() {
                Ok(story) => {
                    prop_assert!(distinct);
                    prop_assert_eq!(story.rooms().len(), picks.len());
                }
                Err(err) => {
                    prop_assert!(!distinct);
                    prop_assert!(matches!(err, CoreError::DuplicateId(_)));
                }
            }
        }
    }
}
