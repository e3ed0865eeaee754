//! Story files: a JSON description of rooms, objects and message verbs.
//!
//! ```json
//! {
//!   "title": "The Cellar",
//!   "rooms": [
//!     {
//!       "id": "hall",
//!       "name": "Hall",
//!       "exits": { "north": "cellar" },
//!       "objects": [{ "id": "box", "name": "Box", "objects": [{ "id": "key", "name": "Key" }] }]
//!     },
//!     { "id": "cellar", "name": "Cellar" }
//!   ],
//!   "messages": [{ "names": ["xyzzy"], "text": "Nothing happens." }]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tale_core::{Direction, ObjectBuilder, RoomBuilder, Story, StoryBuilder};
use tracing::info;

use crate::error::{FictionError, FictionResult};
use crate::stdlib::StandardVerbs;

/// Top level of a story file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoryFile {
    /// Story title.
    #[serde(default)]
    pub title: String,
    /// Starting room; the first room when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Replacement for the default player.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerDecl>,
    /// Rooms in declaration order.
    #[serde(default)]
    pub rooms: Vec<RoomDecl>,
    /// Verbs that print a fixed line.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<MessageDecl>,
}

/// The player's id and name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayerDecl {
    /// Player id.
    pub id: String,
    /// Player name.
    pub name: String,
}

/// One room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomDecl {
    /// Unique id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Extra names the room answers to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Exits by direction.
    #[serde(default)]
    pub exits: ExitsDecl,
    /// Objects lying in the room.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<ObjectDecl>,
}

/// Target room ids by direction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExitsDecl {
    /// Room to the north.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub north: Option<String>,
    /// Room to the east.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub east: Option<String>,
    /// Room to the south.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub south: Option<String>,
    /// Room to the west.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub west: Option<String>,
}

impl ExitsDecl {
    fn iter(&self) -> impl Iterator<Item = (Direction, &str)> + '_ {
        [
            (Direction::North, &self.north),
            (Direction::East, &self.east),
            (Direction::South, &self.south),
            (Direction::West, &self.west),
        ]
        .into_iter()
        .filter_map(|(d, target)| target.as_deref().map(|t| (d, t)))
    }
}

/// One object and the objects inside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectDecl {
    /// Unique id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Extra names the object answers to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Nested objects.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<ObjectDecl>,
}

/// A verb that writes `text` when any of `names` matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageDecl {
    /// Invocation patterns.
    pub names: Vec<String>,
    /// The line to write.
    pub text: String,
}

impl StoryFile {
    /// Turn the declarations into a builder with message verbs registered
    /// ahead of the standard verbs.
    pub fn into_builder(self) -> StoryBuilder {
        let mut builder = Story::builder().title(self.title);
        if let Some(player) = self.player {
            builder = builder.player(player.id, player.name);
        }
        if let Some(start) = self.start {
            builder = builder.start(start);
        }
        for room in self.rooms {
            let RoomDecl {
                id,
                name,
                description,
                aliases,
                exits,
                objects,
            } = room;
            builder = builder.room(id, name, |mut rb: RoomBuilder| {
                if let Some(description) = description {
                    rb = rb.description(description);
                }
                for alias in aliases {
                    rb = rb.alias(alias);
                }
                for (direction, target) in exits.iter() {
                    rb = rb.exit(direction, target);
                }
                for object in objects {
                    let (id, name) = (object.id.clone(), object.name.clone());
                    rb = rb.object(id, name, |ob| declare_object(ob, object));
                }
                rb
            });
        }
        for message in self.messages {
            let text = message.text;
            builder = builder.verb(message.names, move |scope, _| {
                scope.write(text.clone());
                Ok(())
            });
        }
        builder.with_standard_verbs()
    }

    /// Validate and build the story.
    pub fn build(self) -> FictionResult<Story> {
        self.into_builder().build().map_err(FictionError::from)
    }
}

fn declare_object(mut builder: ObjectBuilder, decl: ObjectDecl) -> ObjectBuilder {
    if let Some(description) = decl.description {
        builder = builder.description(description);
    }
    for alias in decl.aliases {
        builder = builder.alias(alias);
    }
    for child in decl.objects {
        let (id, name) = (child.id.clone(), child.name.clone());
        builder = builder.object(id, name, |ob| declare_object(ob, child));
    }
    builder
}

/// Parse and build a story from JSON text.
pub fn parse_story(source: &str) -> FictionResult<Story> {
    let file: StoryFile = serde_json::from_str(source)?;
    file.build()
}

/// Read, parse and build a story file.
pub fn load_story(path: impl AsRef<Path>) -> FictionResult<Story> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| FictionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let story = parse_story(&source)?;
    info!(
        path = %path.display(),
        title = story.title(),
        rooms = story.rooms().len(),
        objects = story.objects().len(),
        "story loaded"
    );
    Ok(story)
}
