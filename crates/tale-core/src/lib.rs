//! Core types for Tale: the world tree, visibility contexts, verbs, and the
//! story registry.
//!
//! A [`Story`] owns every room and object in an arena keyed by
//! [`EntityId`]. [`Context`] views answer "what can be seen from here"
//! questions, and [`Verb`]s carry compiled [`Pattern`]s plus a body that
//! runs inside a [`Scope`]. Command matching lives in `tale-fiction`.

/// Declarative story construction.
pub mod builder;
/// Visibility-aware views over entities.
pub mod context;
/// Compass directions and room exits.
pub mod direction;
/// Entity types and identifiers.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// The player-visible output sink.
pub mod output;
/// Verb pattern compilation.
pub mod pattern;
/// The top-level context verb bodies run in.
pub mod scope;
/// The root registry of rooms, objects, verbs and the player.
pub mod story;
/// Verbs: names, compiled patterns and bodies.
pub mod verb;

/// Re-export builder types.
pub use builder::{ObjectBuilder, RoomBuilder, StoryBuilder};
/// Re-export context types.
pub use context::{Context, Target};
/// Re-export direction types.
pub use direction::{Direction, Exits};
/// Re-export entity types.
pub use entity::{Behavior, Entity, EntityId, EntityKind, ObjectsQuery};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the output sink.
pub use output::Output;
/// Re-export pattern types.
pub use pattern::{Pattern, Token};
/// Re-export the verb scope.
pub use scope::Scope;
/// Re-export the story registry.
pub use story::Story;
/// Re-export verb types.
pub use verb::{Verb, VerbBody};
