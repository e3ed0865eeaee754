use std::fmt;

use crate::entity::EntityId;

/// One of the four compass directions a room exit can point in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// North.
    North,
    /// East.
    East,
    /// South.
    South,
    /// West.
    West,
}

impl Direction {
    /// All directions in their canonical order.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Parse a direction from a word or its one-letter abbreviation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "n" | "north" => Some(Self::North),
            "e" | "east" => Some(Self::East),
            "s" | "south" => Some(Self::South),
            "w" | "west" => Some(Self::West),
            _ => None,
        }
    }

    /// Get the display name for this direction.
    pub fn name(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        }
    }

    /// The one-letter abbreviation players may type.
    pub fn abbreviation(&self) -> &'static str {
        &self.name()[..1]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Directed exits out of a room. A missing return exit is allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exits {
    north: Option<EntityId>,
    east: Option<EntityId>,
    south: Option<EntityId>,
    west: Option<EntityId>,
}

impl Exits {
    /// Create a room with no exits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Target room of the exit in `direction`, if there is one.
    pub fn get(&self, direction: Direction) -> Option<&EntityId> {
        self.slot(direction).as_ref()
    }

    /// Point the exit in `direction` at `target`, returning the previous target.
    pub fn set(&mut self, direction: Direction, target: EntityId) -> Option<EntityId> {
        self.slot_mut(direction).replace(target)
    }

    /// Remove the exit in `direction`, returning its target.
    pub fn clear(&mut self, direction: Direction) -> Option<EntityId> {
        self.slot_mut(direction).take()
    }

    /// Iterate over the exits that are set, in canonical direction order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &EntityId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.get(d).map(|target| (d, target)))
    }

    /// True when no exit is set.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    fn slot(&self, direction: Direction) -> &Option<EntityId> {
        match direction {
            Direction::North => &self.north,
            Direction::East => &self.east,
            Direction::South => &self.south,
            Direction::West => &self.west,
        }
    }

    fn slot_mut(&mut self, direction: Direction) -> &mut Option<EntityId> {
        match direction {
            Direction::North => &mut self.north,
            Direction::East => &mut self.east,
            Direction::South => &mut self.south,
            Direction::West => &mut self.west,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_words_and_abbreviations() {
        assert_eq!(Direction::parse("north"), Some(Direction::North));
        assert_eq!(Direction::parse("N"), Some(Direction::North));
        assert_eq!(Direction::parse("West"), Some(Direction::West));
        assert_eq!(Direction::parse("up"), None);
        assert_eq!(Direction::parse("northeast"), None);
    }

    #[test]
    fn abbreviation_is_first_letter() {
        assert_eq!(Direction::South.abbreviation(), "s");
        assert_eq!(Direction::East.to_string(), "east");
    }

    #[test]
    fn exits_iterate_in_canonical_order() {
        let mut exits = Exits::new();
        assert!(exits.is_empty());
        exits.set(Direction::West, EntityId::from("cellar"));
        exits.set(Direction::North, EntityId::from("garden"));

        let set: Vec<_> = exits.iter().map(|(d, id)| (d, id.as_str())).collect();
        assert_eq!(
            set,
            vec![(Direction::North, "garden"), (Direction::West, "cellar")]
        );
    }

    #[test]
    fn clearing_an_exit_returns_its_target() {
        let mut exits = Exits::new();
        exits.set(Direction::East, EntityId::from("hall"));
        assert_eq!(exits.clear(Direction::East), Some(EntityId::from("hall")));
        assert_eq!(exits.clear(Direction::East), None);
        assert!(exits.get(Direction::East).is_none());
    }
}
