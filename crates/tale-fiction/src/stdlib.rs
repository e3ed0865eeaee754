//! The standard verb set: looking, moving, carrying things, and leaving.
//!
//! Every story loaded from a file gets these verbs after its own. Stories
//! built in code opt in with [`StandardVerbs::with_standard_verbs`].

use tale_core::{CoreError, CoreResult, Direction, EntityId, Scope, StoryBuilder, Verb};

/// Message written by `help`.
const HELP: &str = "Commands: look (l), examine <thing> (x), take <thing>, drop <thing>, \
put <thing> in <container>, inventory (i), north/east/south/west (n/e/s/w), help, quit (q).";

/// Registration of the standard verbs on a builder.
pub trait StandardVerbs {
    /// Append the standard verbs after everything declared so far.
    fn with_standard_verbs(self) -> Self;
}

impl StandardVerbs for StoryBuilder {
    fn with_standard_verbs(self) -> Self {
        match standard_verbs() {
            Ok(verbs) => verbs.into_iter().fold(self, StoryBuilder::add_verb),
            Err(err) => self.fail(err),
        }
    }
}

/// The standard verbs in matching order.
pub fn standard_verbs() -> CoreResult<Vec<Verb>> {
    let mut verbs = vec![
        Verb::new(["look", "l"], look)?,
        Verb::new(
            ["examine <thing...>", "x <thing...>", "look at <thing...>"],
            examine,
        )?,
        Verb::new(
            ["take <thing...>", "get <thing...>", "pick up <thing...>"],
            take,
        )?,
        Verb::new(["drop <thing...>"], drop_object)?,
        Verb::new(["put <thing> in <container...>"], put)?,
        Verb::new(["inventory", "inv", "i"], inventory)?,
    ];
    for direction in Direction::ALL {
        let go_name = format!("go {}", direction.name());
        verbs.push(Verb::new(
            [direction.name(), direction.abbreviation(), go_name.as_str()],
            move |scope: &mut Scope<'_>, _: &[EntityId]| walk(scope, direction),
        )?);
    }
    verbs.push(Verb::new(["help"], |scope, _| {
        scope.write(HELP);
        Ok(())
    })?);
    verbs.push(Verb::new(["quit", "q"], |scope, _| {
        scope.write("Goodbye!");
        scope.quit();
        Ok(())
    })?);
    Ok(verbs)
}

fn one(args: &[EntityId]) -> CoreResult<&EntityId> {
    match args {
        [id] => Ok(id),
        _ => Err(CoreError::action(format!(
            "expected one object, got {}",
            args.len()
        ))),
    }
}

/// Join names as "a", "a and b", or "a, b and c".
fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

fn look(scope: &mut Scope<'_>, _: &[EntityId]) -> CoreResult<()> {
    let Some(room) = scope.here() else {
        scope.write("You are nowhere at all.");
        return Ok(());
    };

    let mut lines = vec![room.name().to_string()];
    if let Some(description) = room.description() {
        lines.push(description.to_string());
    }
    let visible: Vec<String> = room
        .children()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    if !visible.is_empty() {
        lines.push(format!("You see {} here.", join_names(&visible)));
    }
    let exits: Vec<String> = room
        .entity()
        .exits()
        .map(|exits| exits.iter().map(|(d, _)| d.name().to_string()).collect())
        .unwrap_or_default();
    if !exits.is_empty() {
        lines.push(format!("Exits: {}.", exits.join(", ")));
    }

    for line in lines {
        scope.write(line);
    }
    Ok(())
}

fn examine(scope: &mut Scope<'_>, args: &[EntityId]) -> CoreResult<()> {
    let id = one(args)?;
    if !scope.can_reach(id) {
        let line = format!("You can't see {} here.", scope.name_of(id));
        scope.write(line);
        return Ok(());
    }

    let line = match scope.context(id) {
        Some(thing) => {
            let mut line = match thing.description() {
                Some(description) => description.to_string(),
                None => format!("You see nothing special about {}.", thing.name()),
            };
            let inside: Vec<String> = thing
                .children()
                .iter()
                .map(|c| c.name().to_string())
                .collect();
            if !inside.is_empty() {
                line.push_str(&format!(" It holds {}.", join_names(&inside)));
            }
            line
        }
        None => return Err(CoreError::EntityNotFound(id.clone())),
    };
    scope.write(line);
    Ok(())
}

fn take(scope: &mut Scope<'_>, args: &[EntityId]) -> CoreResult<()> {
    let id = one(args)?;
    let name = scope.name_of(id);
    if scope.inventory().contains(id) {
        scope.write(format!("You already have {name}."));
        return Ok(());
    }
    if !scope.here().is_some_and(|room| room.contains(id)) {
        scope.write(format!("You can't see {name} here."));
        return Ok(());
    }

    let player = scope.player().id.clone();
    scope.move_object(id, &player)?;
    scope.write(format!("You take {name}."));
    Ok(())
}

fn drop_object(scope: &mut Scope<'_>, args: &[EntityId]) -> CoreResult<()> {
    let id = one(args)?;
    let name = scope.name_of(id);
    if !scope.inventory().contains(id) {
        scope.write(format!("You don't have {name}."));
        return Ok(());
    }
    let Some(room) = scope.here().map(|room| room.id().clone()) else {
        scope.write("There is nowhere to drop it.");
        return Ok(());
    };

    scope.move_object(id, &room)?;
    scope.write(format!("You drop {name}."));
    Ok(())
}

fn put(scope: &mut Scope<'_>, args: &[EntityId]) -> CoreResult<()> {
    let [thing, container] = args else {
        return Err(CoreError::action(format!(
            "expected two objects, got {}",
            args.len()
        )));
    };
    let (name, container_name) = (scope.name_of(thing), scope.name_of(container));
    if !scope.inventory().contains(thing) {
        scope.write(format!("You don't have {name}."));
        return Ok(());
    }
    if !scope.can_reach(container) {
        scope.write(format!("You can't see {container_name} here."));
        return Ok(());
    }

    match scope.move_object(thing, container) {
        Ok(()) => {
            scope.write(format!("You put {name} in {container_name}."));
            Ok(())
        }
        Err(CoreError::WouldCycle { .. }) => {
            scope.write(format!("You can't put {name} inside itself."));
            Ok(())
        }
        Err(err) => Err(err),
    }
}

fn inventory(scope: &mut Scope<'_>, _: &[EntityId]) -> CoreResult<()> {
    let held: Vec<String> = scope
        .inventory()
        .children()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    if held.is_empty() {
        scope.write("You are carrying nothing.");
    } else {
        scope.write(format!("You are carrying {}.", join_names(&held)));
    }
    Ok(())
}

fn walk(scope: &mut Scope<'_>, direction: Direction) -> CoreResult<()> {
    if scope.go(direction)? {
        look(scope, &[])
    } else {
        scope.write(format!("You can't go {direction} from here."));
        Ok(())
    }
}
