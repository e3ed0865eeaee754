use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use miette::IntoDiagnostic;
use tale_fiction::{Interpreter, InterpreterConfig, Outcome, VocabularyScope};
use tracing::debug;

pub fn run(file: &Path, scope: VocabularyScope, no_color: bool) -> miette::Result<()> {
    if no_color {
        colored::control::set_override(false);
    }

    let story = super::load(file)?;
    let config = InterpreterConfig::new().with_scope(scope);
    let mut interpreter = Interpreter::with_config(story, config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    repl(&mut interpreter, stdin.lock(), stdout.lock()).into_diagnostic()
}

/// Read commands until end of input or until a verb asks to quit.
fn repl<R: BufRead, W: Write>(
    interpreter: &mut Interpreter,
    mut reader: R,
    mut out: W,
) -> io::Result<()> {
    let title = interpreter.story().title();
    if !title.is_empty() {
        writeln!(out, "  {}\n", title.bold())?;
    }
    if let Some(room) = interpreter.story().location() {
        writeln!(out, "{}", room.name.cyan())?;
    }

    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if reader.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let result = interpreter.interpret(input);
        for text in interpreter.drain_output() {
            writeln!(out, "{text}")?;
        }
        match result {
            Ok(Outcome::Executed { verb, .. }) => debug!(verb = %verb, "command done"),
            Ok(Outcome::Unrecognized) => {}
            Err(e) => writeln!(out, "{}", e.to_string().yellow())?,
        }

        if interpreter.is_finished() {
            break;
        }
    }

    Ok(())
}
