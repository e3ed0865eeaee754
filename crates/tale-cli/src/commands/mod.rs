pub mod check;
pub mod objects;
pub mod play;

use std::path::Path;

use miette::{IntoDiagnostic, WrapErr};
use tale_core::Story;

/// Load a story file, attaching the path to any error.
fn load(file: &Path) -> miette::Result<Story> {
    tale_fiction::load_story(file)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to load {}", file.display()))
}
