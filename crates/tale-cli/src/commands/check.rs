use std::path::Path;

pub fn run(file: &Path) -> miette::Result<()> {
    let story = super::load(file)?;

    let title = if story.title().is_empty() {
        "untitled story"
    } else {
        story.title()
    };
    println!("  All checks passed for '{title}'.");
    println!(
        "  {} rooms, {} objects, {} verbs",
        story.rooms().len(),
        story.objects().len(),
        story.verbs().len()
    );

    Ok(())
}
