use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(file: &Path) -> miette::Result<()> {
    let story = super::load(file)?;
    let objects = story.objects();

    if objects.is_empty() {
        println!("  No objects found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Owner"]);

    for object in &objects {
        let owner = story
            .owner_of(&object.id)
            .map_or_else(|| "-".to_string(), |owner| owner.id.to_string());
        table.add_row(vec![object.id.as_str(), object.name.as_str(), owner.as_str()]);
    }

    println!("{table}");
    println!();
    println!("  {} objects", objects.len());

    Ok(())
}
