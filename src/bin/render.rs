use std::io::{self, Read};

use markdown_render::render_markdown;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut markdown = String::new();
    io::stdin().read_to_string(&mut markdown)?;
    if let Some(root) = render_markdown(&markdown) {
        print!("{root}");
    }
    Ok(())
}
