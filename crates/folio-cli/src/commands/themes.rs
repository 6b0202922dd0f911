use anyhow::Result;

use folio_core::AppConfig;
use folio_tui::themes::available_themes;

pub fn run(config: &AppConfig) -> Result<()> {
    println!("Built-in themes:\n");
    for name in available_themes() {
        let marker = if name == config.ui.theme.name { "*" } else { " " };
        println!("  {} {}", marker, name);
    }
    println!("\nSet one in config.toml:");
    println!("  [ui]");
    println!("  theme = \"nord\"");
    Ok(())
}
