use std::path::PathBuf;

use anyhow::Result;

use folio_core::AppConfig;
use folio_tui::{load_theme, page::PageBuilder, widgets::PageViewWidget};

/// Viewport height used for the hero when printing
const PRINT_VIEWPORT: u16 = 24;

/// Print the laid-out page as plain text
pub fn run(config: &AppConfig, content: Option<PathBuf>, width: u16) -> Result<()> {
    for line in render(config, content, width)? {
        println!("{}", line);
    }
    Ok(())
}

fn render(config: &AppConfig, content: Option<PathBuf>, width: u16) -> Result<Vec<String>> {
    let portfolio = super::load_portfolio(config, content.as_deref())?;
    let theme = load_theme(&config.ui.theme);
    let page = PageBuilder::new(&portfolio, &theme, &config.ui.reveal)
        .build(width.max(20), PRINT_VIEWPORT);
    Ok(PageViewWidget::render_plain(&page, &theme))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_custom_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("me.toml");
        std::fs::write(
            &path,
            "[profile]\nname = \"Grace Hopper\"\n\n[contact]\ncopyright_holder = \"Grace Hopper\"\n",
        )
        .unwrap();

        let lines = render(&AppConfig::default(), Some(path), 80).unwrap();
        let text = lines.join("\n");
        assert!(text.contains("Grace Hopper"));
        assert!(text.contains("All rights reserved."));
        assert!(lines.iter().all(|l| l.chars().count() <= 80));
    }

    #[test]
    fn test_tiny_width_is_raised() {
        let lines = render(&AppConfig::default(), None, 3).unwrap();
        assert!(!lines.is_empty());
    }
}
