use std::path::Path;

use anyhow::{bail, Context, Result};

use folio_core::{AppConfig, Portfolio};

/// Write the default config and content files so they can be edited
pub fn run(config_path: &Path, force: bool) -> Result<()> {
    let written = write_defaults(config_path, &AppConfig::default_content_path(), force)?;

    if written.is_empty() {
        println!("Nothing to do.");
    }
    for path in written {
        println!("Wrote {}", path);
    }
    println!("\nEdit the content file, then run:");
    println!("  folio");
    Ok(())
}

/// Returns the paths written
fn write_defaults(config_path: &Path, content_path: &Path, force: bool) -> Result<Vec<String>> {
    if content_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            content_path.display()
        );
    }

    let mut written = Vec::new();

    // An existing config is never replaced; it may hold keymaps and theme overrides
    if !config_path.exists() {
        AppConfig::default()
            .save_to(config_path)
            .with_context(|| format!("failed to write {}", config_path.display()))?;
        written.push(config_path.display().to_string());
    }

    Portfolio::default()
        .save(content_path)
        .with_context(|| format!("failed to write {}", content_path.display()))?;
    written.push(content_path.display().to_string());

    tracing::info!("Initialized {}", content_path.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_config_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("folio/config.toml");
        let content = dir.path().join("folio/portfolio.toml");

        let written = write_defaults(&config, &content, false).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(Portfolio::load(&content).unwrap(), Portfolio::default());
        assert!(AppConfig::load_from(&config).is_ok());
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        let content = dir.path().join("portfolio.toml");
        std::fs::write(&content, "[profile]\nname = \"Mine\"\n").unwrap();

        assert!(write_defaults(&config, &content, false).is_err());
        assert_eq!(Portfolio::load(&content).unwrap().profile.name, "Mine");

        write_defaults(&config, &content, true).unwrap();
        assert_eq!(Portfolio::load(&content).unwrap(), Portfolio::default());
    }

    #[test]
    fn test_keeps_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        let content = dir.path().join("portfolio.toml");
        std::fs::write(&config, "[ui]\ntick_rate_ms = 42\n").unwrap();

        let written = write_defaults(&config, &content, false).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(AppConfig::load_from(&config).unwrap().ui.tick_rate_ms, 42);
    }
}
