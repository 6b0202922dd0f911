pub mod init;
pub mod print;
pub mod run;
pub mod themes;

use std::path::Path;

use anyhow::{Context, Result};

use folio_core::{config::expand_tilde, AppConfig, Portfolio};

/// Content from `--content`, the configured path, or the built-in portfolio
pub fn load_portfolio(config: &AppConfig, content: Option<&Path>) -> Result<Portfolio> {
    let path = content.map(expand_tilde).or_else(|| config.content_path());
    match &path {
        Some(path) => tracing::info!("Loading content from {}", path.display()),
        None => tracing::info!("Using built-in content"),
    }
    Portfolio::load_or_default(path.as_deref())
        .with_context(|| match &path {
            Some(path) => format!("failed to load content from {}", path.display()),
            None => "failed to load built-in content".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_content_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("me.toml");
        std::fs::write(&path, "[profile]\nname = \"Grace Hopper\"\n").unwrap();

        let portfolio = load_portfolio(&AppConfig::default(), Some(&path)).unwrap();
        assert_eq!(portfolio.profile.name, "Grace Hopper");
    }

    #[test]
    fn test_configured_content_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("me.toml");
        std::fs::write(&path, "[profile]\nbrand = \"GH\"\n").unwrap();

        let mut config = AppConfig::default();
        config.general.content_path = Some(path);
        let portfolio = load_portfolio(&config, None).unwrap();
        assert_eq!(portfolio.profile.brand, "GH");
    }

    #[test]
    fn test_missing_content_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = load_portfolio(&AppConfig::default(), Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("failed to load content"));
    }
}
