pub mod models;

use std::path::Path;

pub use models::{Contact, Education, Experience, Gradient, Portfolio, Profile, Project, Skill};

impl Portfolio {
    /// Parse portfolio content from TOML. Missing sections keep the built-in content.
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Content(e.to_string()))
    }

    /// Load portfolio content from a file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::Content(format!("failed to read {}: {}", path.display(), e))
        })?;
        let portfolio = Self::from_toml(&content)?;
        tracing::debug!(
            "Loaded portfolio from {}: {} experience, {} education, {} skills, {} projects",
            path.display(),
            portfolio.experience.len(),
            portfolio.education.len(),
            portfolio.skills.len(),
            portfolio.projects.len()
        );
        Ok(portfolio)
    }

    /// Load from an optional path, using built-in content when none is given
    pub fn load_or_default(path: Option<&Path>) -> crate::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Serialize to TOML, used to seed a content file
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Content(e.to_string()))
    }

    /// Write the content to a file, creating parent directories
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_content_keeps_defaults() {
        let portfolio = Portfolio::from_toml(
            r#"
            [profile]
            name = "Ada Lovelace"

            [[skills]]
            name = "A"
            level = 90

            [[skills]]
            name = "B"
            level = 50
            "#,
        )
        .unwrap();

        assert_eq!(portfolio.profile.name, "Ada Lovelace");
        assert_eq!(portfolio.profile.brand, "Portfolio");
        assert_eq!(portfolio.skills.len(), 2);
        assert_eq!(portfolio.skills[1].fill_fraction(), 0.5);
        assert_eq!(portfolio.experience.len(), 3);
    }

    #[test]
    fn test_experience_without_achievements() {
        let portfolio = Portfolio::from_toml(
            r#"
            [[experience]]
            title = "Intern"
            company = "Somewhere"
            period = "2017"
            description = "Coffee"
            "#,
        )
        .unwrap();

        assert_eq!(portfolio.experience.len(), 1);
        assert!(portfolio.experience[0].achievements.is_empty());
        assert!(portfolio.experience[0].company_url.is_none());
    }

    #[test]
    fn test_malformed_url_is_kept_verbatim() {
        let portfolio = Portfolio::from_toml(
            r#"
            [contact]
            github = "not a url at all"
            "#,
        )
        .unwrap();
        assert_eq!(portfolio.contact.github, "not a url at all");
    }

    #[test]
    fn test_invalid_content_is_content_error() {
        let result = Portfolio::from_toml("[[skills]]\nname = 3");
        assert!(matches!(result, Err(crate::Error::Content(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.toml");

        Portfolio::default().save(&path).unwrap();
        let loaded = Portfolio::load(&path).unwrap();
        assert_eq!(loaded, Portfolio::default());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Portfolio::load(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(crate::Error::Content(_))));
    }
}
