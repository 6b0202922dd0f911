use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Portfolio content file; built-in content is used when unset and no
    /// `portfolio.toml` sits next to the config file
    #[serde(default)]
    pub content_path: Option<PathBuf>,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            content_path: None,
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Smooth scrolling configuration
    #[serde(default)]
    pub scroll: ScrollConfig,
    /// Reveal animation configuration
    #[serde(default)]
    pub reveal: RevealSettings,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            theme: ThemeConfig::default(),
            scroll: ScrollConfig::default(),
            reveal: RevealSettings::default(),
        }
    }
}

/// Easing curve applied to scroll and reveal animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump to the end value once the animation completes
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    EaseOut,
    /// Symmetric ease-in-out, used by looping keyframes
    EaseInOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Enable smooth (animated) scrolling
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Scroll animation duration in milliseconds
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    /// Easing curve for scroll animations
    #[serde(default)]
    pub easing: EasingType,
    /// Lines per scroll step when smooth scrolling is disabled
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    /// Frame rate while an animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_scroll_duration(),
            easing: EasingType::default(),
            scroll_lines: default_scroll_lines(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Reveal animation settings for sections and list items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealSettings {
    /// When false, elements appear in their final state as soon as they are revealed
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Duration of a single reveal transition in milliseconds
    #[serde(default = "default_reveal_duration")]
    pub duration_ms: u64,
    /// Delay added per list index in milliseconds
    #[serde(default = "default_stagger")]
    pub stagger_ms: u64,
    /// Easing curve for reveal transitions
    #[serde(default = "default_reveal_easing")]
    pub easing: EasingType,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            duration_ms: default_reveal_duration(),
            stagger_ms: default_stagger(),
            easing: default_reveal_easing(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "emerald", "nord")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Custom deserializer to accept either a string or a struct
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "emerald".to_string()
}

/// Optional color overrides for theme customization
/// Each color is a hex string (e.g., "#10b981" or "10b981")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Page background
    pub bg0: Option<String>,
    /// Alternate section background
    pub bg1: Option<String>,
    /// Card surface
    pub bg2: Option<String>,
    /// Headline foreground
    pub fg0: Option<String>,
    /// Body text foreground
    pub fg1: Option<String>,
    /// Primary accent (brand dot, buttons, skill labels)
    pub accent: Option<String>,
    /// Secondary accent (education timeline, gradients)
    pub secondary: Option<String>,
    /// Focused link background
    pub selection: Option<String>,
    /// Card and timeline borders
    pub border: Option<String>,
    /// Error color
    pub error: Option<String>,
    /// Success color
    pub success: Option<String>,
    /// Warning color
    pub warning: Option<String>,
    /// Info color
    pub info: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-j>" (Ctrl+j), "<S-g>" (Shift+g), "<CR>" (Enter), "<Esc>", "<Tab>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,

    // Scrolling
    /// Scroll one step down
    #[serde(default = "default_key_scroll_down")]
    pub scroll_down: String,
    /// Scroll one step up
    #[serde(default = "default_key_scroll_up")]
    pub scroll_up: String,
    /// Scroll half page down
    #[serde(default = "default_key_scroll_half_down")]
    pub scroll_half_down: String,
    /// Scroll half page up
    #[serde(default = "default_key_scroll_half_up")]
    pub scroll_half_up: String,
    /// Scroll full page down
    #[serde(default = "default_key_scroll_page_down")]
    pub scroll_page_down: String,
    /// Scroll full page up
    #[serde(default = "default_key_scroll_page_up")]
    pub scroll_page_up: String,
    /// Jump to top of the page
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    /// Jump to bottom of the page
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,

    // Links
    /// Focus next link
    #[serde(default = "default_key_next_link")]
    pub next_link: String,
    /// Focus previous link
    #[serde(default = "default_key_prev_link")]
    pub prev_link: String,
    /// Follow the focused link
    #[serde(default = "default_key_open_link")]
    pub open_link: String,

    // Section anchors (navigation bar order)
    #[serde(default = "default_key_section_about")]
    pub section_about: String,
    #[serde(default = "default_key_section_experience")]
    pub section_experience: String,
    #[serde(default = "default_key_section_skills")]
    pub section_skills: String,
    #[serde(default = "default_key_section_projects")]
    pub section_projects: String,
    #[serde(default = "default_key_section_contact")]
    pub section_contact: String,

    /// Toggle help overlay
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            scroll_down: default_key_scroll_down(),
            scroll_up: default_key_scroll_up(),
            scroll_half_down: default_key_scroll_half_down(),
            scroll_half_up: default_key_scroll_half_up(),
            scroll_page_down: default_key_scroll_page_down(),
            scroll_page_up: default_key_scroll_page_up(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            next_link: default_key_next_link(),
            prev_link: default_key_prev_link(),
            open_link: default_key_open_link(),
            section_about: default_key_section_about(),
            section_experience: default_key_section_experience(),
            section_skills: default_key_section_skills(),
            section_projects: default_key_section_projects(),
            section_contact: default_key_section_contact(),
            help: default_key_help(),
        }
    }
}

// Default keymap values (Vim-style notation)
fn default_key_quit() -> String { "q".to_string() }
fn default_key_scroll_down() -> String { "j".to_string() }
fn default_key_scroll_up() -> String { "k".to_string() }
fn default_key_scroll_half_down() -> String { "<C-d>".to_string() }
fn default_key_scroll_half_up() -> String { "<C-u>".to_string() }
fn default_key_scroll_page_down() -> String { "<C-f>".to_string() }
fn default_key_scroll_page_up() -> String { "<C-b>".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_next_link() -> String { "<Tab>".to_string() }
fn default_key_prev_link() -> String { "<S-Tab>".to_string() }
fn default_key_open_link() -> String { "<CR>".to_string() }
fn default_key_section_about() -> String { "1".to_string() }
fn default_key_section_experience() -> String { "2".to_string() }
fn default_key_section_skills() -> String { "3".to_string() }
fn default_key_section_projects() -> String { "4".to_string() }
fn default_key_section_contact() -> String { "5".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_scroll_duration() -> u64 {
    150
}

fn default_scroll_lines() -> u16 {
    1
}

fn default_animation_fps() -> u32 {
    60
}

fn default_reveal_duration() -> u64 {
    600
}

fn default_stagger() -> u64 {
    100
}

fn default_reveal_easing() -> EasingType {
    EasingType::EaseOut
}

/// Expand tilde (~) in path to user's home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, falling back to defaults when it is missing
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/folio/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Directory holding config.toml and the default content file
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("folio")
    }

    /// Default location of the portfolio content file
    pub fn default_content_path() -> PathBuf {
        Self::config_dir().join("portfolio.toml")
    }

    /// Resolve which content file to load, if any
    pub fn content_path(&self) -> Option<PathBuf> {
        match &self.general.content_path {
            Some(path) => Some(expand_tilde(path)),
            None => {
                let fallback = Self::default_content_path();
                fallback.exists().then_some(fallback)
            }
        }
    }

    /// Get the log file path for the interactive UI
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("folio.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.ui.theme.name, "emerald");
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert!(config.ui.reveal.enabled);
        assert_eq!(config.ui.reveal.stagger_ms, 100);
        assert_eq!(config.keymap.quit, "q");
        assert_eq!(config.keymap.jump_to_top, "gg");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [ui]
            tick_rate_ms = 50

            [ui.reveal]
            stagger_ms = 40
            "#,
        )
        .unwrap();

        assert_eq!(config.ui.tick_rate_ms, 50);
        assert_eq!(config.ui.reveal.stagger_ms, 40);
        assert_eq!(config.ui.reveal.duration_ms, 600);
        assert_eq!(config.ui.scroll.animation_fps, 60);
        assert_eq!(config.keymap.scroll_down, "j");
    }

    #[test]
    fn test_theme_as_string() {
        let config: AppConfig = toml::from_str(
            r#"
            [ui]
            theme = "nord"
            "#,
        )
        .unwrap();
        assert_eq!(config.ui.theme.name, "nord");
        assert!(config.ui.theme.colors.accent.is_none());
    }

    #[test]
    fn test_theme_as_table() {
        let config: AppConfig = toml::from_str(
            r##"
            [ui.theme]
            name = "dracula"
            unknown = 3

            [ui.theme.colors]
            accent = "#ff0000"
            "##,
        )
        .unwrap();
        assert_eq!(config.ui.theme.name, "dracula");
        assert_eq!(config.ui.theme.colors.accent.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_easing_names() {
        let config: ScrollConfig = toml::from_str(r#"easing = "ease_in_out""#).unwrap();
        assert_eq!(config.easing, EasingType::EaseInOut);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.ui.theme.name = "gruvbox-dark".to_string();
        config.ui.reveal.enabled = false;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.ui.theme.name, "gruvbox-dark");
        assert!(!loaded.ui.reveal.enabled);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.ui.theme.name, "emerald");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui\ntick_rate_ms = ").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(crate::Error::Config(_))
        ));
    }

    #[test]
    fn test_explicit_content_path_expands_tilde() {
        let mut config = AppConfig::default();
        config.general.content_path = Some(PathBuf::from("/tmp/site.toml"));
        assert_eq!(config.content_path(), Some(PathBuf::from("/tmp/site.toml")));
    }
}
