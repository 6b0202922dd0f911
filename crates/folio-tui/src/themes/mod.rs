//! Theme registry and loader
//!
//! Built-in themes with per-color overrides from the config file.

pub mod dracula;
pub mod emerald;
pub mod nord;
pub mod one_dark;

use folio_core::config::{ThemeColorOverrides, ThemeConfig};
use ratatui::style::Color;

use crate::theme::Theme;

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        // Full form: RRGGBB
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Look up a built-in theme by name
pub fn builtin(name: &str) -> Option<Theme> {
    let theme = match name.to_lowercase().as_str() {
        "emerald" => emerald::default(),
        "dracula" => dracula::default(),
        "nord" => nord::default(),
        "one-dark" | "onedark" => one_dark::default(),
        _ => return None,
    };
    Some(theme)
}

/// Load a theme by name from config
///
/// Unknown names fall back to emerald with a warning.
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = builtin(&config.name).unwrap_or_else(|| {
        tracing::warn!("Unknown theme '{}', using emerald", config.name);
        emerald::default()
    });

    apply_overrides(base, &config.colors)
}

fn apply(slot: &mut Color, hex: &Option<String>) {
    if let Some(ref hex) = hex {
        match parse_hex_color(hex) {
            Some(color) => *slot = color,
            None => tracing::warn!("Ignoring invalid color override '{}'", hex),
        }
    }
}

/// Apply user color overrides to a base theme
fn apply_overrides(mut theme: Theme, overrides: &ThemeColorOverrides) -> Theme {
    apply(&mut theme.bg0, &overrides.bg0);
    apply(&mut theme.bg1, &overrides.bg1);
    apply(&mut theme.bg2, &overrides.bg2);
    apply(&mut theme.fg0, &overrides.fg0);
    apply(&mut theme.fg1, &overrides.fg1);
    apply(&mut theme.accent, &overrides.accent);
    apply(&mut theme.secondary, &overrides.secondary);
    apply(&mut theme.selection, &overrides.selection);
    apply(&mut theme.bg3, &overrides.border);
    apply(&mut theme.error, &overrides.error);
    apply(&mut theme.success, &overrides.success);
    apply(&mut theme.warning, &overrides.warning);
    apply(&mut theme.info, &overrides.info);

    theme
}

/// Get list of available theme names
pub fn available_themes() -> Vec<&'static str> {
    vec!["emerald", "dracula", "nord", "one-dark"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color_6digit() {
        let color = parse_hex_color("#ff5500").unwrap();
        assert!(matches!(color, Color::Rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_hex_color_3digit() {
        let color = parse_hex_color("#f50").unwrap();
        assert!(matches!(color, Color::Rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_hex_color_no_hash() {
        let color = parse_hex_color("ff5500").unwrap();
        assert!(matches!(color, Color::Rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_hex_color_invalid() {
        assert!(parse_hex_color("invalid").is_none());
        assert!(parse_hex_color("#gg0000").is_none());
        assert!(parse_hex_color("#ééé").is_none());
    }

    #[test]
    fn test_load_theme_default() {
        let config = ThemeConfig::default();
        let theme = load_theme(&config);
        assert!(matches!(theme.accent, Color::Rgb(0x10, 0xb9, 0x81)));
        assert!(matches!(theme.bg0, Color::Rgb(0x0a, 0x0a, 0x0a)));
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let config = ThemeConfig {
            name: "no-such-theme".to_string(),
            ..Default::default()
        };
        let theme = load_theme(&config);
        assert!(matches!(theme.accent, Color::Rgb(0x10, 0xb9, 0x81)));
    }

    #[test]
    fn test_every_listed_theme_loads() {
        for name in available_themes() {
            assert!(builtin(name).is_some(), "{} missing", name);
        }
    }

    #[test]
    fn test_load_theme_with_override() {
        let config = ThemeConfig {
            name: "nord".to_string(),
            colors: ThemeColorOverrides {
                accent: Some("#ff0000".to_string()),
                border: Some("not-a-color".to_string()),
                ..Default::default()
            },
        };
        let theme = load_theme(&config);
        assert!(matches!(theme.accent, Color::Rgb(255, 0, 0)));
        // Invalid override keeps the base color
        assert!(matches!(theme.bg3, Color::Rgb(0x4c, 0x56, 0x6a)));
    }
}
