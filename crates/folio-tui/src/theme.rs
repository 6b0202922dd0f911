use ratatui::style::Color;

use crate::themes::parse_hex_color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    /// Page background
    pub bg0: Color,
    /// Alternate section background
    pub bg1: Color,
    /// Card surface, scrolled navigation bar
    pub bg2: Color,
    /// Card and timeline borders
    pub bg3: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,
    pub grey2: Color,

    // Palette colors
    pub red: Color,
    pub orange: Color,
    pub yellow: Color,
    pub green: Color,
    pub aqua: Color,
    pub blue: Color,
    pub purple: Color,
    pub pink: Color,

    // Semantic colors
    pub accent: Color,
    pub accent_soft: Color,
    pub secondary: Color,
    pub secondary_soft: Color,
    pub selection: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        crate::themes::emerald::default()
    }
}

impl Theme {
    /// Resolve a content color name ("emerald", "cyan", "accent") or hex string
    pub fn resolve(&self, name: &str) -> Option<Color> {
        let color = match name.trim().to_lowercase().as_str() {
            "emerald" | "green" => self.green,
            "cyan" | "aqua" | "teal" => self.aqua,
            "blue" => self.blue,
            "purple" | "violet" => self.purple,
            "pink" => self.pink,
            "red" => self.red,
            "orange" => self.orange,
            "yellow" | "amber" => self.yellow,
            "accent" => self.accent,
            "secondary" => self.secondary,
            other => return parse_hex_color(other),
        };
        Some(color)
    }
}

/// Mix two colors; `t = 0` gives `from`, `t = 1` gives `to`
///
/// Only RGB colors blend. Anything else snaps at the midpoint.
pub fn mix(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
            Color::Rgb(channel(r1, r2), channel(g1, g2), channel(b1, b2))
        }
        _ => {
            if t < 0.5 {
                from
            } else {
                to
            }
        }
    }
}

/// Fade a foreground toward the backdrop it is drawn on
pub fn fade(fg: Color, backdrop: Color, opacity: f32) -> Color {
    mix(backdrop, fg, opacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_endpoints() {
        let a = Color::Rgb(0, 0, 0);
        let b = Color::Rgb(200, 100, 50);
        assert_eq!(mix(a, b, 0.0), a);
        assert_eq!(mix(a, b, 1.0), b);
        assert_eq!(mix(a, b, 0.5), Color::Rgb(100, 50, 25));
    }

    #[test]
    fn test_mix_non_rgb_snaps() {
        assert_eq!(mix(Color::Red, Color::Blue, 0.2), Color::Red);
        assert_eq!(mix(Color::Red, Color::Blue, 0.7), Color::Blue);
    }

    #[test]
    fn test_fade_zero_opacity_is_backdrop() {
        let backdrop = Color::Rgb(10, 10, 10);
        assert_eq!(fade(Color::Rgb(255, 255, 255), backdrop, 0.0), backdrop);
    }

    #[test]
    fn test_resolve_names_and_hex() {
        let theme = Theme::default();
        assert_eq!(theme.resolve("emerald"), Some(theme.green));
        assert_eq!(theme.resolve("Cyan"), Some(theme.aqua));
        assert_eq!(theme.resolve("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(theme.resolve("chartreuse-ish"), None);
    }
}
