use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio_core::config::KeymapConfig;
use tracing::warn;

use crate::input::Action;
use crate::page::SectionId;

/// A key code with the modifiers that matter for lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Normalize a terminal key event
    ///
    /// Terminals disagree on whether punctuation like '?' carries SHIFT and
    /// whether uppercase letters do; letters always get SHIFT, symbols never.
    pub fn from_event(key: &KeyEvent) -> Self {
        let mut modifiers =
            key.modifiers & (KeyModifiers::CONTROL | KeyModifiers::SHIFT | KeyModifiers::ALT);
        match key.code {
            KeyCode::Char(c) if c.is_ascii_uppercase() => modifiers.insert(KeyModifiers::SHIFT),
            KeyCode::Char(c) if !c.is_ascii_alphabetic() => modifiers.remove(KeyModifiers::SHIFT),
            KeyCode::BackTab => modifiers.insert(KeyModifiers::SHIFT),
            _ => {}
        }
        Self::new(key.code, modifiers)
    }

    /// Parse vim-style notation: `j`, `G`, `?`, `<C-d>`, `<S-Tab>`, `<CR>`, `<F5>`
    pub fn parse(notation: &str) -> Option<Self> {
        let notation = notation.trim();
        if let Some(inner) = notation.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
            return Self::parse_bracketed(inner);
        }

        let mut chars = notation.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let modifiers = if c.is_ascii_uppercase() {
            KeyModifiers::SHIFT
        } else {
            KeyModifiers::NONE
        };
        Some(Self::new(KeyCode::Char(c), modifiers))
    }

    fn parse_bracketed(inner: &str) -> Option<Self> {
        let (modifiers, name) = match inner.split_once('-') {
            Some(("C" | "c", name)) if !name.is_empty() => (KeyModifiers::CONTROL, name),
            Some(("S" | "s", name)) if !name.is_empty() => (KeyModifiers::SHIFT, name),
            Some(("A" | "a" | "M" | "m", name)) if !name.is_empty() => (KeyModifiers::ALT, name),
            _ => (KeyModifiers::NONE, inner),
        };

        let shift = modifiers == KeyModifiers::SHIFT;
        let code = match key_code(name)? {
            // Terminals report Shift+Tab as BackTab
            KeyCode::Tab if shift => KeyCode::BackTab,
            // Matches what `from_event` produces for shifted letters
            KeyCode::Char(c) if shift => KeyCode::Char(c.to_ascii_uppercase()),
            KeyCode::Char(c) if !modifiers.is_empty() => KeyCode::Char(c.to_ascii_lowercase()),
            code => code,
        };
        let modifiers = if code == KeyCode::BackTab {
            KeyModifiers::SHIFT
        } else {
            modifiers
        };
        Some(Self::new(code, modifiers))
    }
}

fn key_code(name: &str) -> Option<KeyCode> {
    let lower = name.to_ascii_lowercase();
    let code = match lower.as_str() {
        "cr" | "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" | "spc" => KeyCode::Char(' '),
        "bs" | "backspace" => KeyCode::Backspace,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        _ => {
            if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                return (1..=12).contains(&n).then_some(KeyCode::F(n));
            }
            let mut chars = name.chars();
            let c = chars.next()?;
            return chars.next().is_none().then_some(KeyCode::Char(c));
        }
    };
    Some(code)
}

/// Key to action lookup built from the `[keymap]` config section
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
    /// Doubled-key sequences like `gg`, keyed by the repeated character
    chords: HashMap<char, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    pub fn from_config(config: &KeymapConfig) -> Self {
        let table = [
            (&config.quit, Action::Quit),
            (&config.scroll_down, Action::ScrollDown),
            (&config.scroll_up, Action::ScrollUp),
            (&config.scroll_half_down, Action::ScrollHalfPageDown),
            (&config.scroll_half_up, Action::ScrollHalfPageUp),
            (&config.scroll_page_down, Action::ScrollPageDown),
            (&config.scroll_page_up, Action::ScrollPageUp),
            (&config.jump_to_top, Action::JumpToTop),
            (&config.jump_to_bottom, Action::JumpToBottom),
            (&config.next_link, Action::NextLink),
            (&config.prev_link, Action::PrevLink),
            (&config.open_link, Action::OpenLink),
            (&config.section_about, Action::JumpToSection(SectionId::About)),
            (&config.section_experience, Action::JumpToSection(SectionId::Experience)),
            (&config.section_skills, Action::JumpToSection(SectionId::Skills)),
            (&config.section_projects, Action::JumpToSection(SectionId::Projects)),
            (&config.section_contact, Action::JumpToSection(SectionId::Contact)),
            (&config.help, Action::Help),
        ];

        let mut keymap = Self {
            bindings: HashMap::new(),
            chords: HashMap::new(),
        };
        for (notation, action) in table {
            keymap.bind(notation, action);
        }

        // Always available, whatever the config says
        keymap.bindings.insert(
            KeyBinding::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Action::Quit,
        );
        keymap.bindings.insert(KeyBinding::plain(KeyCode::Esc), Action::ExitMode);
        for (code, action) in [
            (KeyCode::Down, Action::ScrollDown),
            (KeyCode::Up, Action::ScrollUp),
            (KeyCode::PageDown, Action::ScrollPageDown),
            (KeyCode::PageUp, Action::ScrollPageUp),
            (KeyCode::Home, Action::JumpToTop),
            (KeyCode::End, Action::JumpToBottom),
        ] {
            keymap.bindings.entry(KeyBinding::plain(code)).or_insert(action);
        }

        keymap
    }

    fn bind(&mut self, notation: &str, action: Action) {
        let mut chars = notation.chars();
        if let (Some(a), Some(b), None) = (chars.next(), chars.next(), chars.next()) {
            if a == b && a.is_ascii_lowercase() {
                self.chords.insert(a, action);
                return;
            }
        }

        let Some(binding) = KeyBinding::parse(notation) else {
            warn!("Invalid key binding '{}', ignoring", notation);
            return;
        };
        if let Some(existing) = self.bindings.get(&binding) {
            warn!(
                "Key '{}' is already bound to {:?}, ignoring {:?}",
                notation, existing, action
            );
            return;
        }
        self.bindings.insert(binding, action);
    }

    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }

    /// The character that starts a chord, if `binding` is one
    pub fn chord_prefix(&self, binding: &KeyBinding) -> Option<char> {
        match binding.code {
            KeyCode::Char(c) if binding.modifiers.is_empty() && self.chords.contains_key(&c) => {
                Some(c)
            }
            _ => None,
        }
    }

    /// Action for a completed chord of `c` pressed twice
    pub fn chord(&self, c: char) -> Option<&Action> {
        self.chords.get(&c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> KeyBinding {
        KeyBinding::plain(KeyCode::Char(c))
    }

    #[test]
    fn test_parse_single_characters() {
        assert_eq!(KeyBinding::parse("j"), Some(key('j')));
        assert_eq!(KeyBinding::parse(" ? "), Some(key('?')));
        assert_eq!(
            KeyBinding::parse("G"),
            Some(KeyBinding::new(KeyCode::Char('G'), KeyModifiers::SHIFT))
        );
        assert_eq!(KeyBinding::parse("jk"), None);
        assert_eq!(KeyBinding::parse(""), None);
    }

    #[test]
    fn test_parse_bracketed() {
        assert_eq!(
            KeyBinding::parse("<C-d>"),
            Some(KeyBinding::new(KeyCode::Char('d'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            KeyBinding::parse("<C-D>"),
            Some(KeyBinding::new(KeyCode::Char('d'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            KeyBinding::parse("<S-Tab>"),
            Some(KeyBinding::new(KeyCode::BackTab, KeyModifiers::SHIFT))
        );
        assert_eq!(KeyBinding::parse("<CR>"), Some(KeyBinding::plain(KeyCode::Enter)));
        assert_eq!(KeyBinding::parse("<space>"), Some(key(' ')));
        assert_eq!(KeyBinding::parse("<S-g>"), KeyBinding::parse("G"));
        assert_eq!(KeyBinding::parse("<F5>"), Some(KeyBinding::plain(KeyCode::F(5))));
        assert_eq!(KeyBinding::parse("<F13>"), None);
        assert_eq!(KeyBinding::parse("<Nope>"), None);
    }

    #[test]
    fn test_default_keymap() {
        let keymap = Keymap::default();
        assert_eq!(keymap.get(&key('q')), Some(&Action::Quit));
        assert_eq!(keymap.get(&key('j')), Some(&Action::ScrollDown));
        assert_eq!(
            keymap.get(&KeyBinding::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Some(&Action::ScrollHalfPageDown)
        );
        assert_eq!(
            keymap.get(&key('3')),
            Some(&Action::JumpToSection(SectionId::Skills))
        );
        assert_eq!(
            keymap.get(&KeyBinding::new(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(&Action::PrevLink)
        );
        assert_eq!(keymap.get(&KeyBinding::plain(KeyCode::End)), Some(&Action::JumpToBottom));
    }

    #[test]
    fn test_chords() {
        let keymap = Keymap::default();
        assert_eq!(keymap.chord_prefix(&key('g')), Some('g'));
        assert_eq!(keymap.chord('g'), Some(&Action::JumpToTop));
        assert_eq!(keymap.chord_prefix(&key('j')), None);

        let config = KeymapConfig {
            jump_to_bottom: "zz".to_string(),
            ..Default::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(keymap.chord('z'), Some(&Action::JumpToBottom));
        // End still reaches the bottom
        assert_eq!(keymap.get(&KeyBinding::plain(KeyCode::End)), Some(&Action::JumpToBottom));
    }

    #[test]
    fn test_conflicting_binding_keeps_first() {
        let config = KeymapConfig {
            help: "q".to_string(),
            ..Default::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(keymap.get(&key('q')), Some(&Action::Quit));
    }

    #[test]
    fn test_from_event_normalizes_shift() {
        let question = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(KeyBinding::from_event(&question), key('?'));
        let upper = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::NONE);
        assert_eq!(
            KeyBinding::from_event(&upper),
            KeyBinding::new(KeyCode::Char('G'), KeyModifiers::SHIFT)
        );
        let backtab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::NONE);
        assert_eq!(
            KeyBinding::from_event(&backtab),
            KeyBinding::new(KeyCode::BackTab, KeyModifiers::SHIFT)
        );
    }
}
