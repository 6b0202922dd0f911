use crossterm::event::KeyEvent;

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};
use crate::page::SectionId;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    /// First key of a doubled-key chord, waiting for the second
    Pending(char),
    NextLink,
    PrevLink,
    OpenLink,
    JumpToSection(SectionId),
    Help,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    if app.mode == Mode::Help {
        // Any key exits help
        return Action::ExitMode;
    }

    let binding = KeyBinding::from_event(&key);

    if let Some(c) = keymap.chord_prefix(&binding) {
        return if app.pending_key == Some(c) {
            keymap.chord(c).cloned().unwrap_or(Action::None)
        } else {
            Action::Pending(c)
        };
    }

    keymap.get(&binding).cloned().unwrap_or(Action::None)
}
