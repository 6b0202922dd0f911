//! Dracula theme
//! https://draculatheme.com/

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x2a, 0x36), // Background
        bg1: Color::Rgb(0x21, 0x22, 0x2c), // darker band
        bg2: Color::Rgb(0x44, 0x47, 0x5a), // Current Line
        bg3: Color::Rgb(0x62, 0x72, 0xa4), // Comment
        fg0: Color::Rgb(0xf8, 0xf8, 0xf2),
        fg1: Color::Rgb(0xe9, 0xe9, 0xea),
        grey0: Color::Rgb(0x62, 0x72, 0xa4),
        grey1: Color::Rgb(0x7a, 0x7c, 0x8d),
        grey2: Color::Rgb(0x5a, 0x5c, 0x6d),
        red: Color::Rgb(0xff, 0x55, 0x55),
        orange: Color::Rgb(0xff, 0xb8, 0x6c),
        yellow: Color::Rgb(0xf1, 0xfa, 0x8c),
        green: Color::Rgb(0x50, 0xfa, 0x7b),
        aqua: Color::Rgb(0x8b, 0xe9, 0xfd),
        blue: Color::Rgb(0x62, 0x72, 0xa4),
        purple: Color::Rgb(0xbd, 0x93, 0xf9),
        pink: Color::Rgb(0xff, 0x79, 0xc6),
        accent: Color::Rgb(0x50, 0xfa, 0x7b),
        accent_soft: Color::Rgb(0x8b, 0xe9, 0xfd),
        secondary: Color::Rgb(0xbd, 0x93, 0xf9),
        secondary_soft: Color::Rgb(0xff, 0x79, 0xc6),
        selection: Color::Rgb(0x44, 0x47, 0x5a),
        error: Color::Rgb(0xff, 0x55, 0x55),
        success: Color::Rgb(0x50, 0xfa, 0x7b),
        warning: Color::Rgb(0xff, 0xb8, 0x6c),
        info: Color::Rgb(0x8b, 0xe9, 0xfd),
    }
}
