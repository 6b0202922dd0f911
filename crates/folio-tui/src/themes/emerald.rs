//! Emerald theme
//! Near-black page with emerald and purple accents

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        bg0: Color::Rgb(0x0a, 0x0a, 0x0a),
        bg1: Color::Rgb(0x0f, 0x0f, 0x0f),
        bg2: Color::Rgb(0x1a, 0x1a, 0x1a),
        bg3: Color::Rgb(0x1f, 0x29, 0x37), // gray-800
        fg0: Color::Rgb(0xff, 0xff, 0xff),
        fg1: Color::Rgb(0xd1, 0xd5, 0xdb), // gray-300
        grey0: Color::Rgb(0x6b, 0x72, 0x80), // gray-500
        grey1: Color::Rgb(0x9c, 0xa3, 0xaf), // gray-400
        grey2: Color::Rgb(0x37, 0x41, 0x51), // gray-700
        red: Color::Rgb(0xef, 0x44, 0x44),
        orange: Color::Rgb(0xf9, 0x73, 0x16),
        yellow: Color::Rgb(0xea, 0xb3, 0x08),
        green: Color::Rgb(0x10, 0xb9, 0x81),
        aqua: Color::Rgb(0x06, 0xb6, 0xd4),
        blue: Color::Rgb(0x3b, 0x82, 0xf6),
        purple: Color::Rgb(0xa8, 0x55, 0xf7),
        pink: Color::Rgb(0xec, 0x48, 0x99),
        accent: Color::Rgb(0x10, 0xb9, 0x81),
        accent_soft: Color::Rgb(0x34, 0xd3, 0x99),
        secondary: Color::Rgb(0xa8, 0x55, 0xf7),
        secondary_soft: Color::Rgb(0xc0, 0x84, 0xfc),
        selection: Color::Rgb(0x06, 0x4e, 0x3b),
        error: Color::Rgb(0xef, 0x44, 0x44),
        success: Color::Rgb(0x10, 0xb9, 0x81),
        warning: Color::Rgb(0xf9, 0x73, 0x16),
        info: Color::Rgb(0x06, 0xb6, 0xd4),
    }
}
