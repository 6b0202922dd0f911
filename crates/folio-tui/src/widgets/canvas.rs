//! Document-to-screen drawing helpers
//!
//! Elements are positioned in document coordinates. A [`Canvas`] maps them
//! onto a screen area at a scroll offset and clips everything to that area.

use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

use crate::page::wrap::{display_width, skip_columns};
use crate::theme::fade;

pub struct Canvas<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    offset: u16,
}

impl<'a> Canvas<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect, offset: u16) -> Self {
        Self { buf, area, offset }
    }

    /// Screen row of a document row, if it is inside the area
    fn screen_y(&self, y: i32) -> Option<u16> {
        let row = i32::from(self.area.y) + y - i32::from(self.offset);
        (row >= i32::from(self.area.y) && row < i32::from(self.area.bottom()))
            .then(|| row as u16)
    }

    fn screen_x(&self, x: i32) -> Option<u16> {
        let col = i32::from(self.area.x) + x;
        (col >= i32::from(self.area.x) && col < i32::from(self.area.right())).then(|| col as u16)
    }

    /// Write `text` starting at document cell (`x`, `y`), clipped on both sides
    pub fn put(&mut self, x: i32, y: i32, text: &str, style: Style) {
        let Some(row) = self.screen_y(y) else {
            return;
        };

        let (text, x) = if x < 0 {
            let (rest, pad) = skip_columns(text, x.unsigned_abs().min(u32::from(u16::MAX)) as u16);
            (rest, i32::from(pad))
        } else {
            (text, x)
        };
        let Some(col) = self.screen_x(x) else {
            return;
        };

        let room = usize::from(self.area.right() - col);
        self.buf.set_stringn(col, row, text, room, style);
    }

    /// Apply `f` to every on-screen cell of a document rect
    pub fn paint(
        &mut self,
        x: i32,
        y: i32,
        width: u16,
        height: u16,
        mut f: impl FnMut(&mut Cell, u16, u16),
    ) {
        for dy in 0..height {
            let Some(row) = self.screen_y(y + i32::from(dy)) else {
                continue;
            };
            for dx in 0..width {
                let Some(col) = self.screen_x(x + i32::from(dx)) else {
                    continue;
                };
                if let Some(cell) = self.buf.cell_mut((col, row)) {
                    f(cell, dx, dy);
                }
            }
        }
    }

    /// Solid background over a document rect
    pub fn fill(&mut self, x: i32, y: i32, width: u16, height: u16, bg: Color) {
        self.paint(x, y, width, height, |cell, _, _| {
            cell.set_symbol(" ");
            cell.set_bg(bg);
        });
    }

    /// Full-width rows in the area
    pub fn fill_rows(&mut self, y: i32, height: u16, bg: Color) {
        self.fill(0, y, self.area.width, height, bg);
    }
}

/// Style of faded content drawn over `backdrop`
///
/// Missing colors default to `fg` on `backdrop` before fading.
pub fn faded_style(style: Style, fg: Color, backdrop: Color, opacity: f32) -> Style {
    let opacity = opacity.clamp(0.0, 1.0);
    let base_fg = style.fg.unwrap_or(fg);
    let base_bg = style.bg.unwrap_or(backdrop);
    Style {
        fg: Some(fade(base_fg, backdrop, opacity)),
        bg: Some(fade(base_bg, backdrop, opacity)),
        ..style
    }
}

/// Column where a line of `width` cells starts inside `span` cells
pub fn aligned_x(align: crate::page::Align, width: u16, span: u16) -> u16 {
    match align {
        crate::page::Align::Left => 0,
        crate::page::Align::Center => span.saturating_sub(width) / 2,
        crate::page::Align::Right => span.saturating_sub(width),
    }
}

/// Width of a styled line in cells
pub fn line_width(line: &ratatui::text::Line<'_>) -> u16 {
    line.spans
        .iter()
        .map(|span| display_width(&span.content))
        .fold(0u16, u16::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Align;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_put_maps_document_rows() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 3));
        let mut canvas = Canvas::new(&mut buf, Rect::new(0, 0, 10, 3), 5);
        canvas.put(1, 6, "hi", Style::default());
        // Above and below the viewport
        canvas.put(0, 4, "no", Style::default());
        canvas.put(0, 8, "no", Style::default());
        assert_eq!(row(&buf, 1), " hi       ");
        assert_eq!(row(&buf, 0).trim(), "");
        assert_eq!(row(&buf, 2).trim(), "");
    }

    #[test]
    fn test_put_clips_horizontally() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 1));
        Canvas::new(&mut buf, Rect::new(0, 0, 6, 1), 0).put(-2, 0, "abcdef", Style::default());
        assert_eq!(row(&buf, 0), "cdef  ");
        Canvas::new(&mut buf, Rect::new(0, 0, 6, 1), 0).put(4, 0, "xyz", Style::default());
        assert_eq!(row(&buf, 0), "cdefxy");
    }

    #[test]
    fn test_area_offset_is_respected() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 4));
        let mut canvas = Canvas::new(&mut buf, Rect::new(0, 2, 6, 2), 0);
        canvas.put(0, 0, "top", Style::default());
        canvas.fill_rows(1, 5, Color::Red);
        assert_eq!(row(&buf, 2), "top   ");
        assert_eq!(buf[(0, 3)].bg, Color::Red);
        assert_eq!(buf[(0, 1)].bg, Color::Reset);
    }

    #[test]
    fn test_faded_style() {
        let style = faded_style(
            Style::default(),
            Color::Rgb(200, 200, 200),
            Color::Rgb(0, 0, 0),
            0.5,
        );
        assert_eq!(style.fg, Some(Color::Rgb(100, 100, 100)));
        assert_eq!(style.bg, Some(Color::Rgb(0, 0, 0)));
    }

    #[test]
    fn test_aligned_x() {
        assert_eq!(aligned_x(Align::Left, 4, 10), 0);
        assert_eq!(aligned_x(Align::Center, 4, 10), 3);
        assert_eq!(aligned_x(Align::Right, 4, 10), 6);
        assert_eq!(aligned_x(Align::Right, 12, 10), 0);
    }
}
