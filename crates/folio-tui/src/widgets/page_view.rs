use std::time::Instant;

use folio_core::motion::{ElementId, Keyframes, VisualState};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::Frame;

use super::canvas::{aligned_x, faded_style, line_width, Canvas};
use crate::app::App;
use crate::motion::sample;
use crate::page::wrap::display_width;
use crate::page::{ElementBody, Page, PageElement};
use crate::theme::{mix, Theme};

/// Elements fainter than this are not drawn
const INVISIBLE: f32 = 0.01;

/// Strongest tint a glow adds to the background
const GLOW_STRENGTH: f32 = 0.35;

/// Scrolling document area
pub struct PageViewWidget;

impl PageViewWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
        let painter = Painter {
            page: &app.page,
            theme: &app.theme,
            focused: app.focused_link,
            visual: &|id: ElementId| app.visual(id, now),
            ambient: &|frames: &Keyframes| sample(frames, app.mounted_at, now),
        };
        painter.draw(frame.buffer_mut(), area, app.offset());
    }

    /// The whole page with every element settled, as plain text rows
    pub fn render_plain(page: &Page, theme: &Theme) -> Vec<String> {
        let area = Rect::new(0, 0, page.width, page.height);
        let mut buf = Buffer::empty(area);
        let painter = Painter {
            page,
            theme,
            focused: None,
            visual: &|_: ElementId| VisualState::SETTLED,
            ambient: &|frames: &Keyframes| frames.values.first().copied().unwrap_or(0.0),
        };
        painter.draw(&mut buf, area, 0);

        (0..area.height)
            .map(|y| {
                let mut row = String::new();
                let mut skip = 0usize;
                for x in 0..area.width {
                    let symbol = buf[(x, y)].symbol();
                    if skip > 0 {
                        skip -= 1;
                        continue;
                    }
                    skip = usize::from(display_width(symbol)).saturating_sub(1);
                    row.push_str(symbol);
                }
                row.trim_end().to_string()
            })
            .collect()
    }
}

struct Painter<'a> {
    page: &'a Page,
    theme: &'a Theme,
    focused: Option<usize>,
    visual: &'a dyn Fn(ElementId) -> VisualState,
    ambient: &'a dyn Fn(&Keyframes) -> f32,
}

impl Painter<'_> {
    fn draw(&self, buf: &mut Buffer, area: Rect, offset: u16) {
        let mut canvas = Canvas::new(buf, area, offset);
        let bottom = offset.saturating_add(area.height);

        // Section backgrounds never fade
        canvas.fill_rows(i32::from(offset), area.height, self.theme.bg0);
        for element in &self.page.elements {
            if element.parent.is_none() && matches!(element.body, ElementBody::Group) {
                canvas.fill_rows(i32::from(element.rect.y), element.rect.height, element.backdrop);
            }
        }

        for element in &self.page.elements {
            // Reveal offsets move elements by a few cells at most
            let rect = element.rect;
            if rect.y > bottom.saturating_add(4) || rect.bottom().saturating_add(4) < offset {
                continue;
            }

            let state = (self.visual)(element.id);
            if state.opacity <= INVISIBLE {
                continue;
            }
            let focused = element.link.is_some() && element.link == self.focused;
            self.element(&mut canvas, element, &state, focused);
        }
    }

    fn element(
        &self,
        canvas: &mut Canvas<'_>,
        element: &PageElement,
        state: &VisualState,
        focused: bool,
    ) {
        let x = i32::from(element.rect.x) + i32::from(state.offset_x);
        let y = i32::from(element.rect.y) + i32::from(state.offset_y);
        let (width, height) = (element.rect.width, element.rect.height);
        let backdrop = element.backdrop;
        let opacity = state.opacity;
        let highlight = if focused {
            Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            Style::default()
        };
        let style = |s: Style| faded_style(s, self.theme.fg1, backdrop, opacity).patch(highlight);

        match &element.body {
            ElementBody::Group => {}
            ElementBody::Text { lines, align } => {
                for (i, line) in lines.iter().take(usize::from(height)).enumerate() {
                    let mut col = x + i32::from(aligned_x(*align, line_width(line), width));
                    for span in &line.spans {
                        let span_style = style(line.style.patch(span.style));
                        canvas.put(col, y + i as i32, &span.content, span_style);
                        col += i32::from(display_width(&span.content));
                    }
                }
            }
            ElementBody::Button { label, fg, fill, edge } => match fill {
                Some(fill) => {
                    let text = format!("{:^w$}", label, w = usize::from(width));
                    let face = Style::default().fg(*fg).bg(*fill).add_modifier(Modifier::BOLD);
                    canvas.put(x, y, &text, style(face));
                }
                None => {
                    let inner = usize::from(width.saturating_sub(4));
                    canvas.put(x, y, "[ ", style(Style::default().fg(*edge)));
                    canvas.put(
                        x + 2,
                        y,
                        &format!("{:^w$}", label, w = inner),
                        style(Style::default().fg(*fg)),
                    );
                    canvas.put(x + 2 + inner as i32, y, " ]", style(Style::default().fg(*edge)));
                }
            },
            ElementBody::Card { border, fill } => {
                let fill = mix(backdrop, *fill, opacity);
                let edge = mix(backdrop, *border, opacity);
                let (w, h) = (width.saturating_sub(1), height.saturating_sub(1));
                canvas.paint(x, y, width, height, |cell, dx, dy| {
                    let symbol = match (dx, dy) {
                        (0, 0) => "╭",
                        (dx, 0) if dx == w => "╮",
                        (0, dy) if dy == h => "╰",
                        (dx, dy) if dx == w && dy == h => "╯",
                        (_, 0) => "─",
                        (_, dy) if dy == h => "─",
                        (0, _) => "│",
                        (dx, _) if dx == w => "│",
                        _ => " ",
                    };
                    cell.set_symbol(symbol);
                    cell.set_fg(edge);
                    cell.set_bg(fill);
                });
            }
            ElementBody::Rail { line, dot } => {
                for dy in 0..height {
                    let (symbol, color) = if dy == 1 { ("●", *dot) } else { ("│", *line) };
                    canvas.put(x, y + i32::from(dy), symbol, style(Style::default().fg(color)));
                }
            }
            ElementBody::Meter { fraction, from, to, track } => {
                // Out-of-range levels are drawn clamped
                let grown = fraction.clamp(0.0, 1.0) * f64::from(state.fill.clamp(0.0, 1.0));
                let filled = (f64::from(width) * grown).round() as u16;
                let span = f32::from(width.saturating_sub(1).max(1));
                canvas.paint(x, y, width, 1, |cell, dx, _| {
                    if dx < filled {
                        cell.set_symbol("━");
                        cell.set_fg(mix(backdrop, mix(*from, *to, f32::from(dx) / span), opacity));
                    } else {
                        cell.set_symbol("─");
                        cell.set_fg(mix(backdrop, *track, opacity));
                    }
                    cell.set_bg(backdrop);
                });
            }
            ElementBody::Banner { from, to, label } => {
                let span = f32::from(width.saturating_sub(1).max(1));
                canvas.paint(x, y, width, height, |cell, dx, _| {
                    cell.set_symbol(" ");
                    cell.set_bg(mix(backdrop, mix(*from, *to, f32::from(dx) / span), opacity));
                });
                let centered = aligned_x(crate::page::Align::Center, display_width(label), width);
                let label_x = x + i32::from(centered);
                let label_y = y + i32::from(height / 2);
                let bg = mix(backdrop, mix(*from, *to, 0.5), opacity);
                canvas.put(
                    label_x,
                    label_y,
                    label,
                    Style::default()
                        .fg(mix(bg, Color::Rgb(255, 255, 255), opacity))
                        .bg(bg)
                        .add_modifier(Modifier::BOLD),
                );
            }
            ElementBody::Sweep { text, from, to, frames } => {
                let phase = (self.ambient)(frames);
                let count = text.chars().count().max(1) as f32;
                let mut col = x;
                for (i, ch) in text.chars().enumerate() {
                    let position = (i as f32 / count + phase).rem_euclid(1.0);
                    // from -> to -> from across one period
                    let t = 1.0 - (2.0 * position - 1.0).abs();
                    let mut buf = [0u8; 4];
                    let symbol = ch.encode_utf8(&mut buf);
                    canvas.put(
                        col,
                        y,
                        symbol,
                        style(Style::default().fg(mix(*from, *to, t)).add_modifier(Modifier::BOLD)),
                    );
                    col += i32::from(display_width(symbol));
                }
            }
            ElementBody::Bounce { frame, dot, frames } => {
                let t = (self.ambient)(frames).clamp(0.0, 1.0);
                let travel = height.saturating_sub(3);
                let dot_row = 1 + (f32::from(travel) * t).round() as u16;
                let frame_style = style(Style::default().fg(*frame));
                for dy in 0..height {
                    let row = if dy == 0 {
                        "╭─╮"
                    } else if dy + 1 == height {
                        "╰─╯"
                    } else {
                        "│ │"
                    };
                    canvas.put(x, y + i32::from(dy), row, frame_style);
                }
                canvas.put(x + 1, y + i32::from(dot_row), "•", style(Style::default().fg(*dot)));
            }
            ElementBody::Glow { color, frames } => {
                let intensity = (self.ambient)(frames) * opacity;
                let (rx, ry) = (f32::from(width.max(1)) / 2.0, f32::from(height.max(1)) / 2.0);
                canvas.paint(x, y, width, height, |cell, dx, dy| {
                    let nx = (f32::from(dx) + 0.5 - rx) / rx;
                    let ny = (f32::from(dy) + 0.5 - ry) / ry;
                    let falloff = 1.0 - (nx * nx + ny * ny);
                    if falloff > 0.0 {
                        cell.set_bg(mix(cell.bg, *color, intensity * GLOW_STRENGTH * falloff));
                    }
                });
            }
        }
    }
}
