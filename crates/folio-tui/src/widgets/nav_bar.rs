use std::time::Instant;

use folio_core::NavStyle;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::Frame;

use super::canvas::{faded_style, Canvas};
use crate::app::App;
use crate::motion::compose;
use crate::page::NavLayout;

/// Fixed navigation bar over the top rows of the page area
///
/// At the top of the page the bar is transparent: only its row is cleared
/// and the page background shows through. Past the scroll threshold it gets
/// a solid surface and a bottom border.
pub struct NavBarWidget;

impl NavBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
        let area = Rect {
            height: area.height.min(NavLayout::HEIGHT),
            ..area
        };
        if area.height == 0 {
            return;
        }

        let theme = &app.theme;
        let nav = &app.page.nav;
        let bar = app.visual(nav.bar, now);
        let nav_style = app.nav_style();
        let buf = frame.buffer_mut();

        // Clear the bar row; keep whatever background the page drew there
        let mut canvas = Canvas::new(buf, area, 0);
        let y = i32::from(bar.offset_y);
        match nav_style {
            NavStyle::Top => {
                canvas.paint(0, y, area.width, 1, |cell, _, _| {
                    cell.set_symbol(" ");
                });
            }
            NavStyle::Scrolled => {
                canvas.fill_rows(y, 1, theme.bg2);
                let border = Style::default().fg(theme.bg3).bg(theme.bg2);
                canvas.put(0, y + 1, &"─".repeat(usize::from(area.width)), border);
            }
        }

        let backdrop = match nav_style {
            NavStyle::Top => theme.bg0,
            NavStyle::Scrolled => theme.bg2,
        };
        // Text on the transparent bar keeps the page background under it
        let surface = |text: Style| match nav_style {
            NavStyle::Top => Style { bg: None, ..text },
            NavStyle::Scrolled => text,
        };

        if bar.opacity <= 0.01 {
            return;
        }

        let brand_x = i32::from(nav.brand_x) + i32::from(bar.offset_x);
        let brand_style = faded_style(
            Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
            theme.fg0,
            backdrop,
            bar.opacity,
        );
        canvas.put(brand_x, y, &nav.brand, surface(brand_style));
        let dot_x = brand_x + i32::from(crate::page::wrap::display_width(&nav.brand));
        canvas.put(
            dot_x,
            y,
            ".",
            surface(faded_style(
                Style::default().fg(theme.accent),
                theme.accent,
                backdrop,
                bar.opacity,
            )),
        );

        if nav.compact {
            return;
        }

        let current = app.current_section();
        for item in &nav.items {
            let state = compose(&bar, &app.visual(item.element, now));
            if state.opacity <= 0.01 {
                continue;
            }
            let color = if item.section == current {
                theme.accent
            } else {
                theme.fg1
            };
            let mut style = faded_style(Style::default().fg(color), color, backdrop, state.opacity);
            if app.focused_link == Some(item.link) {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }
            canvas.put(
                i32::from(item.x) + i32::from(state.offset_x),
                i32::from(state.offset_y),
                item.section.label(),
                surface(style),
            );
        }
    }
}
