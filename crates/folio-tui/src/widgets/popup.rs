use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

pub struct PopupWidget;

impl PopupWidget {
    /// Render the key binding overlay
    pub fn render_help(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let keys = &app.config.keymap;
        let entries: Vec<(String, &str)> = vec![
            (format!("{} / {}", keys.scroll_down, keys.scroll_up), "Scroll"),
            (format!("{} / {}", keys.scroll_half_down, keys.scroll_half_up), "Half page"),
            (format!("{} / {}", keys.scroll_page_down, keys.scroll_page_up), "Full page"),
            (format!("{} / {}", keys.jump_to_top, keys.jump_to_bottom), "Top / bottom"),
            (
                format!(
                    "{}-{}",
                    keys.section_about, keys.section_contact
                ),
                "About .. Contact",
            ),
            (format!("{} / {}", keys.next_link, keys.prev_link), "Next / previous link"),
            (keys.open_link.clone(), "Follow link"),
            ("<Esc>".to_string(), "Clear focus"),
            (keys.help.clone(), "Toggle help"),
            (keys.quit.clone(), "Quit"),
        ];

        let key_width = entries.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
        let lines: Vec<Line> = entries
            .into_iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>w$}", key, w = key_width),
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled("  ", Style::default()),
                    Span::styled(desc, Style::default().fg(theme.fg1)),
                ])
            })
            .collect();

        let area = frame.area();
        let popup_width = 46u16.min(area.width.saturating_sub(4));
        let popup_height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        // Clear the background area
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.secondary))
            .style(Style::default().bg(theme.bg1));

        let paragraph = Paragraph::new(lines).block(block);
        frame.render_widget(paragraph, popup_area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
