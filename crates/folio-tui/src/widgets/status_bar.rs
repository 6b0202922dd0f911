use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Mode};
use crate::page::wrap::display_width;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = match app.mode {
            Mode::Normal => "NORMAL",
            Mode::Help => "HELP",
        };

        let max_scroll = app.page.max_scroll();
        let percent = if max_scroll == 0 {
            100
        } else {
            u32::from(app.offset()) * 100 / u32::from(max_scroll)
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            let link = app
                .focused_link
                .and_then(|i| app.page.links.get(i))
                .map(|link| format!(" | → {}", link.label))
                .unwrap_or_default();
            format!(
                " {} | {} | {}%{}",
                mode_str,
                app.current_section().label(),
                percent,
                link
            )
        };

        let help_hint = " q:quit j/k:scroll 1-5:sections tab:links ?:help ";
        let hint_width = display_width(help_hint);
        let status_text = truncate_str(
            &status_text,
            usize::from(area.width.saturating_sub(hint_width)),
        );
        let padding_len = area
            .width
            .saturating_sub(display_width(&status_text) + hint_width) as usize;

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        let paragraph = Paragraph::new(line);
        frame.render_widget(paragraph, area);
    }
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len < 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}
