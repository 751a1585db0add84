//! Popup overlays.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::constants::{HELP_POPUP_HEIGHT, HELP_POPUP_WIDTH};
use crate::ui::state::AppState;

use super::helpers::centered_rect;

pub fn render_help_overlay(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let popup_area = centered_rect(HELP_POPUP_WIDTH, HELP_POPUP_HEIGHT, area);

    frame.render_widget(Clear, popup_area);

    let help_entry = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::styled(
                format!("  {:<16}", key),
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(desc.to_string(), Style::default().fg(t.text_primary)),
        ])
    };

    let help_text = vec![
        Line::raw(""),
        help_entry("Enter", &t!("help.send")),
        help_entry("←/→ Home/End", &t!("help.cursor")),
        help_entry("↑/↓ PgUp/PgDn", &t!("help.scroll")),
        help_entry("Ctrl+L", &t!("help.new_chat")),
        help_entry("Ctrl+T", &t!("help.theme")),
        help_entry("F1 / ?", &t!("help.help")),
        help_entry("Esc / Ctrl+C", &t!("help.quit")),
        Line::raw(""),
        Line::from(Span::styled(
            format!("  {}", t!("help.one_at_a_time")),
            Style::default().fg(t.text_dim),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            format!("  {}", t!("help.close")),
            Style::default().fg(t.text_muted),
        )),
    ];

    let help = Paragraph::new(help_text).block(
        Block::default()
            .title(Span::styled(
                format!(" {} ", t!("help.title")),
                t.header_style(),
            ))
            .borders(Borders::ALL)
            .border_style(t.border_highlight_style())
            .style(Style::default().bg(t.bg_panel)),
    );
    frame.render_widget(help, popup_area);
}
