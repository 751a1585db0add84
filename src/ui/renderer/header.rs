//! Header bar: logo, endpoint, request state.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::state::AppState;
use crate::utils::{spinner_char, truncate_str};

pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(t.border_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(14), Constraint::Min(10)])
        .split(inner);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled(" ✦ ", t.badge_style(t.accent)),
        Span::styled(
            " NEXUS Lab",
            Style::default()
                .fg(t.text_primary)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    frame.render_widget(logo, chunks[0]);

    let state_span = if state.session.is_in_flight() {
        Span::styled(
            format!(
                " {} {} ",
                spinner_char(state.tick_count),
                t!("header.waiting")
            ),
            Style::default().fg(t.ai_accent).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            format!(" ● {} ", t!("header.ready")),
            Style::default().fg(t.success),
        )
    };

    let endpoint_room = (chunks[1].width as usize).saturating_sub(30);
    let summary = Paragraph::new(Line::from(vec![
        Span::styled(
            truncate_str(&state.endpoint, endpoint_room),
            Style::default().fg(t.text_dim),
        ),
        Span::styled(
            format!(
                "  {} ",
                t!("header.messages", count = state.session.messages().len())
            ),
            Style::default().fg(t.text_muted),
        ),
        state_span,
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(summary, chunks[1]);
}
