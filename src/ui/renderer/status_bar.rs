//! Status bar at the bottom of the screen.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::constants::STATUS_MESSAGE_TIMEOUT_SECS;
use crate::ui::state::AppState;

pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;

    let badge = |key: &str| -> Span { Span::styled(format!(" {} ", key), t.badge_style(t.accent)) };
    let dim =
        |text: &str| -> Span { Span::styled(text.to_string(), Style::default().fg(t.text_dim)) };

    let mut spans = vec![
        Span::raw(" "),
        badge("Esc"),
        dim(&t!("status.quit")),
        badge("↑↓"),
        dim(&t!("status.scroll")),
        badge("Ctrl+T"),
        dim(&t!("status.theme", name = &t.name)),
        badge("F1"),
        dim(&t!("status.help")),
        dim(&format!(" {} ", state.current_lang.to_uppercase())),
    ];

    // Transient status message -- auto-expires
    if let Some((msg, when)) = &state.status_message {
        if when.elapsed().as_secs() < STATUS_MESSAGE_TIMEOUT_SECS {
            spans.push(Span::styled(
                format!("  {} ", msg),
                Style::default().fg(t.warning).add_modifier(Modifier::BOLD),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
