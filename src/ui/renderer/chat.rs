//! Chat history and input box.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::chat::{Message, Role};
use crate::ui::state::{AppState, Viewport};
use crate::ui::theme::Theme;
use crate::utils::{input_view_start, loading_dots, spinner_char};

use super::helpers::render_scrollbar;

pub fn render_chat_history(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let waiting = state.session.is_in_flight();

    let border_style = if waiting {
        Style::default().fg(t.ai_accent)
    } else {
        t.border_style()
    };

    let title = if waiting {
        t!("chat.thinking", spinner = spinner_char(state.tick_count)).to_string()
    } else {
        t!("chat.title").to_string()
    };

    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default()
                .fg(t.ai_accent)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Leave room for the indent and the scrollbar.
    let wrap_width = (inner.width as usize).saturating_sub(4).max(1);
    let mut lines = message_lines(state.session.messages(), t, wrap_width);

    if waiting {
        lines.push(Line::from(vec![Span::styled(
            format!("  {}{}", t!("chat.typing"), loading_dots(state.tick_count)),
            Style::default().fg(t.ai_accent),
        )]));
    }

    let visible_height = inner.height as usize;
    let total_lines = lines.len();
    state.viewport.set(Viewport {
        total_lines,
        height: visible_height,
    });
    let scroll = state.effective_scroll();

    let visible_lines: Vec<Line> = lines
        .into_iter()
        .skip(scroll)
        .take(visible_height)
        .collect();

    frame.render_widget(Paragraph::new(visible_lines), inner);

    render_scrollbar(frame, inner, total_lines, scroll);
}

/// Lay out the conversation as wrapped, styled lines.
///
/// Failed exchanges are drawn in the danger color.
fn message_lines<'a>(messages: &[Message], t: &Theme, wrap_width: usize) -> Vec<Line<'a>> {
    let mut lines: Vec<Line> = Vec::new();

    for msg in messages {
        let (label, badge_bg, text_color) = match msg.role {
            Role::User => (t!("chat.you"), t.user_accent, t.text_primary),
            Role::Assistant if msg.failed => (t!("chat.agent"), t.ai_accent, t.danger),
            Role::Assistant => (t!("chat.agent"), t.ai_accent, t.ai_response),
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", label), t.badge_style(badge_bg)),
            Span::styled(
                format!("  {}", msg.timestamp.format("%H:%M:%S")),
                Style::default().fg(t.text_muted),
            ),
        ]));
        // Keep the author's line breaks; wrap each paragraph on its own.
        for paragraph in msg.content.split('\n') {
            if paragraph.is_empty() {
                lines.push(Line::raw(""));
                continue;
            }
            for line in textwrap::wrap(paragraph, wrap_width) {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(line.into_owned(), Style::default().fg(text_color)),
                ]));
            }
        }
        lines.push(Line::raw(""));
    }

    lines
}

pub fn render_chat_input(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let waiting = state.session.is_in_flight();

    let border_style = if waiting {
        t.border_style()
    } else {
        t.border_highlight_style()
    };

    // Two columns of left padding, one for the border on each side.
    let field_width = (area.width as usize).saturating_sub(4);

    let input_line = if state.input.is_empty() {
        let hint = if waiting {
            t!("chat.waiting")
        } else {
            t!("chat.placeholder")
        };
        Line::from(vec![
            Span::raw("  "),
            Span::styled(" ", Style::default().fg(t.bg_dark).bg(t.accent)),
            Span::styled(hint.to_string(), Style::default().fg(t.text_muted)),
        ])
    } else {
        cursor_line(state, t, field_width)
    };

    let hints = Line::from(vec![
        Span::raw("  "),
        Span::styled("Enter", t.badge_style(t.accent)),
        Span::styled(t!("key.send").to_string(), Style::default().fg(t.text_muted)),
        Span::styled("Ctrl+L", t.badge_style(t.accent)),
        Span::styled(
            t!("key.new_chat").to_string(),
            Style::default().fg(t.text_muted),
        ),
        Span::styled("Esc", t.badge_style(t.accent)),
        Span::styled(t!("key.quit").to_string(), Style::default().fg(t.text_muted)),
    ]);

    let input = Paragraph::new(vec![input_line, hints]).block(
        Block::default()
            .title(Span::styled(
                t!("chat.input_title").to_string(),
                Style::default().fg(t.ai_accent),
            ))
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(input, area);
}

/// The input text with a block cursor, scrolled so the cursor stays visible.
fn cursor_line<'a>(state: &AppState, t: &Theme, width: usize) -> Line<'a> {
    let input = &state.input;
    let cursor = state.cursor_pos;
    let start = input_view_start(input, cursor, width);

    let before = &input[start..cursor];
    let after = &input[cursor..];
    let (at, rest) = match after.char_indices().nth(1) {
        Some((i, _)) => after.split_at(i),
        None if after.is_empty() => (" ", ""),
        None => (after, ""),
    };

    // Clip the tail to whatever room the cursor left.
    let room = width.saturating_sub(before.width() + at.width());
    let mut tail = String::new();
    for c in rest.chars() {
        if tail.width() + c.to_string().width() > room {
            break;
        }
        tail.push(c);
    }

    Line::from(vec![
        Span::raw("  "),
        Span::styled(before.to_string(), Style::default().fg(t.text_primary)),
        Span::styled(at.to_string(), Style::default().fg(t.bg_dark).bg(t.accent)),
        Span::styled(tail, Style::default().fg(t.text_primary)),
    ])
}
