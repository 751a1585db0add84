//! Renderer module: split into focused submodules.
//!
//! - `header`: Logo, endpoint, request state
//! - `chat`: Message history and input box
//! - `status_bar`: Bottom status bar with keybinds
//! - `overlays`: Help popup
//! - `helpers`: Shared rendering utilities

mod chat;
mod header;
mod helpers;
mod overlays;
mod status_bar;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use super::state::AppState;

/// Top-level render function.
pub fn render(frame: &mut Frame, state: &AppState) {
    let size = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header bar
            Constraint::Min(6),    // Chat history
            Constraint::Length(4), // Input box
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    header::render_header(frame, main_chunks[0], state);
    chat::render_chat_history(frame, main_chunks[1], state);
    chat::render_chat_input(frame, main_chunks[2], state);
    status_bar::render_status_bar(frame, main_chunks[3], state);

    if state.show_help {
        overlays::render_help_overlay(frame, size, state);
    }
}
