use std::cell::Cell;
use std::time::Instant;

use crate::chat::{ChatError, ChatRequest, Session};

use super::theme::Theme;

/// Size of the chat history view as of the last frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub total_lines: usize,
    pub height: usize,
}

impl Viewport {
    /// Top line when the view is pinned to the newest message.
    pub fn bottom(&self) -> usize {
        self.total_lines.saturating_sub(self.height)
    }
}

/// Everything the renderer reads.
pub struct AppState {
    pub session: Session,

    // Input line
    pub input: String,
    /// Byte offset into `input`, always on a char boundary.
    pub cursor_pos: usize,

    /// First visible history line; `None` follows the newest message.
    pub scroll: Option<usize>,
    /// Written by the renderer so scrolling can clamp without re-wrapping.
    pub viewport: Cell<Viewport>,

    pub theme: Theme,
    pub endpoint: String,
    pub current_lang: String,
    pub show_help: bool,
    pub status_message: Option<(String, Instant)>,
    pub tick_count: u64,
}

impl AppState {
    pub fn new(session: Session, theme: Theme, endpoint: &str, lang: &str) -> Self {
        Self {
            session,
            input: String::new(),
            cursor_pos: 0,
            scroll: None,
            viewport: Cell::new(Viewport::default()),
            theme,
            endpoint: endpoint.to_string(),
            current_lang: lang.to_string(),
            show_help: false,
            status_message: None,
            tick_count: 0,
        }
    }

    pub fn set_status(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next_builtin();
        self.set_status(t!("status.theme_changed", name = &self.theme.name).to_string());
    }

    // ── Conversation ───────────────────────────────────────────

    /// Hand the input to the session. On acceptance the cursor resets and the
    /// view jumps back to the newest message.
    pub fn submit(&mut self) -> Option<ChatRequest> {
        let request = self.session.submit(&mut self.input)?;
        self.cursor_pos = 0;
        self.scroll = None;
        Some(request)
    }

    pub fn complete(&mut self, outcome: Result<String, ChatError>) {
        self.session.complete(outcome);
        self.scroll = None;
    }

    /// Start a new chat, unless a reply is still pending.
    pub fn new_chat(&mut self) {
        if self.session.reset() {
            self.scroll = None;
            self.set_status(t!("status.new_chat").to_string());
        } else {
            self.set_status(t!("status.new_chat_busy").to_string());
        }
    }

    // ── Scrolling ──────────────────────────────────────────────

    pub fn scroll_up(&mut self, lines: usize) {
        let view = self.viewport.get();
        let top = self.scroll.unwrap_or(view.bottom()).min(view.bottom());
        self.scroll = Some(top.saturating_sub(lines));
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let Some(top) = self.scroll else {
            return;
        };
        let view = self.viewport.get();
        let next = top + lines;
        self.scroll = if next >= view.bottom() { None } else { Some(next) };
    }

    /// Top line to draw for the current viewport.
    pub fn effective_scroll(&self) -> usize {
        let bottom = self.viewport.get().bottom();
        self.scroll.map_or(bottom, |top| top.min(bottom))
    }

    // ── Input editing ──────────────────────────────────────────

    pub fn input_char(&mut self, c: char) {
        self.input.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn input_backspace(&mut self) {
        if self.cursor_pos > 0 {
            let prev = self.prev_boundary();
            self.input.remove(prev);
            self.cursor_pos = prev;
        }
    }

    pub fn input_delete(&mut self) {
        if self.cursor_pos < self.input.len() {
            self.input.remove(self.cursor_pos);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_pos = self.prev_boundary();
    }

    pub fn cursor_right(&mut self) {
        if self.cursor_pos < self.input.len() {
            self.cursor_pos = self.input[self.cursor_pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_pos + i)
                .unwrap_or(self.input.len());
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_pos = self.input.len();
    }

    fn prev_boundary(&self) -> usize {
        self.input[..self.cursor_pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}
