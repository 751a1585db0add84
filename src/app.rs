//! Application struct and event loop.
//!
//! Owns the terminal, the UI state and the reply channel. The session lives
//! in `AppState`; network calls run on spawned tasks and report back through
//! an unbounded channel that the loop drains every frame.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::info;

use crate::chat::{ChatBackend, ChatError, ChatRequest, Session};
use crate::config::Config;
use crate::constants::*;
use crate::ui::{self, AppState};

/// What a request task sends back.
type ChatOutcome = Result<String, ChatError>;

/// Build a session from config: configured greeting or the locale's.
pub fn new_session(config: &Config) -> Session {
    let greeting = config
        .greeting
        .clone()
        .unwrap_or_else(|| t!("chat.greeting").to_string());
    Session::new(greeting, t!("chat.error").to_string())
}

/// Main application struct.
pub struct App {
    state: AppState,
    backend: Arc<dyn ChatBackend>,
    chat_tx: mpsc::UnboundedSender<ChatOutcome>,
    chat_rx: mpsc::UnboundedReceiver<ChatOutcome>,
}

impl App {
    pub fn new(config: &Config, backend: Arc<dyn ChatBackend>) -> Self {
        let theme = ui::Theme::by_name(&config.theme)
            .or_else(|| ui::Theme::from_toml_file(&custom_theme_path(&config.theme)))
            .unwrap_or_default();

        let state = AppState::new(new_session(config), theme, &config.endpoint, &config.lang);
        Self::with_state(state, backend)
    }

    fn with_state(state: AppState, backend: Arc<dyn ChatBackend>) -> Self {
        let (chat_tx, chat_rx) = mpsc::unbounded_channel::<ChatOutcome>();
        Self {
            state,
            backend,
            chat_tx,
            chat_rx,
        }
    }

    /// Run the main event loop. Returns when the user quits.
    pub async fn run(&mut self) -> Result<()> {
        // Terminal init
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal);

        // Cleanup runs even if the loop failed.
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|frame| ui::render(frame, &self.state))?;

            self.drain_chat_events();

            if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            break; // quit requested
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }

            self.state.tick_count = self.state.tick_count.wrapping_add(1);
        }
        info!("quit requested");
        Ok(())
    }

    // ── Channel draining ─────────────────────────────────────────

    fn drain_chat_events(&mut self) {
        while let Ok(outcome) = self.chat_rx.try_recv() {
            self.state.complete(outcome);
        }
    }

    // ── Dispatch ─────────────────────────────────────────────────

    /// Spawn the request; the outcome comes back on the chat channel.
    fn dispatch(&self, request: ChatRequest) {
        info!(messages = request.messages.len(), "dispatching chat request");
        let backend = Arc::clone(&self.backend);
        let tx = self.chat_tx.clone();

        tokio::spawn(async move {
            let outcome = backend.send(&request).await;
            let _ = tx.send(outcome);
        });
    }

    // ── Input ────────────────────────────────────────────────────

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.state.scroll_up(MOUSE_SCROLL_STEP),
            MouseEventKind::ScrollDown => self.state.scroll_down(MOUSE_SCROLL_STEP),
            _ => {}
        }
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.state.show_help {
            return self.handle_key_help(key);
        }

        self.handle_key_chat(key)
    }

    fn handle_key_help(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                self.state.show_help = false;
            }
            _ => {}
        }
        false
    }

    /// The input box is locked while a reply is pending; scrolling, help,
    /// theme and quit keep working.
    fn handle_key_chat(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let editable = !self.state.session.is_in_flight();
        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Enter => {
                if let Some(request) = self.state.submit() {
                    self.dispatch(request);
                }
            }
            KeyCode::Char('l') if ctrl => self.state.new_chat(),
            KeyCode::Char('t') if ctrl => self.state.cycle_theme(),
            KeyCode::F(1) => self.state.show_help = true,
            KeyCode::Char('?') if self.state.input.is_empty() => self.state.show_help = true,
            KeyCode::Backspace if editable => self.state.input_backspace(),
            KeyCode::Delete if editable => self.state.input_delete(),
            KeyCode::Left if editable => self.state.cursor_left(),
            KeyCode::Right if editable => self.state.cursor_right(),
            KeyCode::Home if editable => self.state.cursor_home(),
            KeyCode::End if editable => self.state.cursor_end(),
            KeyCode::Up => self.state.scroll_up(1),
            KeyCode::Down => self.state.scroll_down(1),
            KeyCode::PageUp => self.state.scroll_up(PAGE_SIZE),
            KeyCode::PageDown => self.state.scroll_down(PAGE_SIZE),
            KeyCode::Char(c) if editable && !ctrl && !alt => {
                self.state.input_char(c);
            }
            _ => {}
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// Backend that counts calls and holds every reply until released.
    struct Gated {
        calls: AtomicUsize,
        release: Notify,
        reply: Result<String, String>,
    }

    impl Gated {
        fn new(reply: Result<&str, &str>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                release: Notify::new(),
                reply: reply.map(str::to_string).map_err(str::to_string),
            })
        }
    }

    #[async_trait]
    impl ChatBackend for Gated {
        async fn send(&self, _request: &ChatRequest) -> Result<String, ChatError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.release.notified().await;
            self.reply.clone().map_err(ChatError::RequestFailed)
        }
    }

    fn make_app(backend: Arc<Gated>) -> App {
        let state = AppState::new(
            Session::new("welcome", "Could not reach the server."),
            ui::Theme::default(),
            "http://localhost:8000/chat",
            "en",
        );
        App::with_state(state, backend)
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    /// Release the held reply and wait for it to reach the session.
    async fn finish(app: &mut App, backend: &Gated) {
        backend.release.notify_one();
        let outcome = app.chat_rx.recv().await.unwrap();
        app.state.complete(outcome);
    }

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn enter_dispatches_one_request() {
        let backend = Gated::new(Ok("hi there"));
        let mut app = make_app(backend.clone());

        type_str(&mut app, "hello");
        press(&mut app, KeyCode::Enter);
        settle().await;

        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
        assert!(app.state.session.is_in_flight());

        finish(&mut app, &backend).await;
        let last = app.state.session.messages().last().unwrap();
        assert_eq!(last.content, "hi there");
        assert!(!app.state.session.is_in_flight());
    }

    #[tokio::test]
    async fn enter_while_waiting_sends_nothing() {
        let backend = Gated::new(Ok("hi"));
        let mut app = make_app(backend.clone());

        type_str(&mut app, "one");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "two");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        settle().await;

        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
        assert!(app.state.input.is_empty());
        assert_eq!(app.state.session.messages().len(), 2);
    }

    #[tokio::test]
    async fn input_is_locked_until_reply_arrives() {
        let backend = Gated::new(Ok("hi"));
        let mut app = make_app(backend.clone());

        type_str(&mut app, "one");
        press(&mut app, KeyCode::Enter);
        settle().await;

        type_str(&mut app, "two");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Left);
        assert!(app.state.input.is_empty());
        assert_eq!(app.state.cursor_pos, 0);

        // Help and quit still respond.
        press(&mut app, KeyCode::F(1));
        assert!(app.state.show_help);
        press(&mut app, KeyCode::Esc);
        assert!(!app.state.show_help);

        finish(&mut app, &backend).await;
        type_str(&mut app, "two");
        assert_eq!(app.state.input, "two");
        assert!(press(&mut app, KeyCode::Esc));
    }

    #[tokio::test]
    async fn blank_enter_sends_nothing() {
        let backend = Gated::new(Ok("hi"));
        let mut app = make_app(backend.clone());

        type_str(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        settle().await;

        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
        assert_eq!(app.state.session.messages().len(), 1);
    }

    #[tokio::test]
    async fn failure_shows_placeholder() {
        let backend = Gated::new(Err("HTTP 502"));
        let mut app = make_app(backend.clone());

        type_str(&mut app, "hello");
        press(&mut app, KeyCode::Enter);
        settle().await;
        finish(&mut app, &backend).await;

        let messages = app.state.session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].content, "Could not reach the server.");
        assert!(!app.state.session.is_in_flight());
    }

    #[tokio::test]
    async fn drain_applies_pending_outcomes() {
        let backend = Gated::new(Ok("unused"));
        let mut app = make_app(backend);

        type_str(&mut app, "hello");
        assert!(app.state.submit().is_some());
        app.chat_tx.send(Ok("queued".into())).unwrap();
        app.drain_chat_events();

        assert_eq!(app.state.session.messages()[2].content, "queued");
    }

    #[test]
    fn esc_and_ctrl_c_quit() {
        let mut app = make_app(Gated::new(Ok("")));
        assert!(press(&mut app, KeyCode::Esc));
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn help_toggles_and_swallows_keys() {
        let mut app = make_app(Gated::new(Ok("")));
        press(&mut app, KeyCode::Char('?'));
        assert!(app.state.show_help);

        // Esc closes help instead of quitting.
        assert!(!press(&mut app, KeyCode::Esc));
        assert!(!app.state.show_help);
    }

    #[test]
    fn question_mark_types_when_input_not_empty() {
        let mut app = make_app(Gated::new(Ok("")));
        type_str(&mut app, "why?");
        assert_eq!(app.state.input, "why?");
        assert!(!app.state.show_help);
    }

    #[test]
    fn ctrl_l_starts_new_chat() {
        let mut app = make_app(Gated::new(Ok("")));
        app.state.session.submit(&mut "hello".to_string());
        app.state.complete(Ok("hi".into()));
        assert_eq!(app.state.session.messages().len(), 3);

        app.handle_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
        assert_eq!(app.state.session.messages().len(), 1);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut app = make_app(Gated::new(Ok("")));
        let mut key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        app.handle_key(key);
        assert!(app.state.input.is_empty());
    }

    #[test]
    fn new_session_uses_configured_greeting() {
        let config = Config {
            greeting: Some("Olá Fabrício!".into()),
            ..Config::default()
        };
        let session = new_session(&config);
        assert_eq!(session.messages()[0].content, "Olá Fabrício!");
    }
}
