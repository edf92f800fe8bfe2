//! Application state and TUI event loop.
//!
//! [`App`] owns the dashboard session, the theme and presentation preset, and
//! the current page/focus.  Key handling is separate from the terminal loop so
//! it can be driven directly in tests.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use dash_runtime::session::DashboardSession;

use crate::dashboard_view::{self, DashboardViewData, Focus, Page};
use crate::presentation::PresentationConfig;
use crate::themes::Theme;

/// Root application state for the dashboard TUI.
pub struct App {
    pub session: DashboardSession,
    pub theme: Theme,
    pub theme_name: String,
    pub presentation: PresentationConfig,
    pub page: Page,
    pub focus: Focus,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(session: DashboardSession, theme_name: &str, style_name: &str) -> Self {
        Self {
            session,
            theme: Theme::from_name(theme_name),
            theme_name: theme_name.to_string(),
            presentation: PresentationConfig::from_name(style_name),
            page: Page::Overview,
            focus: Focus::Segment,
            should_quit: false,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the interactive dashboard until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so the loop never
    /// blocks indefinitely.  Exits on `q`, `Esc` or `Ctrl+C`.
    pub async fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Apply one key press to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,

            KeyCode::Left => match self.focus {
                Focus::Segment => self.session.prev_segment(),
                Focus::Tier => self.session.prev_tier(),
            },
            KeyCode::Right => match self.focus {
                Focus::Segment => self.session.next_segment(),
                Focus::Tier => self.session.next_tier(),
            },
            KeyCode::Up | KeyCode::Down | KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.toggle();
            }

            KeyCode::PageDown => self.set_page(self.page.next()),
            KeyCode::PageUp => self.set_page(self.page.prev()),
            KeyCode::Char(c) => {
                if let Some(page) = Page::from_digit(c) {
                    self.set_page(page);
                }
            }
            _ => {}
        }
    }

    fn set_page(&mut self, page: Page) {
        if page != self.page {
            tracing::debug!(page = page.title(), "page changed");
            self.page = page;
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let data = DashboardViewData {
            snapshot: self.session.snapshot(),
            segments: self.session.segments(),
            tiers: self.session.tiers(),
            page: self.page,
            focus: self.focus,
            theme_name: &self.theme_name,
        };
        let area = frame.area();
        dashboard_view::render_dashboard(frame, area, &data, &self.presentation, &self.theme);
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
