//! Main application logic and TUI event loop.

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::{debug, error, info};

use crate::cli::AppConfig;
use crate::data::{Cache, ExerciseRepository, HttpExerciseApi};
use crate::state::{self, ExerciseStore, Snapshot, UiState, NO_DATA_MSG};
use crate::ui::{
    widgets::{DetailPanel, ErrorScreen, ExerciseList, LoadingScreen, StatusBar},
    HelpOverlay, Theme,
};

/// Minimum terminal width for the side-by-side list + detail layout
const TWO_PANE_MIN_WIDTH: u16 = 100;

/// Which screen is currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    List,
    Detail,
}

/// Application state
pub struct App {
    // Configuration
    config: AppConfig,
    theme: Theme,

    // Data
    store: ExerciseStore,
    refresh_tx: Sender<Result<Snapshot>>,
    refresh_rx: Receiver<Result<Snapshot>>,

    // UI state
    view: View,
    selected: usize,
    detail_name: Option<String>,
    show_help: bool,

    // Exit flag
    should_quit: bool,

    // Error message to display (non-fatal)
    error_message: Option<String>,
}

impl App {
    /// Create a new App instance and kick off the initial fetch
    pub fn new(config: AppConfig) -> Self {
        let (refresh_tx, refresh_rx) = mpsc::channel();

        let mut app = App {
            config,
            theme: Theme::default(),
            store: ExerciseStore::new(),
            refresh_tx,
            refresh_rx,
            view: View::List,
            selected: 0,
            detail_name: None,
            show_help: false,
            should_quit: false,
            error_message: None,
        };

        // Initial data load
        app.spawn_refresh();

        app
    }

    /// Kick off a background refresh. The fetch runs on its own thread so
    /// the event loop never blocks on the network; overlapping refreshes
    /// are not coordinated, the last arrival wins.
    fn spawn_refresh(&mut self) {
        info!("refresh requested");
        self.store.set_loading();

        let config = self.config.clone();
        let tx = self.refresh_tx.clone();
        thread::spawn(move || {
            let outcome = run_refresh(&config);
            // The receiver disappears when the app quits mid-fetch
            let _ = tx.send(outcome);
        });
    }

    /// Drain finished refreshes and apply them in arrival order
    fn apply_refresh_outcomes(&mut self) {
        while let Ok(outcome) = self.refresh_rx.try_recv() {
            match outcome {
                Ok(snapshot) => {
                    self.error_message = None;
                    self.store.apply(snapshot);
                    self.after_state_change();
                }
                Err(err) => {
                    // The worker could not even build its repository
                    error!("refresh worker failed: {err:#}");
                    self.set_error(format!("Refresh failed: {err:#}"));
                    if matches!(self.store.state(), UiState::Loading) {
                        self.store.apply(Snapshot {
                            state: UiState::Error(NO_DATA_MSG.to_string()),
                            from_cache: false,
                            synced_at: None,
                        });
                    }
                }
            }
        }
    }

    /// Keep selection and detail view consistent with the new state
    fn after_state_change(&mut self) {
        let len = self.store.exercises().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }

        if self.view == View::Detail {
            let still_present = self
                .detail_name
                .as_deref()
                .is_some_and(|name| self.store.lookup(name).is_some());
            if !still_present {
                debug!("displayed exercise no longer in catalog, returning to list");
                self.view = View::List;
                self.detail_name = None;
            }
        }
    }

    /// Set an error message to display (non-fatal)
    fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
    }

    /// Handle keyboard input
    fn handle_input(&mut self, key: KeyCode) {
        // Global shortcuts
        match key {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::F(1) => {
                self.show_help = !self.show_help;
                return;
            }
            KeyCode::Esc if self.show_help => {
                self.show_help = false;
                return;
            }
            KeyCode::Char('r') => {
                self.spawn_refresh();
                return;
            }
            _ => {}
        }

        // If help is shown, don't process other keys
        if self.show_help {
            return;
        }

        match self.view {
            View::List => self.handle_list_navigation(key),
            View::Detail => self.handle_detail_navigation(key),
        }
    }

    fn handle_list_navigation(&mut self, key: KeyCode) {
        let len = self.store.exercises().len();
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                if len > 0 {
                    self.selected = (self.selected + 1) % len;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if len > 0 {
                    self.selected = self.selected.checked_sub(1).unwrap_or(len - 1);
                }
            }
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
                self.open_detail();
            }
            _ => {}
        }
    }

    fn handle_detail_navigation(&mut self, key: KeyCode) {
        let len = self.store.exercises().len();
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                if len > 0 {
                    self.selected = (self.selected + 1) % len;
                    self.open_detail();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if len > 0 {
                    self.selected = self.selected.checked_sub(1).unwrap_or(len - 1);
                    self.open_detail();
                }
            }
            KeyCode::Esc | KeyCode::Left => {
                self.view = View::List;
                self.detail_name = None;
            }
            _ => {}
        }
    }

    /// Show details for the currently selected exercise
    fn open_detail(&mut self) {
        if let Some(exercise) = self.store.exercises().get(self.selected) {
            info!(name = %exercise.name, "opening exercise details");
            self.detail_name = Some(exercise.name.clone());
            self.view = View::Detail;
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let size = frame.area();

        // Main layout: body, status bar
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Body
                Constraint::Length(2), // Status bar
            ])
            .split(size);

        match self.store.state() {
            UiState::Loading => LoadingScreen::new(&self.theme).render(frame, main_chunks[0]),
            UiState::Error(message) => {
                ErrorScreen::new(message, &self.theme).render(frame, main_chunks[0]);
            }
            UiState::Success(_) => self.render_catalog(frame, main_chunks[0]),
        }

        let count = match self.store.state() {
            UiState::Success(exercises) => Some(exercises.len()),
            _ => None,
        };
        let status_bar = StatusBar::new(
            count,
            self.store.synced_at(),
            self.store.is_from_cache(),
            self.error_message.as_deref(),
        );
        status_bar.render(frame, main_chunks[1]);

        // Render help overlay if active
        if self.show_help {
            let help = HelpOverlay::new(&self.theme);
            help.render(frame, size);
        }
    }

    /// Render the exercise list or the drill-in detail view
    fn render_catalog(&self, frame: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let exercises = self.store.exercises();

        let detail = match self.view {
            View::List => None,
            View::Detail => self
                .detail_name
                .as_deref()
                .and_then(|name| self.store.lookup(name)),
        };

        let Some(exercise) = detail else {
            let list = ExerciseList::new(exercises, self.selected, &self.theme);
            list.render(frame, area, true);
            return;
        };

        if area.width >= TWO_PANE_MIN_WIDTH {
            // Wide terminals keep the list visible next to the details
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(area);

            let list = ExerciseList::new(exercises, self.selected, &self.theme);
            list.render(frame, chunks[0], false);
            DetailPanel::new(exercise, &self.theme).render(frame, chunks[1], true);
        } else {
            DetailPanel::new(exercise, &self.theme).render(frame, area, true);
        }
    }
}

/// Build a repository and run one refresh cycle (worker thread)
fn run_refresh(config: &AppConfig) -> Result<Snapshot> {
    let api = HttpExerciseApi::new(config.url.as_str())?;
    let cache = Cache::open(&config.db_path)?;
    let mut repo = ExerciseRepository::new(api, cache);
    Ok(state::resolve(&mut repo))
}

/// Restore terminal to normal state
fn restore_terminal() {
    // Best effort cleanup - ignore errors since we may be in a panic
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

/// Run the TUI application
pub fn run(config: AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        restore_terminal();
        return Err(e).context("Failed to setup terminal");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            restore_terminal();
            return Err(e).context("Failed to create terminal");
        }
    };

    let mut app = App::new(config);

    // Main loop - wrap so cleanup always runs
    let result = run_main_loop(&mut terminal, &mut app);

    // Always restore terminal, regardless of result
    restore_terminal();
    terminal.show_cursor().ok();

    result
}

/// Main application loop
fn run_main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Apply any refreshes that finished since the last tick
        app.apply_refresh_outcomes();

        terminal.draw(|f| app.render(f))?;

        // Handle input with a short timeout so finished fetches show up
        // promptly even without keyboard activity
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_input(key.code);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
