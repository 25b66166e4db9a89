//! orbital-tui: terminal host for the orbital layout engine
//!
//! This crate provides:
//! - The orbit view (track, core, nodes, detail card)
//! - Status bar and key hints around it
//! - Mouse and keyboard input wired to the engine's click model
//! - The event loop that drives the rotation clock

mod app;
mod event;
pub mod layout;
pub mod orbit;
#[cfg(test)]
pub mod test_utils;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use event::{key_to_action, Action, Event, EventHandler};
pub use orbital_engine;
pub use theme::{IconMode, Theme};

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use orbital_engine::{OrbitalConfig, OrbitalEngine, TimelineItem};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use tracing::info;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Everything the TUI needs to start.
#[derive(Debug, Clone)]
pub struct TuiOptions {
    pub items: Vec<TimelineItem>,
    pub config: OrbitalConfig,
    pub icon_mode: IconMode,
    pub theme: Theme,
}

impl Default for TuiOptions {
    fn default() -> Self {
        Self {
            items: orbital_engine::default_services(),
            config: OrbitalConfig::default(),
            icon_mode: IconMode::from_env(),
            theme: Theme::default(),
        }
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, mounts the engine, runs the event loop, and
/// restores the terminal on exit. Must be called from within a tokio runtime.
pub async fn run_tui(options: TuiOptions) -> Result<(), Box<dyn std::error::Error>> {
    let engine = OrbitalEngine::new(options.items, options.config)?;
    let mut app = App::new(engine, options.theme, options.icon_mode);

    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    app.handle_resize(size.width, size.height);

    let mut events = EventHandler::new();
    app.controller.mount();

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    // Stop the clock before the terminal goes back.
    app.controller.unmount();
    terminal.show_cursor()?;
    info!(angle = app.engine().angle(), "tui exited");

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            layout::render_screen(app, area, frame.buffer_mut());
        })?;

        tokio::select! {
            tick = app.controller.next_tick() => {
                app.on_tick(tick);
            }
            event = events.next() => match event {
                Some(Event::Key(key)) => app.handle_action(key_to_action(key)),
                Some(Event::Mouse(mouse)) => app.handle_mouse(mouse),
                Some(Event::Resize(width, height)) => app.handle_resize(width, height),
                None => break,
            },
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
