//! Screen layout: status bar, orbit, footer hints.
//!
//! ```text
//! ┌ status bar (1 line) ─────────────────┐
//! │ orbit                                │
//! └ footer hints (1 line) ───────────────┘
//! ```

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::app::App;
use crate::orbit::OrbitWidget;
use crate::widgets::{hints_for_phase, FooterHints, StatusBar, StatusBarContent};

/// Minimum terminal width.
pub const MIN_WIDTH: u16 = 40;
/// Minimum terminal height.
pub const MIN_HEIGHT: u16 = 12;

/// The three screen regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub status: Rect,
    pub orbit: Rect,
    pub footer: Rect,
}

/// Split the terminal into status bar, orbit, and footer.
pub fn screen_areas(area: Rect) -> ScreenAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(0),    // Orbit
            Constraint::Length(1), // Footer hints
        ])
        .split(area);
    ScreenAreas {
        status: chunks[0],
        orbit: chunks[1],
        footer: chunks[2],
    }
}

/// Whether a terminal of this size gets the full screen rather than a notice.
pub fn terminal_fits(area: Rect) -> bool {
    area.width >= MIN_WIDTH && area.height >= MIN_HEIGHT
}

/// Inner orbit area on a terminal of this size, or `None` when a size notice
/// is drawn in place of the ring.
pub fn visible_orbit(area: Rect) -> Option<Rect> {
    if !terminal_fits(area) {
        return None;
    }
    let inner = OrbitWidget::inner(screen_areas(area).orbit);
    OrbitWidget::fits(inner).then_some(inner)
}

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Render the full screen for `app`.
pub fn render_screen(app: &App, area: Rect, buf: &mut Buffer) {
    if !terminal_fits(area) {
        let content = StatusBarContent::too_small(MIN_WIDTH, MIN_HEIGHT);
        StatusBar::new(&content, &app.theme).render(area, buf);
        return;
    }

    let areas = screen_areas(area);
    let engine = app.engine();

    let status = StatusBarContent::from_engine(engine, &app.icons);
    StatusBar::new(&status, &app.theme).render(areas.status, buf);

    OrbitWidget::new(engine, &app.theme, &app.icons, &app.borders)
        .cursor(app.cursor_item())
        .render(areas.orbit, buf);

    let hints = hints_for_phase(engine.phase());
    FooterHints::new(&hints, &app.theme)
        .position(app.cursor, engine.items().len())
        .render(areas.footer, buf);

    if app.show_help {
        render_help_overlay(app, area, buf);
    }
}

const HELP_LINES: &[(&str, &str)] = &[
    ("click", "Focus a node / resume"),
    ("Tab / Shift+Tab", "Next / previous item"),
    ("Enter / Space", "Toggle item under cursor"),
    ("1-9", "Toggle item by position"),
    ("Esc", "Collapse and resume"),
    ("?", "Toggle this help"),
    ("q", "Quit"),
];

/// Render the keybinding overlay.
pub fn render_help_overlay(app: &App, area: Rect, buf: &mut Buffer) {
    let theme = &app.theme;
    #[allow(clippy::cast_possible_truncation)]
    let height = (HELP_LINES.len() as u16 + 4).min(area.height.saturating_sub(2));
    let width = 46.min(area.width.saturating_sub(4));
    let overlay = centered_fixed(width, height, area);

    Clear.render(overlay, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(Style::default().fg(theme.primary).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_set(app.borders.overlay())
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.surface));

    let mut lines: Vec<Line<'_>> = HELP_LINES
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!(" {key:<16}"), Style::default().fg(theme.primary)),
                Span::styled(*action, Style::default().fg(theme.text)),
            ])
        })
        .collect();
    lines.push(Line::default());
    lines.push(Line::styled(
        " [Press any key to close]",
        Style::default().fg(theme.muted),
    ));

    Paragraph::new(lines).block(block).render(overlay, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Action;
    use crate::test_utils::{create_test_app, render_app_sized, render_app_to_string};

    #[test]
    fn test_screen_areas() {
        let areas = screen_areas(Rect::new(0, 0, 80, 24));
        assert_eq!(areas.status, Rect::new(0, 0, 80, 1));
        assert_eq!(areas.orbit, Rect::new(0, 1, 80, 22));
        assert_eq!(areas.footer, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn test_centered_fixed() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_fixed(40, 10, area), Rect::new(20, 7, 40, 10));
        assert_eq!(centered_fixed(100, 30, area), area);
    }

    #[test]
    fn test_full_screen() {
        let app = create_test_app();
        let output = render_app_to_string(&app);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 24);
        assert!(lines[0].starts_with("(>) Rotating"));
        assert!(lines[1].contains("Services"));
        assert!(lines[23].ends_with("[q] Quit"));
        assert!(output.contains("[S] Security"));
    }

    #[test]
    fn test_focused_screen() {
        let mut app = create_test_app();
        app.handle_action(Action::Item(1));
        let output = render_app_to_string(&app);

        assert!(output.contains("\"Your AI Team\""));
        assert!(output.contains("[Esc] Resume"));
        assert!(output.contains("Item 2/6"));
        assert!(output.contains("Energy"));
    }

    #[test]
    fn test_help_overlay() {
        let mut app = create_test_app();
        app.handle_action(Action::Help);
        let output = render_app_to_string(&app);
        assert!(output.contains("Help"));
        assert!(output.contains("Toggle this help"));
        assert!(output.contains("[Press any key to close]"));
    }

    #[test]
    fn test_visible_orbit_follows_size_guards() {
        assert_eq!(visible_orbit(Rect::new(0, 0, 30, 10)), None);
        assert_eq!(visible_orbit(Rect::new(0, 0, 40, 11)), None);
        assert_eq!(
            visible_orbit(Rect::new(0, 0, MIN_WIDTH, MIN_HEIGHT)),
            Some(Rect::new(1, 2, 38, 8))
        );
        assert_eq!(
            visible_orbit(Rect::new(0, 0, 80, 24)),
            Some(Rect::new(1, 2, 78, 20))
        );
    }

    #[test]
    fn test_too_small_terminal() {
        let mut app = create_test_app();
        let output = render_app_sized(&mut app, 30, 8);
        assert!(output.contains("Terminal too small"));
        assert!(!output.contains("Services"));
    }
}
