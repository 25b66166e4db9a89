//! Helpers for rendering tests.

use crate::app::App;
use crate::layout::render_screen;
use ratatui::{buffer::Buffer, layout::Rect};

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Test app over the default services with ASCII icons.
pub fn create_test_app() -> App {
    App::new_for_test()
}

/// Convert a buffer to a string, one line per row, trailing spaces trimmed.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}

/// Render the whole screen at the app's current size.
pub fn render_app_to_string(app: &App) -> String {
    let area = app.area();
    let mut buffer = Buffer::empty(area);
    render_screen(app, area, &mut buffer);
    buffer_to_string(&buffer)
}

/// Render the whole screen into an area of the given size.
pub fn render_app_sized(app: &mut App, width: u16, height: u16) -> String {
    app.handle_resize(width, height);
    let mut buffer = Buffer::empty(Rect::new(0, 0, width, height));
    render_screen(app, buffer.area, &mut buffer);
    buffer_to_string(&buffer)
}
