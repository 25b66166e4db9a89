//! Footer hints widget.
//!
//! Format: `Item 3/6                 [Enter] Toggle │ [Tab] Next │ [?] Help`

use orbital_engine::Phase;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

/// A single keybinding hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    /// The key or key combination (e.g., "Tab", "Esc").
    pub key: String,
    /// The action description (e.g., "Next", "Resume").
    pub action: String,
}

impl KeyHint {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Footer hints widget.
pub struct FooterHints<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
    position: Option<(usize, usize)>,
}

impl<'a> FooterHints<'a> {
    pub fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self {
            hints,
            theme,
            position: None,
        }
    }

    /// Show `Item n/total` on the left for the keyboard cursor.
    #[must_use]
    pub fn position(mut self, cursor: Option<usize>, total: usize) -> Self {
        self.position = cursor.map(|index| (index + 1, total));
        self
    }
}

impl Widget for FooterHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut left_spans = Vec::new();
        let mut right_spans = Vec::new();

        if let Some((n, total)) = self.position {
            left_spans.push(Span::styled(
                format!("Item {n}/{total}"),
                Style::default().fg(self.theme.subtext),
            ));
        }

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                right_spans.push(Span::styled(" │ ", Style::default().fg(self.theme.muted)));
            }
            right_spans.push(Span::styled("[", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(&hint.key, Style::default().fg(self.theme.primary)));
            right_spans.push(Span::styled("] ", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(&hint.action, Style::default().fg(self.theme.subtext)));
        }

        let left_width: usize = left_spans.iter().map(|s| s.content.width()).sum();
        let right_width: usize = right_spans.iter().map(|s| s.content.width()).sum();
        let padding = usize::from(area.width).saturating_sub(left_width + right_width);
        if padding > 0 {
            left_spans.push(Span::raw(" ".repeat(padding)));
        }
        left_spans.extend(right_spans);

        let paragraph =
            Paragraph::new(Line::from(left_spans)).style(Style::default().bg(self.theme.surface));
        paragraph.render(area, buf);
    }
}

/// Hints for the current phase.
#[must_use]
pub fn hints_for_phase(phase: Phase) -> Vec<KeyHint> {
    let mut hints = match phase {
        Phase::Rotating => vec![
            KeyHint::new("Enter", "Focus"),
            KeyHint::new("1-9", "Item"),
        ],
        Phase::Focused(_) => vec![
            KeyHint::new("Esc", "Resume"),
            KeyHint::new("Enter", "Collapse"),
        ],
    };
    hints.push(KeyHint::new("Tab", "Next"));
    hints.push(KeyHint::new("?", "Help"));
    hints.push(KeyHint::new("q", "Quit"));
    hints
}
