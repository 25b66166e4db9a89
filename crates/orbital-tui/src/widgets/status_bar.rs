//! Status bar widget for the top of the TUI.
//!
//! Format: `(>) Rotating │ 12.3° │ 6 items │ → hint`

use orbital_engine::{OrbitalEngine, Phase};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{IconSet, Theme};

/// Status bar content.
#[derive(Debug, Clone, Default)]
pub struct StatusBarContent {
    /// Playback glyph.
    pub icon: String,
    /// "Rotating" or "Focused".
    pub phase: String,
    /// Ring angle, formatted.
    pub angle: String,
    /// Focused item title, or the item count while rotating.
    pub detail: String,
    /// Next action hint.
    pub hint: Option<String>,
}

impl StatusBarContent {
    pub fn from_engine(engine: &OrbitalEngine, icons: &IconSet) -> Self {
        let angle = format!("{:.1}°", engine.angle());
        match engine.phase() {
            Phase::Rotating => Self {
                icon: icons.rotating().into(),
                phase: "Rotating".into(),
                angle,
                detail: format!("{} items", engine.items().len()),
                hint: Some("click a node to focus".into()),
            },
            Phase::Focused(id) => Self {
                icon: icons.paused().into(),
                phase: "Focused".into(),
                angle,
                detail: engine
                    .item(id)
                    .map_or_else(|| id.to_string(), |item| format!("\"{}\"", item.title)),
                hint: Some("Esc to resume".into()),
            },
        }
    }

    /// Create a "terminal too small" warning.
    pub fn too_small(min_width: u16, min_height: u16) -> Self {
        Self {
            icon: "!".into(),
            phase: "Warning".into(),
            angle: String::new(),
            detail: "Terminal too small".into(),
            hint: Some(format!("Resize to at least {min_width}x{min_height}")),
        }
    }
}

/// Status bar widget.
pub struct StatusBar<'a> {
    content: &'a StatusBarContent,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(content: &'a StatusBarContent, theme: &'a Theme) -> Self {
        Self { content, theme }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let sep = || Span::styled(" │ ", Style::default().fg(self.theme.muted));
        let mut spans = vec![
            Span::styled(
                format!("{} ", self.content.icon),
                Style::default().fg(self.theme.primary),
            ),
            Span::styled(&self.content.phase, Style::default().fg(self.theme.text)),
        ];

        if !self.content.angle.is_empty() {
            spans.push(sep());
            spans.push(Span::styled(
                &self.content.angle,
                Style::default().fg(self.theme.subtext),
            ));
        }

        spans.push(sep());
        spans.push(Span::styled(
            &self.content.detail,
            Style::default().fg(self.theme.text),
        ));

        if let Some(ref hint) = self.content.hint {
            spans.push(sep());
            spans.push(Span::styled(
                format!("→ {hint}"),
                Style::default().fg(self.theme.secondary),
            ));
        }

        let line = Line::from(spans);
        let paragraph = Paragraph::new(line).style(Style::default().bg(self.theme.surface));
        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use crate::theme::IconMode;
    use insta::assert_snapshot;
    use orbital_engine::{default_services, ItemId, OrbitalConfig};

    fn render(content: &StatusBarContent) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 70, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new(content, &theme).render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_rotating_status() {
        let engine = OrbitalEngine::new(default_services(), OrbitalConfig::default()).unwrap();
        let content = StatusBarContent::from_engine(&engine, &IconSet::new(IconMode::Ascii));
        assert_snapshot!(render(&content), @"(>) Rotating │ 0.0° │ 6 items │ → click a node to focus");
    }

    #[test]
    fn test_focused_status() {
        let mut engine = OrbitalEngine::new(default_services(), OrbitalConfig::default()).unwrap();
        engine.toggle_expansion(ItemId(3));
        let content = StatusBarContent::from_engine(&engine, &IconSet::new(IconMode::Ascii));
        assert_snapshot!(render(&content), @r#"(=) Focused │ 0.0° │ "Private LLMs" │ → Esc to resume"#);
    }

    #[test]
    fn test_too_small_content() {
        let content = StatusBarContent::too_small(40, 12);
        assert_eq!(content.phase, "Warning");
        assert_eq!(content.hint.as_deref(), Some("Resize to at least 40x12"));
    }
}
