use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::Theme;
use crate::config::{GlobalAction, KeyResolver};
use crate::modal::StackSnapshot;

/// One-line footer with stack depth and the global key hints.
pub struct StatusBar<'a> {
    resolver: &'a KeyResolver,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub const fn new(resolver: &'a KeyResolver, theme: &'a Theme) -> Self {
        Self { resolver, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, snapshot: &StackSnapshot) {
        frame.render_widget(Paragraph::new(self.line(snapshot)), area);
    }

    fn line(&self, snapshot: &StackSnapshot) -> Line<'static> {
        let key_style = Style::default()
            .fg(self.theme.yellow)
            .add_modifier(Modifier::BOLD);
        let label_style = Style::default().fg(self.theme.subtext0);

        let depth: usize = snapshot.layers().iter().map(crate::modal::Layer::len).sum();
        let mut spans = vec![Span::styled(
            format!(" layers {} · modals {} ", snapshot.len(), depth),
            Style::default().fg(self.theme.text).bg(self.theme.surface0),
        )];

        for (action, label) in [
            (GlobalAction::OpenDemo, "wizard"),
            (GlobalAction::Popover, "popover"),
            (GlobalAction::ConfirmPrompt, "confirm"),
            (GlobalAction::Back, "back"),
            (GlobalAction::Clear, "clear"),
            (GlobalAction::Quit, "quit"),
        ] {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(self.resolver.display_global(action), key_style));
            spans.push(Span::styled(format!(" {label}"), label_style));
        }
        Line::from(spans)
    }
}
