use std::rc::Rc;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::Theme;
use crate::modal::{Layer, ModalAction, ModalOption, StackSnapshot};
use crate::ui::body::body_text;
use crate::ui::layout::{length_cells, modal_area, shadow_area};
use crate::ui::actions_for;

const DEFAULT_PADDING: u16 = 1;

/// Draws the visible modal of every layer of a stack.
///
/// Modals are painted bottom layer first; a higher `z_index` moves a modal
/// above lower ones while equal values keep layer order. Only the top
/// layer's modal is drawn focused.
pub struct ModalRenderer<'a> {
    theme: &'a Theme,
    selected_action: usize,
}

impl<'a> ModalRenderer<'a> {
    pub const fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            selected_action: 0,
        }
    }

    /// Highlight action `index` of the focused modal.
    pub const fn with_selected_action(mut self, index: usize) -> Self {
        self.selected_action = index;
        self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, snapshot: &StackSnapshot) {
        let mut entries: Vec<(&Layer, &Rc<ModalOption>)> = snapshot
            .layers()
            .iter()
            .filter_map(|layer| layer.active_option().map(|option| (layer, option)))
            .collect();
        let focused = entries.last().map(|(_, option)| option.id());
        entries.sort_by_key(|(_, option)| option.shape().z_index);

        for (layer, option) in entries {
            self.render_modal(frame, area, layer, option, focused == Some(option.id()));
        }
    }

    fn render_modal(
        &self,
        frame: &mut Frame,
        area: Rect,
        layer: &Layer,
        option: &ModalOption,
        focused: bool,
    ) {
        let theme = self.theme;
        if option.backdrop() {
            frame.buffer_mut().set_style(
                area,
                Style::default()
                    .bg(theme.backdrop())
                    .fg(theme.muted())
                    .add_modifier(Modifier::DIM),
            );
        }

        let body = body_text(option, theme);
        let actions = actions_for(option);
        let padding = length_cells(option.padding()).unwrap_or(DEFAULT_PADDING);
        let vertical_padding = padding / 2;
        let footer_rows: u16 = if actions.is_empty() { 0 } else { 2 };
        let body_rows = u16::try_from(body.height()).unwrap_or(u16::MAX);
        let content_rows = body_rows
            .saturating_add(footer_rows)
            .saturating_add(vertical_padding.saturating_mul(2))
            .saturating_add(2);

        let rect = modal_area(option, area, content_rows);
        if rect.is_empty() {
            return;
        }
        if option.shadow() {
            frame
                .buffer_mut()
                .set_style(shadow_area(rect, area), Style::default().bg(theme.crust));
        }
        frame.render_widget(Clear, rect);

        let block = self.chrome(layer, option, focused).padding(Padding::symmetric(
            padding,
            vertical_padding,
        ));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let [body_area, _, footer_area] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(footer_rows.min(1)),
            Constraint::Length(footer_rows.min(1)),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new(body).wrap(Wrap { trim: false }),
            body_area,
        );
        if !actions.is_empty() {
            let selected = focused.then_some(self.selected_action);
            frame.render_widget(Paragraph::new(self.action_line(&actions, selected)), footer_area);
        }
    }

    fn chrome(&self, layer: &Layer, option: &ModalOption, focused: bool) -> Block<'static> {
        let theme = self.theme;
        let border = if focused {
            theme.border_focused()
        } else {
            theme.border()
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme.surface()).fg(theme.text));

        let can_go_back = option.closable() && layer.has_history();
        if option.header_visible() {
            let control = match (option.closable(), can_go_back) {
                (true, true) => "← ",
                (true, false) => "× ",
                (false, _) => "",
            };
            block = block.title(Line::from(vec![
                Span::raw(" "),
                Span::styled(control, Style::default().fg(theme.muted())),
                Span::styled(
                    option.title().to_string(),
                    Style::default()
                        .fg(theme.header())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
            ]));
            if !option.header_actions().is_empty() {
                let labels: Vec<&str> = option.header_actions().iter().map(ModalAction::label).collect();
                block = block.title_top(
                    Line::from(Span::styled(
                        format!(" {} ", labels.join(" · ")),
                        Style::default().fg(theme.action()),
                    ))
                    .right_aligned(),
                );
            }
        }
        if can_go_back {
            block = block.title_bottom(
                Line::from(Span::styled(" ← back ", Style::default().fg(theme.muted())))
                    .right_aligned(),
            );
        }
        block
    }

    fn action_line(&self, actions: &[ModalAction], selected: Option<usize>) -> Line<'static> {
        let theme = self.theme;
        let mut spans = Vec::with_capacity(actions.len() * 2);
        for (index, action) in actions.iter().enumerate() {
            if index > 0 {
                spans.push(Span::raw("  "));
            }
            let style = if action.disabled {
                Style::default().fg(theme.disabled())
            } else if selected == Some(index) {
                Style::default()
                    .fg(theme.action())
                    .bg(theme.action_selected_bg())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.action())
            };
            spans.push(Span::styled(format!("[{}] {}", index + 1, action.label()), style));
        }
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use serde_json::json;

    use super::*;
    use crate::modal::{
        ConfirmModal, HeaderConfig, ModalParams, ModalStack, ModalView, OpenMode, ShapeOverrides,
        ViewArgs, Width, create_confirm_modal, start_confirm_modal,
    };
    use crate::ui::body::{BODY_ARG, TEXT_COMPONENT};

    fn draw(stack: &ModalStack, selected: usize) -> String {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let snapshot = stack.snapshot();
        terminal
            .draw(|frame| {
                ModalRenderer::new(&theme)
                    .with_selected_action(selected)
                    .render(frame, frame.area(), &snapshot);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn text_modal(title: &str, body: &str) -> ModalParams {
        ModalParams::new(
            ModalView::new(TEXT_COMPONENT).with_args(ViewArgs::new().with(BODY_ARG, json!(body))),
        )
        .title(title)
    }

    #[test]
    fn test_empty_stack_draws_nothing() {
        let screen = draw(&ModalStack::new(), 0);
        assert!(screen.chars().all(|c| c == ' ' || c == '\n'));
    }

    #[test]
    fn test_text_modal_with_header() {
        let stack = ModalStack::new();
        stack.start_modal(text_modal("Welcome", "Hello from the stack"));

        let screen = draw(&stack, 0);
        assert!(screen.contains("Welcome"));
        assert!(screen.contains("Hello from the stack"));
        assert!(!screen.contains("back"));
    }

    #[test]
    fn test_nav_shows_back_hint_and_only_active_modal() {
        let stack = ModalStack::new();
        stack.start_modal(text_modal("Step one", "first"));
        stack.start_modal(text_modal("Step two", "second").mode(OpenMode::Nav));

        let screen = draw(&stack, 0);
        assert!(screen.contains("Step two"));
        assert!(!screen.contains("Step one"));
        assert!(screen.contains("← back"));
    }

    #[test]
    fn test_popover_draws_both_layers() {
        let stack = ModalStack::new();
        stack.start_modal(
            text_modal("Base", "underneath").shape(ShapeOverrides::new().width(Width::Fluid)),
        );
        stack.start_modal(
            text_modal("Popover", "on top")
                .shape(ShapeOverrides::new().width(Width::Sm))
                .mode(OpenMode::Popover),
        );

        let screen = draw(&stack, 0);
        assert!(screen.contains("Base"));
        assert!(screen.contains("Popover"));
    }

    #[test]
    fn test_confirm_actions_are_numbered() {
        let stack = ModalStack::new();
        start_confirm_modal(
            &stack,
            create_confirm_modal(ConfirmModal::new("Discard changes?").with_title("Careful")),
        );

        let screen = draw(&stack, 1);
        assert!(screen.contains("Careful"));
        assert!(screen.contains("Discard changes?"));
        assert!(screen.contains("[1] Ok"));
        assert!(screen.contains("[2] Cancel"));
    }

    #[test]
    fn test_header_actions_and_unknown_view() {
        let stack = ModalStack::new();
        stack.start_modal(
            ModalParams::new(ModalView::new("settings").with_args(ViewArgs::new().with("user", 7_u32)))
                .title(HeaderConfig::new("Settings").with_actions(vec![
                    ModalAction::new("help").with_text("Help"),
                ])),
        );

        let screen = draw(&stack, 0);
        assert!(screen.contains("Settings"));
        assert!(screen.contains("Help"));
        assert!(screen.contains("view settings"));
        assert!(screen.contains("args user"));
        assert!(!screen.contains("dispatch"));
    }

    #[test]
    fn test_fullscreen_fills_area() {
        let stack = ModalStack::new();
        stack.start_modal(
            text_modal("Full", "everything").shape(
                ShapeOverrides::new().fullscreen(crate::modal::Fullscreen::Flag(true)),
            ),
        );

        let screen = draw(&stack, 0);
        let first_row = screen.lines().next().unwrap();
        assert!(first_row.starts_with('╭'));
        assert!(first_row.contains("Full"));
    }
}
