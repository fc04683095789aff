//! Body content per view component.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use serde_json::Value;

use crate::Theme;
use crate::modal::confirm::{CONFIRM_COMPONENT, confirm_spec};
use crate::modal::{DISPATCH_ARG, ModalOption};

/// Component showing the `body` argument as plain text.
pub const TEXT_COMPONENT: &str = "text";

/// Argument key read by [`TEXT_COMPONENT`].
pub const BODY_ARG: &str = "body";

pub fn body_text(option: &ModalOption, theme: &Theme) -> Text<'static> {
    match option.view().component() {
        CONFIRM_COMPONENT => confirm_body(option, theme),
        TEXT_COMPONENT => text_body(option, theme),
        _ => placeholder_body(option, theme),
    }
}

fn confirm_body(option: &ModalOption, theme: &Theme) -> Text<'static> {
    let Some(spec) = confirm_spec(option) else {
        return placeholder_body(option, theme);
    };
    Text::from(vec![
        Line::from(Span::styled(
            spec.title().to_string(),
            Style::default()
                .fg(theme.header())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            spec.message().to_string(),
            Style::default().fg(theme.text),
        )),
    ])
}

fn text_body(option: &ModalOption, theme: &Theme) -> Text<'static> {
    let args = option.view().args();
    let body = args
        .json(BODY_ARG)
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| args.get::<String>(BODY_ARG).cloned());

    match body {
        Some(body) => Text::styled(body, Style::default().fg(theme.text)),
        None => placeholder_body(option, theme),
    }
}

fn placeholder_body(option: &ModalOption, theme: &Theme) -> Text<'static> {
    let view = option.view();
    let keys: Vec<&str> = view
        .args()
        .keys()
        .filter(|key| *key != DISPATCH_ARG)
        .collect();

    let mut lines = vec![Line::from(vec![
        Span::styled("view ", Style::default().fg(theme.muted())),
        Span::styled(
            view.component().to_string(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ])];
    if !keys.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("args {}", keys.join(", ")),
            Style::default().fg(theme.muted()),
        )));
    }
    Text::from(lines)
}
