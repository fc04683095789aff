//! Interactive demo: a modal stack driven from the keyboard.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use serde_json::json;
use tracing::{debug, info};

use crate::Theme;
use crate::config::{AppConfig, DialogAction, GlobalAction, KeyResolver};
use crate::modal::confirm::confirm_spec;
use crate::modal::{
    ConfirmModal, HeaderConfig, ModalAction, ModalParams, ModalStack, ModalView, OpenMode,
    ShapeOverrides, Subscription, ViewArgs, Width, create_confirm_modal, start_confirm_modal,
};
use crate::tui::{Event, Tui};
use crate::ui::{BODY_ARG, ModalRenderer, StatusBar, TEXT_COMPONENT, actions_for};

const FRAME_RATE: f64 = 30.0;
const ACTIVITY_LINES: usize = 200;

type Activity = Rc<RefCell<Vec<String>>>;

fn record(activity: &Activity, entry: impl Into<String>) {
    let mut lines = activity.borrow_mut();
    lines.push(entry.into());
    if lines.len() > ACTIVITY_LINES {
        let excess = lines.len() - ACTIVITY_LINES;
        lines.drain(..excess);
    }
}

fn text_view(body: &str) -> ModalView {
    ModalView::new(TEXT_COMPONENT).with_args(ViewArgs::new().with(BODY_ARG, json!(body)))
}

pub struct App {
    stack: ModalStack,
    resolver: KeyResolver,
    theme: Theme,
    activity: Activity,
    selected_action: usize,
    stack_changed: Rc<Cell<bool>>,
    needs_render: bool,
    should_quit: bool,
    _subscription: Subscription,
}

impl App {
    pub fn new(config: &AppConfig, theme: Theme) -> Self {
        let stack = ModalStack::with_default_shape(config.modal.default_shape());
        let activity: Activity = Rc::default();
        let stack_changed = Rc::new(Cell::new(false));

        let subscription = {
            let activity = activity.clone();
            let changed = stack_changed.clone();
            stack.subscribe(move |snapshot| {
                changed.set(true);
                record(
                    &activity,
                    format!(
                        "revision {}: {} layer(s) open",
                        snapshot.revision(),
                        snapshot.len()
                    ),
                );
            })
        };

        Self {
            stack,
            resolver: KeyResolver::new(Rc::new(config.keybindings.clone())),
            theme,
            activity,
            selected_action: 0,
            stack_changed,
            needs_render: true,
            should_quit: false,
            _subscription: subscription,
        }
    }

    pub const fn stack(&self) -> &ModalStack {
        &self.stack
    }

    pub const fn selected_action(&self) -> usize {
        self.selected_action
    }

    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn activity(&self) -> Vec<String> {
        self.activity.borrow().clone()
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new(FRAME_RATE)?;
        tui.enter()?;
        info!("demo started");

        while !self.should_quit {
            let Some(event) = tui.next_event().await else {
                break;
            };
            match event {
                Event::Init | Event::Resize(..) => self.needs_render = true,
                Event::Quit => self.should_quit = true,
                Event::Error(err) => tracing::warn!(%err, "terminal event error"),
                Event::Key(key) => self.handle_key(key).await,
                Event::Render => {
                    if self.needs_render {
                        tui.draw(|frame| self.draw(frame))?;
                        self.needs_render = false;
                    }
                }
            }
        }

        tui.exit()?;
        info!("demo finished");
        Ok(())
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        self.needs_render = true;
        if !self.stack.is_empty() && self.handle_dialog_key(&key) {
            self.sync_selection();
            return;
        }

        match self.resolver.resolve_global(&key) {
            Some(GlobalAction::Quit) => self.should_quit = true,
            Some(GlobalAction::Back) => self.back(),
            Some(GlobalAction::Clear) => self.stack.clear().await,
            Some(GlobalAction::OpenDemo) => self.open_wizard(),
            Some(GlobalAction::Popover) => self.open_popover(),
            Some(GlobalAction::ConfirmPrompt) => self.open_confirm(),
            None => {}
        }
        self.sync_selection();
    }

    fn handle_dialog_key(&mut self, key: &KeyEvent) -> bool {
        if let Some(slot) = KeyResolver::action_slot(key) {
            self.activate(slot);
            return true;
        }
        let Some(action) = self.resolver.resolve_dialog(key) else {
            return false;
        };
        let count = self.stack.top().map_or(0, |top| actions_for(&top).len());
        match action {
            DialogAction::Activate => self.activate(self.selected_action),
            DialogAction::Cancel => self.cancel(),
            DialogAction::NextAction if count > 0 => {
                self.selected_action = (self.selected_action + 1) % count;
            }
            DialogAction::PrevAction if count > 0 => {
                self.selected_action = (self.selected_action + count - 1) % count;
            }
            DialogAction::NextAction | DialogAction::PrevAction => {}
        }
        true
    }

    fn sync_selection(&mut self) {
        if self.stack_changed.replace(false) {
            self.selected_action = 0;
        }
    }

    fn back(&self) {
        let Some(top) = self.stack.top() else {
            return;
        };
        if !top.closable() {
            debug!(modal = %top.id(), "top modal is not closable");
            return;
        }
        self.stack.move_back();
    }

    /// Click the action at `index` of the top modal.
    fn activate(&self, index: usize) {
        let Some(option) = self.stack.top() else {
            return;
        };
        let actions = actions_for(&option);
        let Some(action) = actions.get(index) else {
            return;
        };
        if action.disabled {
            debug!(event = %action.event, "ignoring disabled action");
            return;
        }

        if let Some(spec) = confirm_spec(&option).cloned() {
            spec.handle_action(&action.event);
        }
        option.dispatch(&action.event, json!({ "index": index }));
    }

    fn cancel(&self) {
        let cancel = self
            .stack
            .top()
            .and_then(|top| actions_for(&top).iter().position(|a| a.event == "cancel"));
        match cancel {
            Some(index) => self.activate(index),
            None => self.back(),
        }
    }

    /// Three NAV steps on a fresh layer; finishing or cancelling closes it.
    pub fn open_wizard(&self) {
        let stack = self.stack.downgrade();
        let activity = self.activity.clone();
        record(&self.activity, "wizard opened");

        self.stack.start_modal(
            ModalParams::new(text_view("Welcome. This wizard walks through three steps."))
                .title("Setup · 1/3")
                .shape(ShapeOverrides::new().width(Width::Md).actions(vec![
                    ModalAction::new("next").with_text("Next"),
                    ModalAction::new("cancel").with_text("Cancel"),
                ]))
                .mode(OpenMode::Reset)
                .on("cancel", |_| true)
                .on("next", move |_| {
                    if let Some(stack) = stack.upgrade() {
                        open_wizard_step(&stack, &activity, 2);
                    }
                    false
                }),
        );
    }

    /// A small independent layer above whatever is open.
    pub fn open_popover(&self) {
        let stack = self.stack.downgrade();
        let activity = self.activity.clone();
        self.stack.start_modal(
            ModalParams::new(text_view("Popovers stack above other layers and close on their own."))
                .title(
                    HeaderConfig::new("Quick help")
                        .with_actions(vec![ModalAction::new("close").with_text("Close")]),
                )
                .shape(
                    ShapeOverrides::new()
                        .width(Width::Sm)
                        .shadow(true)
                        .backdrop(false)
                        .z_index(600),
                )
                .mode(OpenMode::Popover)
                .on("close", move |_| {
                    record(&activity, "popover closed");
                    if let Some(stack) = stack.upgrade() {
                        stack.pop();
                    }
                    false
                }),
        );
    }

    pub fn open_confirm(&self) {
        let activity = self.activity.clone();
        let spec = create_confirm_modal(
            ConfirmModal::new("Close every open dialog?")
                .with_title("Confirm")
                .on_action_click(move |event, _| record(&activity, format!("confirm: {event}"))),
        );
        let option = start_confirm_modal(&self.stack, spec);
        option.on("ok", |_| true).on("cancel", |_| true);
    }

    pub fn draw(&self, frame: &mut Frame) {
        let [main, status] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
        let snapshot = self.stack.snapshot();

        let activity = self.activity.borrow();
        let visible = usize::from(main.height.saturating_sub(2));
        let lines: Vec<Line> = activity
            .iter()
            .skip(activity.len().saturating_sub(visible))
            .map(|entry| Line::from(entry.as_str()))
            .collect();
        frame.render_widget(
            Paragraph::new(lines)
                .style(Style::default().fg(self.theme.subtext0).bg(self.theme.mantle))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(self.theme.border_type)
                        .border_style(Style::default().fg(self.theme.border()))
                        .title(" activity "),
                ),
            main,
        );

        ModalRenderer::new(&self.theme)
            .with_selected_action(self.selected_action)
            .render(frame, main, &snapshot);
        StatusBar::new(&self.resolver, &self.theme).render(frame, status, &snapshot);
    }
}

fn open_wizard_step(stack: &ModalStack, activity: &Activity, step: u8) {
    record(activity, format!("wizard step {step}"));
    let last = step == 3;
    let next = if last {
        ModalAction::new("finish").with_text("Finish")
    } else {
        ModalAction::new("next").with_text("Next")
    };

    let mut params = ModalParams::new(text_view(&format!(
        "Step {step} of 3. Press back to return to the previous step."
    )))
    .title(format!("Setup · {step}/3"))
    .shape(ShapeOverrides::new().width(Width::Md).actions(vec![next]))
    .mode(OpenMode::Nav);

    params = if last {
        let activity = activity.clone();
        params.on("finish", move |_| {
            record(&activity, "wizard finished");
            true
        })
    } else {
        let handle = stack.downgrade();
        let activity = activity.clone();
        params.on("next", move |_| {
            if let Some(stack) = handle.upgrade() {
                open_wizard_step(&stack, &activity, step + 1);
            }
            false
        })
    };
    stack.start_modal(params);
}
