//! Two-action confirm dialog opened through a [`ModalStack`].

use std::fmt;
use std::rc::Rc;

use crate::modal::{ModalAction, ModalOption, ModalParams, ModalStack, ModalView, OpenMode, ViewArgs};

/// Component name renderers use for confirm dialogs.
pub const CONFIRM_COMPONENT: &str = "confirm";

/// Argument key holding the [`ConfirmModalSpec`].
pub const MODAL_SPEC_ARG: &str = "modal_spec";

const DEFAULT_TITLE: &str = "Title";

/// Called with the clicked action's event name and the action itself.
pub type ActionHandler = Rc<dyn Fn(&str, Option<&ModalAction>)>;

/// Actions used when a confirm dialog does not declare its own.
pub fn default_actions() -> Vec<ModalAction> {
    vec![
        ModalAction::new("ok").with_text("Ok"),
        ModalAction::new("cancel").with_text("Cancel"),
    ]
}

/// Input for [`create_confirm_modal`].
#[derive(Default)]
pub struct ConfirmModal {
    pub title: Option<String>,
    pub message: String,
    pub action_specs: Option<Vec<ModalAction>>,
    pub on_action_click: Option<ActionHandler>,
}

impl ConfirmModal {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_actions(mut self, actions: Vec<ModalAction>) -> Self {
        self.action_specs = Some(actions);
        self
    }

    pub fn on_action_click<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str, Option<&ModalAction>) + 'static,
    {
        let handler: ActionHandler = Rc::new(handler);
        self.on_action_click = Some(handler);
        self
    }
}

/// Resolved content of a confirm dialog, handed to its view.
pub struct ConfirmModalSpec {
    title: String,
    message: String,
    actions: Vec<ModalAction>,
    action_handler: ActionHandler,
}

impl ConfirmModalSpec {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn actions(&self) -> &[ModalAction] {
        &self.actions
    }

    pub fn action(&self, event: &str) -> Option<&ModalAction> {
        self.actions.iter().find(|action| action.event == event)
    }

    /// Report a click on the action emitting `event`.
    pub fn handle_action(&self, event: &str) {
        (self.action_handler)(event, self.action(event));
    }
}

impl fmt::Debug for ConfirmModalSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmModalSpec")
            .field("title", &self.title)
            .field("message", &self.message)
            .field("actions", &self.actions)
            .finish_non_exhaustive()
    }
}

fn ignore_clicks() -> ActionHandler {
    Rc::new(|_: &str, _: Option<&ModalAction>| {})
}

/// Resolve defaults: title `"Title"`, Ok/Cancel actions, a no-op handler.
///
/// Every spec owns its own copy of the actions.
pub fn create_confirm_modal(params: ConfirmModal) -> ConfirmModalSpec {
    let ConfirmModal {
        title,
        message,
        action_specs,
        on_action_click,
    } = params;

    ConfirmModalSpec {
        title: title
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        message,
        actions: action_specs.unwrap_or_else(default_actions),
        action_handler: on_action_click.unwrap_or_else(ignore_clicks),
    }
}

/// Open `spec` on `stack`, replacing whatever was open.
pub fn start_confirm_modal(stack: &ModalStack, spec: ConfirmModalSpec) -> Rc<ModalOption> {
    let args = ViewArgs::new().with(MODAL_SPEC_ARG, Rc::new(spec));
    stack.start_modal(
        ModalParams::new(ModalView::new(CONFIRM_COMPONENT).with_args(args)).mode(OpenMode::Reset),
    )
}

/// The confirm spec carried by `option`, if it is a confirm dialog.
pub fn confirm_spec(option: &ModalOption) -> Option<&Rc<ConfirmModalSpec>> {
    option.view().args().get::<Rc<ConfirmModalSpec>>(MODAL_SPEC_ARG)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::Value;

    use super::*;

    #[test]
    fn test_defaults() {
        let spec = create_confirm_modal(ConfirmModal::new("Delete the file?"));
        assert_eq!(spec.title(), "Title");
        assert_eq!(spec.message(), "Delete the file?");
        let events: Vec<_> = spec.actions().iter().map(|a| a.event.as_str()).collect();
        assert_eq!(events, vec!["ok", "cancel"]);
        // the default handler does nothing
        spec.handle_action("ok");
    }

    #[test]
    fn test_custom_actions_are_copied() {
        let mut actions = vec![ModalAction::new("yes"), ModalAction::new("no")];
        let spec = create_confirm_modal(ConfirmModal::new("a").with_actions(actions.clone()));

        actions[0].text = Some("Changed".to_string());
        actions.push(ModalAction::new("maybe"));

        let events: Vec<&str> = spec.actions().iter().map(|action| action.event.as_str()).collect();
        assert_eq!(events, ["yes", "no"]);
        assert_eq!(spec.actions()[0].text, None);
        assert_ne!(spec.actions().as_ptr(), actions.as_ptr());
    }

    #[test]
    fn test_default_actions_are_fresh_per_dialog() {
        let first = create_confirm_modal(ConfirmModal::new("a"));
        let second = create_confirm_modal(ConfirmModal::new("b"));

        assert_eq!(first.actions(), second.actions());
        assert_ne!(first.actions().as_ptr(), second.actions().as_ptr());
    }

    #[test]
    fn test_handler_receives_action() {
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let sink = clicks.clone();
        let spec = create_confirm_modal(
            ConfirmModal::new("Proceed?")
                .with_title("Confirm")
                .on_action_click(move |event, action| {
                    sink.borrow_mut()
                        .push((event.to_string(), action.and_then(|a| a.text.clone())));
                }),
        );

        spec.handle_action("cancel");
        spec.handle_action("bogus");
        assert_eq!(
            *clicks.borrow(),
            vec![
                ("cancel".to_string(), Some("Cancel".to_string())),
                ("bogus".to_string(), None),
            ]
        );
        assert_eq!(spec.title(), "Confirm");
    }

    #[test]
    fn test_start_resets_stack() {
        let stack = ModalStack::new();
        stack.start_modal(ModalParams::new(ModalView::new("a")));
        stack.start_modal(ModalParams::new(ModalView::new("b")).mode(OpenMode::Popover));

        let option = start_confirm_modal(&stack, create_confirm_modal(ConfirmModal::new("Sure?")));

        assert_eq!(stack.len(), 1);
        assert_eq!(option.mode(), OpenMode::Reset);
        assert_eq!(option.view().component(), CONFIRM_COMPONENT);
        assert!(Rc::ptr_eq(option.shape(), &stack.default_shape()));
        assert_eq!(confirm_spec(&option).unwrap().message(), "Sure?");
    }

    #[test]
    fn test_confirm_view_can_close_through_dispatch() {
        let stack = ModalStack::new();
        let option = start_confirm_modal(&stack, create_confirm_modal(ConfirmModal::new("Quit?")));
        option.on("ok", |_| true);

        let dispatcher = option.dispatcher().unwrap().clone();
        dispatcher.dispatch("cancel", Value::Null);
        assert_eq!(stack.len(), 1);
        dispatcher.dispatch("ok", Value::Null);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_plain_modal_has_no_confirm_spec() {
        let stack = ModalStack::new();
        let option = stack.start_modal(ModalParams::new(ModalView::new("text")));
        assert!(confirm_spec(&option).is_none());
    }
}
