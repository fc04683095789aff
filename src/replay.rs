//! Headless scenario runner.
//!
//! A script is a TOML document of `[[step]]` tables, each tagged with an
//! `op`. Steps run against a fresh [`ModalStack`] and every step yields a
//! [`StepReport`] describing the stack afterwards.
//!
//! ```toml
//! [[step]]
//! op = "open"
//! view = "wizard-1"
//! title = "Setup"
//! close_on = ["done"]
//!
//! [[step]]
//! op = "open"
//! view = "wizard-2"
//! mode = "NAV"
//!
//! [[step]]
//! op = "dispatch"
//! event = "done"
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;
use std::rc::Rc;

use color_eyre::eyre::WrapErr;
use futures::executor::block_on;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::modal::{
    ConfirmModal, EventHandlers, HeaderParam, ModalOption, ModalParams, ModalStack, ModalView,
    OpenMode, ShapeConfig, ShapeOverrides, ViewArgs, create_confirm_modal, start_confirm_modal,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Step {
    Open(OpenStep),
    Pop,
    Clear,
    /// Deliver an event to the top modal.
    Dispatch {
        event: String,
        #[serde(default)]
        detail: Value,
    },
    Confirm {
        message: String,
        #[serde(default)]
        title: Option<String>,
    },
}

impl Step {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Open(_) => "open",
            Self::Pop => "pop",
            Self::Clear => "clear",
            Self::Dispatch { .. } => "dispatch",
            Self::Confirm { .. } => "confirm",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenStep {
    pub view: String,
    #[serde(default)]
    pub title: Option<HeaderParam>,
    #[serde(default)]
    pub mode: OpenMode,
    #[serde(default)]
    pub shape: Option<ShapeOverrides>,
    #[serde(default)]
    pub args: BTreeMap<String, Value>,
    /// Events whose handler closes the whole stack.
    #[serde(default)]
    pub close_on: Vec<String>,
    /// Events whose handler only records the call.
    #[serde(default)]
    pub notify_on: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub op: &'static str,
    pub outcome: String,
    pub revision: u64,
    pub layers: Vec<LayerReport>,
    pub active: Vec<ModalReport>,
    /// Handler calls made during this step.
    pub notifications: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerReport {
    pub modals: Vec<String>,
    pub active_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalReport {
    pub id: u64,
    pub component: String,
    pub title: String,
    pub header_visible: bool,
    pub mode: OpenMode,
    pub width: String,
    pub height: String,
    pub z_index: String,
    pub shape: ShapeOrigin,
}

/// Where a modal's shape instance came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeOrigin {
    /// The stack-wide default instance.
    Default,
    /// The same instance as an earlier modal.
    Shared,
    /// Built from overrides for this modal.
    Own,
}

pub fn parse_script(content: &str) -> color_eyre::Result<Script> {
    Ok(toml::from_str(content)?)
}

pub fn load_script(path: &Path) -> color_eyre::Result<Script> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read script {}", path.display()))?;
    parse_script(&content).wrap_err_with(|| format!("invalid script {}", path.display()))
}

/// Run `script` against a new stack whose default shape is `default_shape`.
pub fn run_script(script: &Script, default_shape: ShapeConfig) -> Vec<StepReport> {
    let stack = ModalStack::with_default_shape(default_shape);
    let notifications: Rc<RefCell<Vec<String>>> = Rc::default();
    let mut opened: Vec<Rc<ModalOption>> = Vec::new();

    script
        .steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let outcome = match step {
                Step::Open(open) => {
                    let option = stack.start_modal(open_params(open, &notifications));
                    let outcome = format!("opened {}", option.id());
                    opened.push(option);
                    outcome
                }
                Step::Pop => stack
                    .pop()
                    .map_or_else(|| "nothing to pop".to_string(), |o| format!("popped {}", o.id())),
                Step::Clear => {
                    block_on(stack.clear());
                    "cleared".to_string()
                }
                Step::Dispatch { event, detail } => match stack.top() {
                    Some(top) => {
                        top.dispatch(event, detail.clone());
                        format!("dispatched {event} to {}", top.id())
                    }
                    None => "no modal open".to_string(),
                },
                Step::Confirm { message, title } => {
                    let mut confirm = ConfirmModal::new(message.clone());
                    if let Some(title) = title {
                        confirm = confirm.with_title(title.clone());
                    }
                    let option = start_confirm_modal(&stack, create_confirm_modal(confirm));
                    let outcome = format!("opened {}", option.id());
                    opened.push(option);
                    outcome
                }
            };
            tracing::debug!(index, op = step.name(), %outcome, "replayed step");
            report(index, step, outcome, &stack, &opened, &notifications)
        })
        .collect()
}

fn open_params(open: &OpenStep, notifications: &Rc<RefCell<Vec<String>>>) -> ModalParams {
    let mut args = ViewArgs::new();
    for (key, value) in &open.args {
        args.insert(key.clone(), value.clone());
    }

    let mut events = EventHandlers::new();
    for (names, closes) in [(&open.close_on, true), (&open.notify_on, false)] {
        for name in names {
            let sink = notifications.clone();
            let view = open.view.clone();
            events.insert(
                name.clone(),
                Rc::new(move |event: &crate::modal::ModalEvent| {
                    sink.borrow_mut()
                        .push(format!("{view}: {} {}", event.name, event.detail));
                    closes
                }),
            );
        }
    }

    ModalParams {
        title: open.title.clone(),
        shape: open.shape.clone(),
        view: ModalView::new(open.view.clone()).with_args(args),
        events,
        mode: open.mode,
    }
}

fn report(
    index: usize,
    step: &Step,
    outcome: String,
    stack: &ModalStack,
    opened: &[Rc<ModalOption>],
    notifications: &RefCell<Vec<String>>,
) -> StepReport {
    let snapshot = stack.snapshot();
    let default_shape = stack.default_shape();

    let layers = snapshot
        .layers()
        .iter()
        .map(|layer| LayerReport {
            modals: layer
                .options()
                .iter()
                .map(|option| option.view().component().to_string())
                .collect(),
            active_index: layer.active_index(),
        })
        .collect();

    let active = snapshot
        .active_options()
        .iter()
        .map(|option| {
            let shape = if Rc::ptr_eq(option.shape(), &default_shape) {
                ShapeOrigin::Default
            } else if opened
                .iter()
                .take_while(|earlier| earlier.id() != option.id())
                .any(|earlier| Rc::ptr_eq(earlier.shape(), option.shape()))
            {
                ShapeOrigin::Shared
            } else {
                ShapeOrigin::Own
            };
            ModalReport {
                id: option.id().get(),
                component: option.view().component().to_string(),
                title: option.title().to_string(),
                header_visible: option.header_visible(),
                mode: option.mode(),
                width: option.width().as_str().to_string(),
                height: option.height().to_string(),
                z_index: option.z_index(),
                shape,
            }
        })
        .collect();

    StepReport {
        index,
        op: step.name(),
        outcome,
        revision: snapshot.revision(),
        layers,
        active,
        notifications: notifications.borrow_mut().drain(..).collect(),
    }
}

/// Human readable rendering of a replay.
pub fn format_reports(reports: &[StepReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let _ = writeln!(
            out,
            "#{} {} -> {} (revision {})",
            report.index + 1,
            report.op,
            report.outcome,
            report.revision
        );
        for note in &report.notifications {
            let _ = writeln!(out, "    handler {note}");
        }
        if report.layers.is_empty() {
            let _ = writeln!(out, "    (empty)");
        }
        for (layer, active) in report.layers.iter().zip(&report.active) {
            let _ = writeln!(
                out,
                "    [{}] active {} \"{}\" {} {}/{} z{} shape:{:?}",
                layer.modals.join(" > "),
                active.component,
                active.title,
                active.mode,
                active.width,
                active.height,
                active.z_index,
                active.shape,
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::Width;

    fn run(script: &str) -> Vec<StepReport> {
        run_script(&parse_script(script).unwrap(), ShapeConfig::default())
    }

    #[test]
    fn test_parse_all_ops() {
        let script = parse_script(
            r#"
            [[step]]
            op = "open"
            view = "form"
            title = { title = "Edit", actions = [{ event = "help", text = "Help" }] }
            mode = "POPOVER"
            close_on = ["save"]
            shape = { width = "lg", backdrop = false }
            args = { body = "hello", count = 3 }

            [[step]]
            op = "dispatch"
            event = "save"
            detail = { id = 7 }

            [[step]]
            op = "pop"

            [[step]]
            op = "clear"

            [[step]]
            op = "confirm"
            message = "Sure?"
            "#,
        )
        .unwrap();

        assert_eq!(script.steps.len(), 5);
        let Step::Open(open) = &script.steps[0] else {
            panic!("expected open step");
        };
        assert_eq!(open.mode, OpenMode::Popover);
        assert_eq!(open.shape.as_ref().unwrap().width, Some(Width::Lg));
        assert!(matches!(open.title, Some(HeaderParam::Config(_))));
        assert_eq!(open.args["count"], serde_json::json!(3));
        assert_eq!(
            script.steps[1],
            Step::Dispatch {
                event: "save".to_string(),
                detail: serde_json::json!({ "id": 7 }),
            }
        );
        assert_eq!(script.steps[4].name(), "confirm");
    }

    #[test]
    fn test_unknown_op_is_rejected() {
        assert!(parse_script("[[step]]\nop = \"explode\"").is_err());
        assert!(parse_script("[[step]]\nop = \"open\"").is_err());
    }

    #[test]
    fn test_nav_and_popover_scenario() {
        let reports = run(
            r#"
            [[step]]
            op = "open"
            view = "wizard-1"
            title = "Setup"

            [[step]]
            op = "open"
            view = "wizard-2"
            mode = "NAV"

            [[step]]
            op = "open"
            view = "help"
            mode = "POPOVER"

            [[step]]
            op = "pop"

            [[step]]
            op = "pop"

            [[step]]
            op = "pop"

            [[step]]
            op = "pop"
            "#,
        );

        let layers: Vec<Vec<Vec<String>>> = reports
            .iter()
            .map(|r| r.layers.iter().map(|l| l.modals.clone()).collect())
            .collect();
        assert_eq!(layers[0], vec![vec!["wizard-1"]]);
        assert_eq!(layers[1], vec![vec!["wizard-1", "wizard-2"]]);
        assert_eq!(layers[2], vec![vec!["wizard-1", "wizard-2"], vec!["help"]]);
        assert_eq!(layers[3], vec![vec!["wizard-1", "wizard-2"]]);
        assert_eq!(layers[4], vec![vec!["wizard-1"]]);
        assert!(layers[5].is_empty());
        assert_eq!(reports[6].outcome, "nothing to pop");
        // the empty pop publishes nothing
        assert_eq!(reports[6].revision, reports[5].revision);

        assert_eq!(reports[0].active[0].shape, ShapeOrigin::Default);
        assert!(reports[0].active[0].header_visible);
        assert_eq!(reports[1].active[0].shape, ShapeOrigin::Default);
        assert!(!reports[1].active[0].header_visible);
    }

    #[test]
    fn test_overrides_are_inherited_by_nav() {
        let reports = run(
            r#"
            [[step]]
            op = "open"
            view = "a"
            shape = { width = "md", z_index = 800 }

            [[step]]
            op = "open"
            view = "b"
            mode = "NAV"

            [[step]]
            op = "open"
            view = "c"
            mode = "RESET"
            "#,
        );

        assert_eq!(reports[0].active[0].shape, ShapeOrigin::Own);
        assert_eq!(reports[1].active[0].shape, ShapeOrigin::Shared);
        assert_eq!(reports[1].active[0].width, "md");
        assert_eq!(reports[1].active[0].z_index, "800");
        assert_eq!(reports[2].active[0].shape, ShapeOrigin::Default);
        assert_eq!(reports[2].active[0].width, "sm");
    }

    #[test]
    fn test_dispatch_handlers() {
        let reports = run(
            r#"
            [[step]]
            op = "open"
            view = "editor"
            notify_on = ["changed"]
            close_on = ["saved"]

            [[step]]
            op = "dispatch"
            event = "changed"
            detail = { field = "name" }

            [[step]]
            op = "dispatch"
            event = "unknown"

            [[step]]
            op = "dispatch"
            event = "saved"

            [[step]]
            op = "dispatch"
            event = "saved"
            "#,
        );

        assert_eq!(reports[1].notifications, vec![r#"editor: changed {"field":"name"}"#]);
        assert_eq!(reports[1].layers.len(), 1);
        assert!(reports[2].notifications.is_empty());
        assert_eq!(reports[2].layers.len(), 1);
        assert_eq!(reports[3].notifications, vec!["editor: saved null"]);
        assert!(reports[3].layers.is_empty());
        assert_eq!(reports[4].outcome, "no modal open");
    }

    #[test]
    fn test_confirm_step_resets() {
        let reports = run(
            r#"
            [[step]]
            op = "open"
            view = "a"

            [[step]]
            op = "open"
            view = "b"
            mode = "POPOVER"

            [[step]]
            op = "confirm"
            message = "Leave?"

            [[step]]
            op = "clear"

            [[step]]
            op = "clear"
            "#,
        );

        assert_eq!(reports[2].layers.len(), 1);
        assert_eq!(reports[2].active[0].component, "confirm");
        assert_eq!(reports[2].active[0].mode, OpenMode::Reset);
        assert!(reports[3].layers.is_empty());
        // clearing an empty stack still publishes
        assert_eq!(reports[4].revision, reports[3].revision + 1);
    }

    #[test]
    fn test_text_report() {
        let reports = run(
            r#"
            [[step]]
            op = "open"
            view = "a"
            title = "First"

            [[step]]
            op = "pop"
            "#,
        );
        let text = format_reports(&reports);
        assert!(text.contains("#1 open -> opened #"));
        assert!(text.contains("[a] active a \"First\" RESET sm/auto z500 shape:Default"));
        assert!(text.contains("(empty)"));

        let json = serde_json::to_value(&reports).unwrap();
        assert_eq!(json[0]["active"][0]["mode"], "RESET");
        assert_eq!(json[0]["active"][0]["shape"], "default");
    }
}
