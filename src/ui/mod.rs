//! Terminal rendering of a modal stack.

mod body;
pub mod layout;
mod renderer;
mod status_bar;

pub use body::{BODY_ARG, TEXT_COMPONENT};
pub use renderer::ModalRenderer;
pub use status_bar::StatusBar;

use crate::modal::ModalAction;
use crate::modal::ModalOption;
use crate::modal::confirm::confirm_spec;

/// Actions a modal offers, in the order they are numbered on screen.
///
/// Confirm dialogs offer their own actions. Other modals offer the shape's
/// footer actions followed by the header actions.
pub fn actions_for(option: &ModalOption) -> Vec<ModalAction> {
    if let Some(spec) = confirm_spec(option) {
        return spec.actions().to_vec();
    }
    option
        .actions()
        .unwrap_or_default()
        .iter()
        .chain(option.header_actions())
        .cloned()
        .collect()
}
