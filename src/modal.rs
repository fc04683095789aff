//! Modal navigation stack.
//!
//! This module tracks which dialogs are open and how they relate:
//! - [`ModalStack`] - ordered layers plus the open/close transitions
//! - [`Layer`] - one back-navigable lineage of modals
//! - [`ModalOption`] - a single open modal with its header, shape and view
//! - [`ShapeConfig`] / [`HeaderConfig`] - immutable presentation settings
//! - [`confirm`] - convenience builder for Ok/Cancel dialogs
//!
//! Nothing here draws anything; see [`crate::ui`] for a terminal renderer.

mod action;
pub mod confirm;
mod event;
mod header;
mod layer;
mod option;
mod shape;
mod stack;
mod view;

pub use action::ModalAction;
pub use confirm::{
    ConfirmModal, ConfirmModalSpec, create_confirm_modal, default_actions, start_confirm_modal,
};
pub use event::{EventHandlers, Handler, ModalEvent};
pub use header::{HeaderConfig, HeaderParam};
pub use layer::Layer;
pub use option::{CLOSE_ICON, ModalId, ModalOption, OpenMode};
pub use shape::{Fullscreen, ShapeConfig, ShapeOverrides, Width};
pub use stack::{ModalParams, ModalStack, StackSnapshot, Subscription, WeakModalStack};
pub use view::{DISPATCH_ARG, Dispatcher, ModalView, ViewArgs};
