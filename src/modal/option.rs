//! A single open modal and the event bridge back to its opener.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::modal::stack::{ModalStack, Shared};
use crate::modal::{
    Dispatcher, EventHandlers, Fullscreen, HeaderConfig, ModalAction, ModalEvent, ModalView,
    ShapeConfig, Width,
};

/// Icon renderers show on the close/back control.
pub const CLOSE_ICON: &str = "arrow_back.svg";

static MODAL_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of an open modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ModalId(u64);

impl ModalId {
    fn next() -> Self {
        Self(MODAL_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How an open request composes with the modals already on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OpenMode {
    /// Close everything and show only the new modal.
    #[default]
    Reset,
    /// Push onto the top layer so "back" returns to the previous modal.
    Nav,
    /// Open a new independent layer above the existing ones.
    Popover,
}

impl OpenMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reset => "RESET",
            Self::Nav => "NAV",
            Self::Popover => "POPOVER",
        }
    }

    /// Whether a modal opened in this mode reuses the previous modal's shape.
    pub const fn inherits_shape(self) -> bool {
        !matches!(self, Self::Reset)
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a renderer needs to present one dialog.
///
/// Shared behind an [`Rc`]: the stack, renderers and the opener all hold the
/// same instance. The shape may also be shared with sibling modals.
pub struct ModalOption {
    id: ModalId,
    header: HeaderConfig,
    shape: Rc<ShapeConfig>,
    view: ModalView,
    handlers: RefCell<EventHandlers>,
    mode: OpenMode,
    owner: Weak<Shared>,
}

impl ModalOption {
    pub(crate) fn build(
        header: HeaderConfig,
        shape: Rc<ShapeConfig>,
        mut view: ModalView,
        handlers: EventHandlers,
        mode: OpenMode,
        owner: Weak<Shared>,
    ) -> Rc<Self> {
        Rc::new_cyclic(|this| {
            view.bind_dispatcher(Dispatcher::new(this.clone()));
            Self {
                id: ModalId::next(),
                header,
                shape,
                view,
                handlers: RefCell::new(handlers),
                mode,
                owner,
            }
        })
    }

    pub const fn id(&self) -> ModalId {
        self.id
    }

    pub const fn mode(&self) -> OpenMode {
        self.mode
    }

    pub const fn header(&self) -> &HeaderConfig {
        &self.header
    }

    pub const fn shape(&self) -> &Rc<ShapeConfig> {
        &self.shape
    }

    pub const fn view(&self) -> &ModalView {
        &self.view
    }

    pub fn dispatcher(&self) -> Option<&Dispatcher> {
        self.view.args().dispatcher()
    }

    /// Register `handler` for `event`, replacing any previous one.
    pub fn on<F>(&self, event: impl Into<String>, handler: F) -> &Self
    where
        F: Fn(&ModalEvent) -> bool + 'static,
    {
        self.handlers.borrow_mut().insert(event, Rc::new(handler));
        self
    }

    pub(crate) fn is_owned_by(&self, shared: &Rc<Shared>) -> bool {
        std::ptr::eq(self.owner.as_ptr(), Rc::as_ptr(shared))
    }

    pub fn handles(&self, event: &str) -> bool {
        self.handlers.borrow().contains(event)
    }

    /// Deliver `event` to its handler.
    ///
    /// A missing handler is a no-op. A handler returning `true` clears the
    /// whole stack that owns this modal. Always returns `true` so views never
    /// block on unhandled events.
    pub fn dispatch(&self, event: &str, detail: Value) -> bool {
        // release the borrow before calling out: handlers may call `on`
        let handler = self.handlers.borrow().get(event);
        let Some(handler) = handler else {
            tracing::trace!(modal = %self.id, event, "no handler registered");
            return true;
        };

        let close = handler(&ModalEvent::new(event, detail));
        if close {
            tracing::debug!(modal = %self.id, event, "handler requested close, clearing stack");
            if let Some(stack) = ModalStack::upgrade(&self.owner) {
                stack.clear_layers();
            }
        }
        true
    }

    // --- presentation accessors ---

    pub fn title(&self) -> &str {
        &self.header.title
    }

    pub const fn header_visible(&self) -> bool {
        self.header.visible
    }

    pub fn header_actions(&self) -> &[ModalAction] {
        &self.header.actions
    }

    /// Footer actions declared by the shape.
    pub fn actions(&self) -> Option<&[ModalAction]> {
        self.shape.actions.as_deref()
    }

    pub fn backdrop(&self) -> bool {
        self.shape.backdrop
    }

    pub fn closable(&self) -> bool {
        self.shape.closable
    }

    pub const fn close_icon(&self) -> &'static str {
        CLOSE_ICON
    }

    pub fn width(&self) -> Width {
        self.shape.width
    }

    pub fn padding(&self) -> &str {
        &self.shape.padding
    }

    pub fn fullscreen(&self) -> &Fullscreen {
        &self.shape.fullscreen
    }

    pub fn shadow(&self) -> bool {
        self.shape.shadow
    }

    /// Height, `"100%"` when the shape leaves it empty.
    pub fn height(&self) -> &str {
        if self.shape.height.is_empty() {
            "100%"
        } else {
            &self.shape.height
        }
    }

    pub fn z_index(&self) -> String {
        self.shape.z_index.to_string()
    }
}

impl fmt::Debug for ModalOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalOption")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("component", &self.view.component())
            .field("title", &self.header.title)
            .finish_non_exhaustive()
    }
}
