//! Layered modal stack: which dialogs are open, how they are layered, and
//! how they close.
//!
//! The stack owns an ordered list of [`Layer`]s, bottom first. Each open
//! request is classified by its [`OpenMode`]:
//!
//! - `Reset` discards every layer and starts a single new one.
//! - `Nav` pushes onto the top layer, so [`ModalStack::pop`] steps back to
//!   the previous modal of that layer.
//! - `Popover` opens a new independent layer on top.
//!
//! # Invariants
//!
//! - No layer in the stack is ever empty; popping the last modal of a layer
//!   removes the layer.
//! - `active_options()` has exactly one entry per layer, bottom to top.
//! - Shapes are never mutated. `Nav` and `Popover` requests without shape
//!   overrides share the previous modal's `Rc<ShapeConfig>`; `Reset` without
//!   overrides uses the stack's default shape.
//! - Observers are notified once per completed transition, never mid-way.
//!   A transition made from inside an observer is delivered after the current
//!   round, so the last snapshot every observer sees is the newest one.
//!
//! # Failure Modes
//!
//! - `pop()` on an empty stack returns `None` and notifies nobody.
//! - `clear()` on an empty stack still notifies observers.
//!
//! # Example
//!
//! ```ignore
//! let stack = ModalStack::new();
//! let _sub = stack.subscribe(|snapshot| render(snapshot.active_options()));
//!
//! stack.start_modal(ModalParams::new(ModalView::new("wizard-1")).title("Setup"));
//! stack.start_modal(ModalParams::new(ModalView::new("wizard-2")).mode(OpenMode::Nav));
//! stack.start_modal(ModalParams::new(ModalView::new("help")).mode(OpenMode::Popover));
//!
//! stack.pop(); // closes the help popover
//! stack.pop(); // back to wizard-1
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use futures::future::{self, Ready};
use tracing::{debug, trace};

use crate::modal::{
    EventHandlers, HeaderConfig, HeaderParam, Layer, ModalEvent, ModalOption, ModalView,
    OpenMode, ShapeConfig, ShapeOverrides, ViewArgs,
};

/// Request to open a modal.
#[derive(Debug, Clone)]
pub struct ModalParams {
    pub title: Option<HeaderParam>,
    pub shape: Option<ShapeOverrides>,
    pub view: ModalView,
    pub events: EventHandlers,
    pub mode: OpenMode,
}

impl ModalParams {
    /// Open `view` with a hidden header, default events and [`OpenMode::Reset`].
    pub fn new(view: ModalView) -> Self {
        Self {
            title: None,
            shape: None,
            view,
            events: EventHandlers::new(),
            mode: OpenMode::default(),
        }
    }

    pub fn title(mut self, title: impl Into<HeaderParam>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn shape(mut self, shape: ShapeOverrides) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn args(mut self, args: ViewArgs) -> Self {
        self.view = self.view.with_args(args);
        self
    }

    pub fn events(mut self, events: EventHandlers) -> Self {
        self.events = events;
        self
    }

    pub fn on<F>(mut self, event: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&ModalEvent) -> bool + 'static,
    {
        self.events = self.events.on(event, handler);
        self
    }

    pub const fn mode(mut self, mode: OpenMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Immutable picture of the stack published to observers.
#[derive(Debug, Clone)]
pub struct StackSnapshot {
    revision: u64,
    layers: Vec<Layer>,
}

impl StackSnapshot {
    /// Number of completed transitions before this snapshot.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// The visible modal of every layer, bottom to top.
    pub fn active_options(&self) -> Vec<Rc<ModalOption>> {
        active_options_of(&self.layers)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

fn active_options_of(layers: &[Layer]) -> Vec<Rc<ModalOption>> {
    layers
        .iter()
        .filter_map(|layer| layer.active_option().cloned())
        .collect()
}

type ObserverFn = Rc<dyn Fn(&StackSnapshot)>;

struct Observer {
    id: u64,
    callback: ObserverFn,
}

#[derive(Default)]
struct StackState {
    layers: Vec<Layer>,
    revision: u64,
}

pub(crate) struct Shared {
    default_shape: Rc<ShapeConfig>,
    state: RefCell<StackState>,
    observers: RefCell<Vec<Observer>>,
    next_observer_id: Cell<u64>,
    publishing: Cell<bool>,
    pending: Cell<bool>,
}

/// Handle to a modal stack.
///
/// Cloning the handle is cheap and every clone drives the same stack.
/// Single-threaded: every operation completes before it returns.
#[derive(Clone)]
pub struct ModalStack {
    shared: Rc<Shared>,
}

impl Default for ModalStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalStack {
    /// Create an empty stack using [`ShapeConfig::default`] as default shape.
    pub fn new() -> Self {
        Self::with_default_shape(ShapeConfig::default())
    }

    /// Create an empty stack with an explicit default shape.
    pub fn with_default_shape(default_shape: ShapeConfig) -> Self {
        Self {
            shared: Rc::new(Shared {
                default_shape: Rc::new(default_shape),
                state: RefCell::new(StackState::default()),
                observers: RefCell::new(Vec::new()),
                next_observer_id: Cell::new(1),
                publishing: Cell::new(false),
                pending: Cell::new(false),
            }),
        }
    }

    pub(crate) fn upgrade(shared: &Weak<Shared>) -> Option<Self> {
        shared.upgrade().map(|shared| Self { shared })
    }

    /// Non-owning handle, for handlers and observers that navigate the stack
    /// they belong to.
    pub fn downgrade(&self) -> WeakModalStack {
        WeakModalStack {
            shared: Rc::downgrade(&self.shared),
        }
    }

    fn owns(&self, option: &ModalOption) -> bool {
        option.is_owned_by(&self.shared)
    }

    pub fn default_shape(&self) -> Rc<ShapeConfig> {
        self.shared.default_shape.clone()
    }

    // --- Observation ---

    /// Register `observer`, calling it right away with the current state and
    /// then after every transition. Dropping the subscription unregisters it.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&StackSnapshot) + 'static,
    {
        let id = self.shared.next_observer_id.get();
        self.shared.next_observer_id.set(id + 1);

        let callback: ObserverFn = Rc::new(observer);
        self.shared.observers.borrow_mut().push(Observer {
            id,
            callback: callback.clone(),
        });
        callback(&self.snapshot());

        Subscription {
            owner: Rc::downgrade(&self.shared),
            id,
        }
    }

    pub fn snapshot(&self) -> StackSnapshot {
        let state = self.shared.state.borrow();
        StackSnapshot {
            revision: state.revision,
            layers: state.layers.clone(),
        }
    }

    /// Notify observers of the current state.
    ///
    /// A transition made by an observer while a publish is running is only
    /// queued; the outermost publish repeats with a fresh snapshot until no
    /// transition is pending, so every observer ends on the latest revision.
    fn publish(&self) {
        let shared = &self.shared;
        if shared.publishing.replace(true) {
            shared.pending.set(true);
            return;
        }

        loop {
            shared.pending.set(false);
            let snapshot = self.snapshot();
            // observers may reenter the stack, so call them with nothing borrowed
            let callbacks: Vec<ObserverFn> = shared
                .observers
                .borrow()
                .iter()
                .map(|observer| observer.callback.clone())
                .collect();

            trace!(
                revision = snapshot.revision(),
                observers = callbacks.len(),
                "publishing stack state"
            );
            for callback in callbacks {
                callback(&snapshot);
            }
            if !shared.pending.get() {
                break;
            }
        }
        shared.publishing.set(false);
    }

    fn update<R>(&self, transition: impl FnOnce(&mut Vec<Layer>) -> R) -> R {
        let result = {
            let mut state = self.shared.state.borrow_mut();
            let result = transition(&mut state.layers);
            state.revision += 1;
            result
        };
        self.publish();
        result
    }

    // --- Queries ---

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.shared.state.borrow().layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.state.borrow().layers.is_empty()
    }

    pub fn layers(&self) -> Vec<Layer> {
        self.shared.state.borrow().layers.clone()
    }

    /// The visible modal of every layer, recomputed on each call.
    pub fn active_options(&self) -> Vec<Rc<ModalOption>> {
        active_options_of(&self.shared.state.borrow().layers)
    }

    /// The modal that currently receives input, if any.
    pub fn top(&self) -> Option<Rc<ModalOption>> {
        self.shared
            .state
            .borrow()
            .layers
            .last()
            .and_then(|layer| layer.active_option().cloned())
    }

    // --- Opening ---

    /// Build a modal for `params` without applying any transition.
    ///
    /// The shape is resolved against the modal that is active right now, so
    /// the result can be handed to [`reset`](Self::reset),
    /// [`push`](Self::push) or [`popover`](Self::popover).
    pub fn create_option(&self, params: ModalParams) -> Rc<ModalOption> {
        let ModalParams {
            title,
            shape,
            view,
            events,
            mode,
        } = params;

        let header = HeaderConfig::resolve(title.as_ref());
        let previous = self.top();
        let shape = self.resolve_shape(shape.as_ref(), mode, previous.as_ref());

        ModalOption::build(
            header,
            shape,
            view,
            events,
            mode,
            Rc::downgrade(&self.shared),
        )
    }

    fn resolve_shape(
        &self,
        overrides: Option<&ShapeOverrides>,
        mode: OpenMode,
        previous: Option<&Rc<ModalOption>>,
    ) -> Rc<ShapeConfig> {
        if let Some(overrides) = overrides {
            return Rc::new(self.shared.default_shape.merged(overrides));
        }
        match previous {
            Some(previous) if mode.inherits_shape() => previous.shape().clone(),
            _ => self.shared.default_shape.clone(),
        }
    }

    /// Open a modal and return it so the caller can keep a handle on it.
    pub fn start_modal(&self, params: ModalParams) -> Rc<ModalOption> {
        let option = self.create_option(params);
        debug!(
            modal = %option.id(),
            mode = %option.mode(),
            component = option.view().component(),
            "starting modal"
        );

        match option.mode() {
            OpenMode::Reset => self.reset(option.clone()),
            OpenMode::Nav => self.push(option.clone()),
            OpenMode::Popover => self.popover(option.clone()),
        }
        option
    }

    /// Push `option` onto the top layer, creating the first layer if needed.
    ///
    /// `option` must come from this stack's [`create_option`](Self::create_option);
    /// a modal built by another stack would clear that other stack when its
    /// handler asks to close. The same holds for [`reset`](Self::reset) and
    /// [`popover`](Self::popover).
    pub fn push(&self, option: Rc<ModalOption>) {
        debug_assert!(self.owns(&option), "modal {} belongs to another stack", option.id());
        let layers = self.update(|layers| {
            match layers.last_mut() {
                Some(layer) => layer.push(option),
                None => layers.push(Layer::new(option)),
            }
            layers.len()
        });
        debug!(layers, "pushed modal onto top layer");
    }

    /// Replace every layer with a single layer holding `option`.
    pub fn reset(&self, option: Rc<ModalOption>) {
        debug_assert!(self.owns(&option), "modal {} belongs to another stack", option.id());
        self.update(|layers| {
            layers.clear();
            layers.push(Layer::new(option));
        });
        debug!("reset stack to a single layer");
    }

    /// Open `option` in a new layer on top of the existing ones.
    pub fn popover(&self, option: Rc<ModalOption>) {
        debug_assert!(self.owns(&option), "modal {} belongs to another stack", option.id());
        let layers = self.update(|layers| {
            layers.push(Layer::new(option));
            layers.len()
        });
        debug!(layers, "opened popover layer");
    }

    // --- Closing ---

    /// Close the visible modal of the top layer.
    ///
    /// Drops the layer once it has no modal left. Returns `None` and leaves
    /// observers alone when nothing is open.
    pub fn pop(&self) -> Option<Rc<ModalOption>> {
        if self.is_empty() {
            trace!("pop on empty stack ignored");
            return None;
        }

        let popped = self.update(|layers| {
            let layer = layers.last_mut()?;
            let popped = layer.pop();
            if layer.is_empty() {
                layers.pop();
            }
            popped
        });
        debug!(
            modal = ?popped.as_ref().map(|option| option.id()),
            layers = self.len(),
            "popped modal"
        );
        popped
    }

    /// Navigate back; identical to [`pop`](Self::pop).
    pub fn move_back(&self) -> Option<Rc<ModalOption>> {
        self.pop()
    }

    /// Close every layer.
    ///
    /// The stack is already empty when this returns; the future resolves
    /// immediately and only lets async callers sequence follow-up work.
    pub fn clear(&self) -> Ready<()> {
        self.clear_layers();
        future::ready(())
    }

    pub(crate) fn clear_layers(&self) {
        let closed = self.update(|layers| {
            let closed = layers.len();
            layers.clear();
            closed
        });
        debug!(closed, "cleared modal stack");
    }
}

impl fmt::Debug for ModalStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.borrow();
        f.debug_struct("ModalStack")
            .field("layers", &state.layers)
            .field("revision", &state.revision)
            .finish_non_exhaustive()
    }
}

/// Weak counterpart of [`ModalStack`]; does not keep the stack alive.
#[derive(Clone, Default)]
pub struct WeakModalStack {
    shared: Weak<Shared>,
}

impl WeakModalStack {
    pub fn upgrade(&self) -> Option<ModalStack> {
        ModalStack::upgrade(&self.shared)
    }
}

impl fmt::Debug for WeakModalStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakModalStack")
            .field("alive", &(self.shared.strong_count() > 0))
            .finish()
    }
}

/// Keeps an observer registered until dropped.
pub struct Subscription {
    owner: Weak<Shared>,
    id: u64,
}

impl Subscription {
    /// Whether the stack this subscription observes still exists.
    pub fn is_active(&self) -> bool {
        self.owner.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.owner.upgrade() {
            shared
                .observers
                .borrow_mut()
                .retain(|observer| observer.id != self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
