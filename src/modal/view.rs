//! Opaque view payload carried by a modal.
//!
//! The stack never looks inside a view. Renderers pick a widget from
//! [`ModalView::component`] and read whatever they need from [`ViewArgs`].

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use serde_json::Value;

use crate::modal::ModalOption;

/// Argument key under which every modal exposes its [`Dispatcher`].
pub const DISPATCH_ARG: &str = "dispatch";

/// Component descriptor plus the arguments handed to it.
#[derive(Debug, Clone)]
pub struct ModalView {
    component: String,
    args: ViewArgs,
}

impl ModalView {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            args: ViewArgs::new(),
        }
    }

    pub fn with_args(mut self, args: ViewArgs) -> Self {
        self.args = args;
        self
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub const fn args(&self) -> &ViewArgs {
        &self.args
    }

    pub(crate) fn bind_dispatcher(&mut self, dispatcher: Dispatcher) {
        self.args.insert(DISPATCH_ARG, dispatcher);
    }
}

/// Heterogeneous argument bag, values looked up by key and type.
#[derive(Clone, Default)]
pub struct ViewArgs {
    values: BTreeMap<String, Rc<dyn Any>>,
}

impl ViewArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` under `key`.
    pub fn with<T: Any>(mut self, key: impl Into<String>, value: T) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert<T: Any>(&mut self, key: impl Into<String>, value: T) {
        self.values.insert(key.into(), Rc::new(value));
    }

    /// Value under `key` if present and of type `T`.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.values.get(key)?.downcast_ref::<T>()
    }

    /// Shorthand for JSON properties.
    pub fn json(&self, key: &str) -> Option<&Value> {
        self.get::<Value>(key)
    }

    pub fn dispatcher(&self) -> Option<&Dispatcher> {
        self.get::<Dispatcher>(DISPATCH_ARG)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl fmt::Debug for ViewArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}

/// Handle a view uses to report interactions back to its opener.
///
/// Holds the modal weakly: a dispatcher outliving its modal does nothing.
#[derive(Clone)]
pub struct Dispatcher {
    option: Weak<ModalOption>,
}

impl Dispatcher {
    pub(crate) const fn new(option: Weak<ModalOption>) -> Self {
        Self { option }
    }

    /// Forward to [`ModalOption::dispatch`]. Always reports the event as handled.
    pub fn dispatch(&self, event: &str, detail: Value) -> bool {
        match self.option.upgrade() {
            Some(option) => option.dispatch(event, detail),
            None => {
                tracing::debug!(event, "dispatch on a dropped modal ignored");
                true
            }
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("attached", &(self.option.strong_count() > 0))
            .finish()
    }
}
