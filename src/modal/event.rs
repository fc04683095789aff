//! Event bridge between a modal's view and whoever opened it.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

/// Event synthesized for a handler when a view dispatches.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalEvent {
    pub name: String,
    pub detail: Value,
}

impl ModalEvent {
    pub fn new(name: impl Into<String>, detail: Value) -> Self {
        Self {
            name: name.into(),
            detail,
        }
    }
}

/// Callback registered for an event name.
///
/// Returning `true` asks the stack that owns the modal to clear every layer.
pub type Handler = Rc<dyn Fn(&ModalEvent) -> bool>;

/// Mapping from event name to handler.
#[derive(Clone, Default)]
pub struct EventHandlers {
    handlers: HashMap<String, Handler>,
}

impl EventHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event`, replacing any previous one.
    pub fn on<F>(mut self, event: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&ModalEvent) -> bool + 'static,
    {
        self.insert(event, Rc::new(handler));
        self
    }

    pub fn insert(&mut self, event: impl Into<String>, handler: Handler) {
        self.handlers.insert(event.into(), handler);
    }

    pub fn get(&self, event: &str) -> Option<Handler> {
        self.handlers.get(event).cloned()
    }

    pub fn contains(&self, event: &str) -> bool {
        self.handlers.contains_key(event)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("EventHandlers").field("events", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_on_replaces_handler() {
        let handlers = EventHandlers::new()
            .on("save", |_| false)
            .on("save", |_| true);

        assert_eq!(handlers.len(), 1);
        let handler = handlers.get("save").unwrap();
        assert!(handler(&ModalEvent::new("save", Value::Null)));
    }

    #[test]
    fn test_handler_sees_detail() {
        let handlers = EventHandlers::new().on("pick", |event| event.detail["index"] == 2);
        let handler = handlers.get("pick").unwrap();

        assert!(handler(&ModalEvent::new("pick", json!({ "index": 2 }))));
        assert!(!handler(&ModalEvent::new("pick", json!({ "index": 1 }))));
        assert!(handlers.get("missing").is_none());
    }
}
