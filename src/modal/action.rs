use serde::{Deserialize, Serialize};

/// A clickable control on a modal whose activation emits a named event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub event: String,
    #[serde(default)]
    pub disabled: bool,
}

impl ModalAction {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            icon: None,
            text: None,
            event: event.into(),
            disabled: false,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub const fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Label shown by renderers: the text, else the icon, else the event name.
    pub fn label(&self) -> &str {
        self.text
            .as_deref()
            .or(self.icon.as_deref())
            .unwrap_or(&self.event)
    }
}
