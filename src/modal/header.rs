use serde::{Deserialize, Serialize};

use crate::modal::ModalAction;

/// Title bar of a modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderConfig {
    pub title: String,
    #[serde(default)]
    pub actions: Vec<ModalAction>,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

const fn visible_by_default() -> bool {
    true
}

impl HeaderConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            actions: Vec::new(),
            visible: true,
        }
    }

    /// A header that renderers skip entirely.
    pub const fn hidden() -> Self {
        Self {
            title: String::new(),
            actions: Vec::new(),
            visible: false,
        }
    }

    pub fn with_actions(mut self, actions: Vec<ModalAction>) -> Self {
        self.actions = actions;
        self
    }

    /// Resolve the header argument of an open request.
    ///
    /// A missing argument or an empty title gives a hidden header. An explicit
    /// config contributes its title and actions and is always visible.
    pub fn resolve(param: Option<&HeaderParam>) -> Self {
        match param {
            None => Self::hidden(),
            Some(HeaderParam::Title(title)) if title.is_empty() => Self::hidden(),
            Some(HeaderParam::Title(title)) => Self::new(title.clone()),
            Some(HeaderParam::Config(config)) => {
                Self::new(config.title.clone()).with_actions(config.actions.clone())
            }
        }
    }
}

/// Header argument accepted when opening a modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderParam {
    Title(String),
    Config(HeaderConfig),
}

impl From<&str> for HeaderParam {
    fn from(title: &str) -> Self {
        Self::Title(title.to_string())
    }
}

impl From<String> for HeaderParam {
    fn from(title: String) -> Self {
        Self::Title(title)
    }
}

impl From<HeaderConfig> for HeaderParam {
    fn from(config: HeaderConfig) -> Self {
        Self::Config(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_missing_is_hidden() {
        let header = HeaderConfig::resolve(None);
        assert!(!header.visible);
        assert!(header.title.is_empty());
    }

    #[test]
    fn test_resolve_title() {
        let header = HeaderConfig::resolve(Some(&"Settings".into()));
        assert!(header.visible);
        assert_eq!(header.title, "Settings");
        assert!(header.actions.is_empty());

        assert!(!HeaderConfig::resolve(Some(&"".into())).visible);
    }

    #[test]
    fn test_resolve_config_forces_visible() {
        let mut config = HeaderConfig::new("Edit").with_actions(vec![ModalAction::new("help")]);
        config.visible = false;

        let header = HeaderConfig::resolve(Some(&config.into()));
        assert!(header.visible);
        assert_eq!(header.title, "Edit");
        assert_eq!(header.actions, vec![ModalAction::new("help")]);
    }

    #[test]
    fn test_param_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            title: HeaderParam,
        }

        let plain: Wrapper = toml::from_str(r#"title = "Hello""#).unwrap();
        assert_eq!(plain.title, HeaderParam::Title("Hello".into()));

        let config: Wrapper = toml::from_str(
            r#"title = { title = "Hello", actions = [{ event = "close" }] }"#,
        )
        .unwrap();
        let HeaderParam::Config(config) = config.title else {
            panic!("expected a header config");
        };
        assert_eq!(config.actions.len(), 1);
        assert!(config.visible);
    }
}
