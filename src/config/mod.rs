//! Application configuration read from `config.toml`.

pub mod actions;
pub mod key;
pub mod keybindings;
pub mod loader;
pub mod resolver;

pub use actions::{DialogAction, GlobalAction};
pub use keybindings::KeybindingsConfig;
pub use loader::load;
pub use resolver::KeyResolver;
use serde::{Deserialize, Serialize};

use crate::modal::{ShapeConfig, ShapeOverrides};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Catppuccin Mocha".to_string(),
        }
    }
}

/// Stack-wide presentation defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalConfig {
    /// Applied on top of the built-in shape; every modal starts from the result.
    #[serde(default)]
    pub default_shape: ShapeOverrides,
}

impl ModalConfig {
    pub fn default_shape(&self) -> ShapeConfig {
        ShapeConfig::default().merged(&self.default_shape)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub modal: ModalConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::key::{Key, KeyBinding};
    use crate::modal::Width;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = loader::parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.theme.name, "Catppuccin Mocha");
        assert_eq!(config.modal.default_shape(), ShapeConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = loader::parse(
            r#"
            [theme]
            name = "Catppuccin Latte"

            [modal.default_shape]
            width = "lg"
            backdrop = false
            z_index = 900

            [keybindings.global]
            clear = "ctrl+x"
            "#,
        )
        .unwrap();

        assert_eq!(config.theme.name, "Catppuccin Latte");
        let shape = config.modal.default_shape();
        assert_eq!(shape.width, Width::Lg);
        assert!(!shape.backdrop);
        assert_eq!(shape.z_index, 900);
        assert_eq!(shape.padding, "8px");
        assert_eq!(config.keybindings.global.clear, KeyBinding::Single(Key::ctrl('x')));
        // untouched bindings keep their defaults
        assert_eq!(config.keybindings.global.quit.display(), "q/ctrl+c");
    }

    #[test]
    fn test_invalid_key_is_an_error() {
        assert!(loader::parse("[keybindings.global]\nquit = \"hyper+q\"").is_err());
    }
}
