//! Modal chrome: size, padding, backdrop and closing behaviour.
//!
//! A [`ShapeConfig`] is never mutated once built. Callers describe the
//! fields they care about with a [`ShapeOverrides`]; every field left as
//! `None` falls back to the base shape it is merged onto.

use serde::{Deserialize, Serialize};

use crate::modal::ModalAction;

/// Horizontal size class of a modal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Width {
    #[default]
    Sm,
    Md,
    Lg,
    Fluid,
}

impl Width {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Fluid => "fluid",
        }
    }
}

/// Fullscreen mode: either a plain flag or fullscreen with a margin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fullscreen {
    Flag(bool),
    Inset { margin: String },
}

impl Default for Fullscreen {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl Fullscreen {
    pub const fn is_enabled(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Inset { .. } => true,
        }
    }

    pub fn margin(&self) -> Option<&str> {
        match self {
            Self::Flag(_) => None,
            Self::Inset { margin } => Some(margin),
        }
    }
}

/// Fully resolved chrome of a modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShapeConfig {
    pub fullscreen: Fullscreen,
    pub width: Width,
    pub height: String,
    pub padding: String,
    pub backdrop: bool,
    pub actions: Option<Vec<ModalAction>>,
    pub closable: bool,
    pub shadow: bool,
    pub z_index: i32,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            fullscreen: Fullscreen::default(),
            width: Width::Sm,
            height: "auto".to_string(),
            padding: "8px".to_string(),
            backdrop: true,
            actions: None,
            closable: true,
            shadow: false,
            z_index: 500,
        }
    }
}

impl ShapeConfig {
    /// Build a new shape from `overrides` laid over `self`.
    #[must_use]
    pub fn merged(&self, overrides: &ShapeOverrides) -> Self {
        Self {
            fullscreen: overrides
                .fullscreen
                .clone()
                .unwrap_or_else(|| self.fullscreen.clone()),
            width: overrides.width.unwrap_or(self.width),
            height: overrides
                .height
                .clone()
                .unwrap_or_else(|| self.height.clone()),
            padding: overrides
                .padding
                .clone()
                .unwrap_or_else(|| self.padding.clone()),
            backdrop: overrides.backdrop.unwrap_or(self.backdrop),
            actions: overrides
                .actions
                .clone()
                .or_else(|| self.actions.clone()),
            closable: overrides.closable.unwrap_or(self.closable),
            shadow: overrides.shadow.unwrap_or(self.shadow),
            z_index: overrides.z_index.unwrap_or(self.z_index),
        }
    }
}

impl From<&ShapeOverrides> for ShapeConfig {
    fn from(overrides: &ShapeOverrides) -> Self {
        Self::default().merged(overrides)
    }
}

/// Partial shape description; `None` fields keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ShapeOverrides {
    pub fullscreen: Option<Fullscreen>,
    pub width: Option<Width>,
    pub height: Option<String>,
    pub padding: Option<String>,
    pub backdrop: Option<bool>,
    pub actions: Option<Vec<ModalAction>>,
    pub closable: Option<bool>,
    pub shadow: Option<bool>,
    pub z_index: Option<i32>,
}

impl ShapeOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn width(mut self, width: Width) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: impl Into<String>) -> Self {
        self.height = Some(height.into());
        self
    }

    pub fn padding(mut self, padding: impl Into<String>) -> Self {
        self.padding = Some(padding.into());
        self
    }

    pub fn fullscreen(mut self, fullscreen: Fullscreen) -> Self {
        self.fullscreen = Some(fullscreen);
        self
    }

    pub const fn backdrop(mut self, backdrop: bool) -> Self {
        self.backdrop = Some(backdrop);
        self
    }

    pub fn actions(mut self, actions: Vec<ModalAction>) -> Self {
        self.actions = Some(actions);
        self
    }

    pub const fn closable(mut self, closable: bool) -> Self {
        self.closable = Some(closable);
        self
    }

    pub const fn shadow(mut self, shadow: bool) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub const fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let shape = ShapeConfig::default();
        assert_eq!(shape.width, Width::Sm);
        assert_eq!(shape.padding, "8px");
        assert_eq!(shape.height, "auto");
        assert!(shape.backdrop);
        assert!(shape.closable);
        assert!(!shape.shadow);
        assert!(!shape.fullscreen.is_enabled());
        assert!(shape.actions.is_none());
        assert_eq!(shape.z_index, 500);
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let base = ShapeConfig::default();
        let merged = base.merged(&ShapeOverrides::new().width(Width::Lg).closable(false));

        assert_eq!(merged.width, Width::Lg);
        assert!(!merged.closable);
        assert_eq!(merged.padding, base.padding);
        assert_eq!(merged.z_index, base.z_index);
        // the base is untouched
        assert_eq!(base.width, Width::Sm);
    }

    #[test]
    fn test_merge_onto_custom_base() {
        let base = ShapeConfig::default().merged(&ShapeOverrides::new().padding("2px"));
        let merged = base.merged(&ShapeOverrides::new().shadow(true));
        assert_eq!(merged.padding, "2px");
        assert!(merged.shadow);
    }

    #[test]
    fn test_fullscreen_from_toml() {
        let flag: ShapeOverrides = toml::from_str("fullscreen = true").unwrap();
        assert_eq!(flag.fullscreen, Some(Fullscreen::Flag(true)));

        let inset: ShapeOverrides = toml::from_str("fullscreen = { margin = \"2\" }").unwrap();
        let inset = inset.fullscreen.unwrap();
        assert!(inset.is_enabled());
        assert_eq!(inset.margin(), Some("2"));
    }

    #[test]
    fn test_width_from_toml() {
        let overrides: ShapeOverrides = toml::from_str("width = \"fluid\"\nz_index = 900").unwrap();
        assert_eq!(overrides.width, Some(Width::Fluid));
        assert_eq!(overrides.z_index, Some(900));
    }
}
