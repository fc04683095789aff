//! Colour themes for the terminal renderer, built from the Catppuccin palette.

use std::fmt;

use catppuccin::PALETTE;
use ratatui::style::Color;
use ratatui::widgets::BorderType;

const fn catppuccin_to_color(c: &catppuccin::Color) -> Color {
    Color::Rgb(c.rgb.r, c.rgb.g, c.rgb.b)
}

/// Colours the renderer draws modal chrome with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub base: Color,
    pub mantle: Color,
    pub crust: Color,
    pub surface0: Color,
    pub surface1: Color,
    pub overlay0: Color,
    pub text: Color,
    pub subtext0: Color,
    pub blue: Color,
    pub mauve: Color,
    pub yellow: Color,
    pub green: Color,
    pub red: Color,
    pub border_type: BorderType,
}

impl Theme {
    const fn from_catppuccin(flavor: &catppuccin::Flavor) -> Self {
        let c = &flavor.colors;
        Self {
            base: catppuccin_to_color(&c.base),
            mantle: catppuccin_to_color(&c.mantle),
            crust: catppuccin_to_color(&c.crust),
            surface0: catppuccin_to_color(&c.surface0),
            surface1: catppuccin_to_color(&c.surface1),
            overlay0: catppuccin_to_color(&c.overlay0),
            text: catppuccin_to_color(&c.text),
            subtext0: catppuccin_to_color(&c.subtext0),
            blue: catppuccin_to_color(&c.blue),
            mauve: catppuccin_to_color(&c.mauve),
            yellow: catppuccin_to_color(&c.yellow),
            green: catppuccin_to_color(&c.green),
            red: catppuccin_to_color(&c.red),
            border_type: BorderType::Rounded,
        }
    }

    #[must_use]
    pub fn catppuccin_mocha() -> Self {
        Self::from_catppuccin(&PALETTE.mocha)
    }

    #[must_use]
    pub fn catppuccin_macchiato() -> Self {
        Self::from_catppuccin(&PALETTE.macchiato)
    }

    #[must_use]
    pub fn catppuccin_frappe() -> Self {
        Self::from_catppuccin(&PALETTE.frappe)
    }

    #[must_use]
    pub fn catppuccin_latte() -> Self {
        Self::from_catppuccin(&PALETTE.latte)
    }

    /// Background of a modal body.
    #[must_use]
    pub const fn surface(&self) -> Color {
        self.base
    }

    /// Colour of the dimmed area behind a modal with a backdrop.
    #[must_use]
    pub const fn backdrop(&self) -> Color {
        self.crust
    }

    #[must_use]
    pub const fn border(&self) -> Color {
        self.surface1
    }

    /// Border of the modal that currently receives input.
    #[must_use]
    pub const fn border_focused(&self) -> Color {
        self.blue
    }

    #[must_use]
    pub const fn header(&self) -> Color {
        self.yellow
    }

    #[must_use]
    pub const fn muted(&self) -> Color {
        self.overlay0
    }

    #[must_use]
    pub const fn action(&self) -> Color {
        self.mauve
    }

    #[must_use]
    pub const fn action_selected_bg(&self) -> Color {
        self.surface1
    }

    #[must_use]
    pub const fn disabled(&self) -> Color {
        self.surface0
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::catppuccin_mocha()
    }
}

/// A built-in theme and its display name.
#[derive(Debug, Clone)]
pub struct ThemeInfo {
    pub name: &'static str,
    pub theme: Theme,
}

impl fmt::Display for ThemeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

pub fn available_themes() -> Vec<ThemeInfo> {
    vec![
        ThemeInfo {
            name: "Catppuccin Mocha",
            theme: Theme::catppuccin_mocha(),
        },
        ThemeInfo {
            name: "Catppuccin Macchiato",
            theme: Theme::catppuccin_macchiato(),
        },
        ThemeInfo {
            name: "Catppuccin Frappé",
            theme: Theme::catppuccin_frappe(),
        },
        ThemeInfo {
            name: "Catppuccin Latte",
            theme: Theme::catppuccin_latte(),
        },
    ]
}

/// Look up a theme by name, case-insensitively. Unknown names yield `None`.
pub fn find_theme(name: &str) -> Option<Theme> {
    available_themes()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .map(|t| t.theme)
}

/// Like [`find_theme`] but falls back to the default theme.
pub fn theme_from_name(name: &str) -> Theme {
    find_theme(name).unwrap_or_else(|| {
        tracing::warn!(name, "unknown theme, using default");
        Theme::default()
    })
}
