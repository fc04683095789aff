//! Layered modal navigation stack.
//!
//! [`modal::ModalStack`] keeps track of open dialogs as layers: `Reset`
//! replaces everything, `Nav` steps deeper inside the top layer, and
//! `Popover` opens an independent layer above. Observers receive an
//! immutable [`modal::StackSnapshot`] after each change.
//!
//! The remaining modules make up the `modalstack` binary: a ratatui
//! renderer, an interactive demo and a script replayer.

pub mod app;
pub mod cli;
pub mod config;
pub mod modal;
pub mod replay;
pub mod theme;
pub mod tui;
pub mod ui;

pub use theme::Theme;
