use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

use crate::config::key::{Key, KeyBinding};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalKeybindings {
    pub quit: KeyBinding,
    pub back: KeyBinding,
    pub clear: KeyBinding,
    pub open_demo: KeyBinding,
    pub popover: KeyBinding,
    pub confirm_prompt: KeyBinding,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogKeybindings {
    pub activate: KeyBinding,
    pub cancel: KeyBinding,
    pub next_action: KeyBinding,
    pub prev_action: KeyBinding,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KeybindingsConfig {
    pub global: GlobalKeybindings,
    pub dialog: DialogKeybindings,
}

impl Default for GlobalKeybindings {
    fn default() -> Self {
        Self {
            quit: KeyBinding::multiple([Key::char('q'), Key::ctrl('c')]),
            back: KeyBinding::multiple([Key::new(KeyCode::Esc), Key::new(KeyCode::Backspace)]),
            clear: Key::char('x').into(),
            open_demo: Key::char('o').into(),
            popover: Key::char('p').into(),
            confirm_prompt: Key::char('c').into(),
        }
    }
}

impl Default for DialogKeybindings {
    fn default() -> Self {
        Self {
            activate: KeyBinding::multiple([Key::new(KeyCode::Enter), Key::char('y')]),
            cancel: Key::char('n').into(),
            next_action: KeyBinding::multiple([
                Key::new(KeyCode::Tab),
                Key::new(KeyCode::Right),
                Key::char('l'),
            ]),
            prev_action: KeyBinding::multiple([
                Key::new(KeyCode::BackTab),
                Key::new(KeyCode::Left),
                Key::char('h'),
            ]),
        }
    }
}
