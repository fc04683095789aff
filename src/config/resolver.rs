use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::actions::{DialogAction, GlobalAction};
use crate::config::keybindings::KeybindingsConfig;

/// Maps key events to configured actions.
pub struct KeyResolver {
    keybindings: Rc<KeybindingsConfig>,
}

impl KeyResolver {
    pub const fn new(keybindings: Rc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    pub fn matches_global(&self, event: &KeyEvent, action: GlobalAction) -> bool {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => kb.quit.matches(event),
            GlobalAction::Back => kb.back.matches(event),
            GlobalAction::Clear => kb.clear.matches(event),
            GlobalAction::OpenDemo => kb.open_demo.matches(event),
            GlobalAction::Popover => kb.popover.matches(event),
            GlobalAction::ConfirmPrompt => kb.confirm_prompt.matches(event),
        }
    }

    pub fn display_global(&self, action: GlobalAction) -> String {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => kb.quit.display(),
            GlobalAction::Back => kb.back.display(),
            GlobalAction::Clear => kb.clear.display(),
            GlobalAction::OpenDemo => kb.open_demo.display(),
            GlobalAction::Popover => kb.popover.display(),
            GlobalAction::ConfirmPrompt => kb.confirm_prompt.display(),
        }
    }

    pub fn matches_dialog(&self, event: &KeyEvent, action: DialogAction) -> bool {
        let kb = &self.keybindings.dialog;
        match action {
            DialogAction::Activate => kb.activate.matches(event),
            DialogAction::Cancel => kb.cancel.matches(event),
            DialogAction::NextAction => kb.next_action.matches(event),
            DialogAction::PrevAction => kb.prev_action.matches(event),
        }
    }

    pub fn display_dialog(&self, action: DialogAction) -> String {
        let kb = &self.keybindings.dialog;
        match action {
            DialogAction::Activate => kb.activate.display(),
            DialogAction::Cancel => kb.cancel.display(),
            DialogAction::NextAction => kb.next_action.display(),
            DialogAction::PrevAction => kb.prev_action.display(),
        }
    }

    pub fn resolve_global(&self, event: &KeyEvent) -> Option<GlobalAction> {
        [
            GlobalAction::Quit,
            GlobalAction::Back,
            GlobalAction::Clear,
            GlobalAction::OpenDemo,
            GlobalAction::Popover,
            GlobalAction::ConfirmPrompt,
        ]
        .into_iter()
        .find(|action| self.matches_global(event, *action))
    }

    pub fn resolve_dialog(&self, event: &KeyEvent) -> Option<DialogAction> {
        [
            DialogAction::Activate,
            DialogAction::Cancel,
            DialogAction::NextAction,
            DialogAction::PrevAction,
        ]
        .into_iter()
        .find(|action| self.matches_dialog(event, *action))
    }

    /// Zero-based action index for the digit keys `1`..=`9`.
    pub fn action_slot(event: &KeyEvent) -> Option<usize> {
        if event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        match event.code {
            KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| d as usize - 1),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> KeyResolver {
        KeyResolver::new(Rc::new(KeybindingsConfig::default()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_global_bindings() {
        let resolver = resolver();
        assert_eq!(resolver.resolve_global(&key(KeyCode::Esc)), Some(GlobalAction::Back));
        assert_eq!(
            resolver.resolve_global(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GlobalAction::Quit)
        );
        assert_eq!(
            resolver.resolve_global(&key(KeyCode::Char('c'))),
            Some(GlobalAction::ConfirmPrompt)
        );
        assert_eq!(resolver.resolve_global(&key(KeyCode::Char('z'))), None);
        assert_eq!(resolver.display_global(GlobalAction::Back), "Esc/Backspace");
    }

    #[test]
    fn test_default_dialog_bindings() {
        let resolver = resolver();
        assert_eq!(resolver.resolve_dialog(&key(KeyCode::Enter)), Some(DialogAction::Activate));
        assert_eq!(resolver.resolve_dialog(&key(KeyCode::Tab)), Some(DialogAction::NextAction));
        assert_eq!(resolver.resolve_dialog(&key(KeyCode::Left)), Some(DialogAction::PrevAction));
        assert_eq!(resolver.display_dialog(DialogAction::Cancel), "n");
    }

    #[test]
    fn test_action_slots() {
        assert_eq!(KeyResolver::action_slot(&key(KeyCode::Char('1'))), Some(0));
        assert_eq!(KeyResolver::action_slot(&key(KeyCode::Char('9'))), Some(8));
        assert_eq!(KeyResolver::action_slot(&key(KeyCode::Char('0'))), None);
        assert_eq!(
            KeyResolver::action_slot(&KeyEvent::new(KeyCode::Char('2'), KeyModifiers::ALT)),
            None
        );
    }
}
