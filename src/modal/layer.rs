use std::rc::Rc;

use crate::modal::ModalOption;

/// One back-navigable lineage of modals sharing a presentation slot.
///
/// A layer starts with one modal. The stack discards a layer as soon as its
/// last modal is popped; an emptied layer is never pushed to again.
#[derive(Debug, Clone)]
pub struct Layer {
    options: Vec<Rc<ModalOption>>,
    active_index: usize,
}

impl Layer {
    pub fn new(option: Rc<ModalOption>) -> Self {
        Self {
            options: vec![option],
            active_index: 0,
        }
    }

    /// Append `option` and make it the visible one.
    pub fn push(&mut self, option: Rc<ModalOption>) {
        self.options.push(option);
        self.active_index = self.options.len() - 1;
    }

    /// Remove the last modal, stepping the active index back first.
    ///
    /// Popping the only modal leaves the index at 0 over an empty layer;
    /// the stack drops a layer as soon as it is empty, so that state is never
    /// observed through it.
    pub fn pop(&mut self) -> Option<Rc<ModalOption>> {
        if self.options.is_empty() {
            return None;
        }
        self.active_index = self.active_index.saturating_sub(1);
        self.options.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn active_option(&self) -> Option<&Rc<ModalOption>> {
        self.options.get(self.active_index)
    }

    pub const fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn options(&self) -> &[Rc<ModalOption>] {
        &self.options
    }

    /// Whether "back" inside this layer would reveal an earlier modal.
    pub fn has_history(&self) -> bool {
        self.options.len() > 1
    }
}
