/// Actions available regardless of what is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    Quit,
    Back,
    Clear,
    OpenDemo,
    Popover,
    ConfirmPrompt,
}

/// Actions aimed at the top-most dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Activate,
    Cancel,
    NextAction,
    PrevAction,
}
