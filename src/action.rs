//! Action enum - All possible application actions
//!
//! Components emit Actions in response to key events, and the App processes
//! them against the wizard and the policy it owns.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation, discarding the policy
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Wizard Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Advance to the next wizard step
    NextStep,
    /// Go back to the previous wizard step
    PrevStep,
    /// Accept the reviewed policy and exit
    FinishPolicy,

    // ─────────────────────────────────────────────────────────────────────────
    // Models
    // ─────────────────────────────────────────────────────────────────────────
    /// Append the draft model to the policy
    AddModel,
    /// Ask for confirmation before removing the model at this position
    RequestRemoveModel(usize),

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Close the current modal
    CloseModal,
    /// Confirm the current modal action
    ConfirmModal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextStep => write!(f, "NextStep"),
            Action::PrevStep => write!(f, "PrevStep"),
            Action::FinishPolicy => write!(f, "FinishPolicy"),
            Action::AddModel => write!(f, "AddModel"),
            Action::RequestRemoveModel(index) => write!(f, "RequestRemoveModel({})", index),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
        }
    }
}
