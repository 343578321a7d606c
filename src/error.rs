//! Typed errors for the wizard and the model editor
//!
//! Application plumbing (terminal, config files) uses `anyhow::Result`;
//! these enums cover the failures callers are expected to match on.

use crate::model::wizard::WizardStep;
use thiserror::Error;

/// Errors raised by the model list editor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("no model at position {index} (policy has {len} models)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors raised when moving between wizard steps
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("the policy needs a name before continuing")]
    MissingName,
    #[error("add at least one model before continuing")]
    NoModels,
    #[error("{0} is the last step")]
    NoNextStep(WizardStep),
}
