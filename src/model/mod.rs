//! Model layer - policy data and the state behind the wizard
//!
//! - `Policy`, `Model`, `Field` - the data being built
//! - `PolicyWizard` - owns the policy and the current step
//! - `ModelListEditor` - draft handling for the models step
//! - `ModalStack` - modal overlay management

pub mod editor;
pub mod modal;
pub mod policy;
pub mod reference;
pub mod wizard;

// Re-export commonly used types
pub use editor::ModelListEditor;
pub use policy::{Field, Model, Policy};
pub use reference::{ReferenceData, ReferenceDataSource};
pub use wizard::{PolicySource, PolicyWizard, WizardStep};
