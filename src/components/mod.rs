//! UI Components
//!
//! One component per wizard step plus the modal dialogs. Components own
//! presentation state; the policy is changed through Actions.

pub mod description;
pub mod help_dialog;
pub mod layout;
pub mod models;
pub mod quit_dialog;
pub mod remove_dialog;
pub mod review;

pub use description::DescriptionComponent;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_wizard_layout, centered_popup, split_sections, truncate_to_width};
pub use models::ModelsComponent;
pub use quit_dialog::QuitDialog;
pub use remove_dialog::RemoveDialog;
pub use review::ReviewComponent;
