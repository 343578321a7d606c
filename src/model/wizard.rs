//! Policy wizard - owns the policy and the current step
//!
//! Other parts of the app reach the policy only through the narrow
//! `PolicySource` interface: read it, mutate it, or advance the wizard.

use super::policy::Policy;
use crate::error::WizardError;
use std::fmt;
use tracing::{debug, info};

/// Wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Description,
    Models,
    Review,
}

impl WizardStep {
    pub const COUNT: usize = 3;

    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Description => Some(WizardStep::Models),
            WizardStep::Models => Some(WizardStep::Review),
            WizardStep::Review => None,
        }
    }

    pub fn prev(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Description => None,
            WizardStep::Models => Some(WizardStep::Description),
            WizardStep::Review => Some(WizardStep::Models),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            WizardStep::Description => "Description",
            WizardStep::Models => "Models",
            WizardStep::Review => "Review",
        }
    }

    pub fn step_number(&self) -> usize {
        match self {
            WizardStep::Description => 1,
            WizardStep::Models => 2,
            WizardStep::Review => 3,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Supplies the policy under edit and advances the wizard
pub trait PolicySource {
    fn current_policy(&self) -> &Policy;

    fn current_policy_mut(&mut self) -> &mut Policy;

    /// Advance to the next step, failing if the current step is incomplete
    fn next_step(&mut self) -> Result<(), WizardError>;
}

/// Owner of the policy being built
#[derive(Debug, Clone)]
pub struct PolicyWizard {
    policy: Policy,
    step: WizardStep,
}

impl Default for PolicyWizard {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}

impl PolicyWizard {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            step: WizardStep::Description,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Move back one step; stays put on the first step
    pub fn previous_step(&mut self) {
        if let Some(prev) = self.step.prev() {
            debug!(from = %self.step, to = %prev, "wizard step back");
            self.step = prev;
        }
    }

    /// Hand the finished policy over to the caller
    pub fn into_policy(self) -> Policy {
        self.policy
    }

    fn check_step_complete(&self) -> Result<(), WizardError> {
        match self.step {
            WizardStep::Description if self.policy.name.trim().is_empty() => {
                Err(WizardError::MissingName)
            }
            WizardStep::Models if self.policy.models.is_empty() => Err(WizardError::NoModels),
            _ => Ok(()),
        }
    }
}

impl PolicySource for PolicyWizard {
    fn current_policy(&self) -> &Policy {
        &self.policy
    }

    fn current_policy_mut(&mut self) -> &mut Policy {
        &mut self.policy
    }

    fn next_step(&mut self) -> Result<(), WizardError> {
        let next = self.step.next().ok_or(WizardError::NoNextStep(self.step))?;
        self.check_step_complete()?;
        info!(from = %self.step, to = %next, "wizard step forward");
        self.step = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::policy::Model;

    #[test]
    fn test_step_order() {
        assert_eq!(WizardStep::Description.next(), Some(WizardStep::Models));
        assert_eq!(WizardStep::Models.next(), Some(WizardStep::Review));
        assert_eq!(WizardStep::Review.next(), None);
        assert_eq!(WizardStep::Review.prev(), Some(WizardStep::Models));
        assert_eq!(WizardStep::Description.prev(), None);
        assert_eq!(WizardStep::Review.step_number(), WizardStep::COUNT);
    }

    #[test]
    fn test_next_step_requires_name() {
        let mut wizard = PolicyWizard::default();
        assert_eq!(wizard.next_step(), Err(WizardError::MissingName));
        assert_eq!(wizard.step(), WizardStep::Description);

        wizard.current_policy_mut().name = "fraud-detection".to_string();
        assert_eq!(wizard.next_step(), Ok(()));
        assert_eq!(wizard.step(), WizardStep::Models);
    }

    #[test]
    fn test_next_step_requires_a_model() {
        let mut wizard = PolicyWizard::new(Policy::new("p"));
        wizard.next_step().unwrap();

        assert_eq!(wizard.next_step(), Err(WizardError::NoModels));
        assert_eq!(wizard.step(), WizardStep::Models);

        wizard.current_policy_mut().models.push(Model::default());
        assert_eq!(wizard.next_step(), Ok(()));
        assert_eq!(wizard.step(), WizardStep::Review);
    }

    #[test]
    fn test_next_step_past_last_fails() {
        let mut wizard = PolicyWizard::new(Policy::new("p"));
        wizard.current_policy_mut().models.push(Model::default());
        wizard.next_step().unwrap();
        wizard.next_step().unwrap();

        assert_eq!(
            wizard.next_step(),
            Err(WizardError::NoNextStep(WizardStep::Review))
        );
    }

    #[test]
    fn test_previous_step() {
        let mut wizard = PolicyWizard::new(Policy::new("p"));
        wizard.previous_step();
        assert_eq!(wizard.step(), WizardStep::Description);

        wizard.next_step().unwrap();
        wizard.previous_step();
        assert_eq!(wizard.step(), WizardStep::Description);
    }

    #[test]
    fn test_into_policy_keeps_edits() {
        let mut wizard = PolicyWizard::default();
        wizard.current_policy_mut().description = "streaming rules".to_string();
        assert_eq!(wizard.into_policy().description, "streaming rules");
    }
}
