//! Model list editor - append-only construction of a policy's models
//!
//! The editor owns a single draft model. Its inputs are never typed by the
//! user: the first model gets the reference default inputs, every later model
//! gets the previous model's inputs followed by its outputs. A valid draft is
//! appended to the policy and a fresh draft is derived for the next slot.
//!
//! The policy itself stays with its `PolicySource`; the editor borrows it for
//! each operation.

use super::policy::{Field, Model, Policy};
use super::reference::ReferenceDataSource;
use super::wizard::PolicySource;
use crate::error::{EditorError, WizardError};
use tracing::{debug, info, warn};

// ═══════════════════════════════════════════════════════════════════════════════
// Display State
// ═══════════════════════════════════════════════════════════════════════════════

/// Expand/collapse state of the model sections
///
/// One slot per committed model plus one for the draft. Rebuilt from the model
/// count after every mutation, which leaves only the draft slot expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayState {
    slots: usize,
    expanded: usize,
}

impl DisplayState {
    pub fn for_model_count(count: usize) -> Self {
        Self {
            slots: count + 1,
            expanded: count,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots
    }

    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// One flag per slot, true for the expanded one
    pub fn flags(&self) -> Vec<bool> {
        (0..self.slots).map(|i| i == self.expanded).collect()
    }

    /// Expand another slot for browsing; out-of-range indices are ignored
    pub fn expand(&mut self, index: usize) -> bool {
        if index < self.slots {
            self.expanded = index;
            true
        } else {
            false
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Model List Editor
// ═══════════════════════════════════════════════════════════════════════════════

/// Controller for the models step of the wizard
#[derive(Debug, Clone)]
pub struct ModelListEditor<R> {
    reference: R,
    draft: Model,
    draft_index: usize,
    show_model_error: bool,
    display: DisplayState,
}

impl<R: ReferenceDataSource> ModelListEditor<R> {
    pub fn new(reference: R) -> Self {
        Self {
            reference,
            draft: Model::default(),
            draft_index: 0,
            show_model_error: false,
            display: DisplayState::for_model_count(0),
        }
    }

    pub fn reference(&self) -> &R {
        &self.reference
    }

    pub fn draft(&self) -> &Model {
        &self.draft
    }

    /// Mutable access for the draft form
    ///
    /// Inputs are derived; the form only edits type, configuration and outputs.
    pub fn draft_mut(&mut self) -> &mut Model {
        &mut self.draft
    }

    pub fn draft_index(&self) -> usize {
        self.draft_index
    }

    pub fn show_model_error(&self) -> bool {
        self.show_model_error
    }

    pub fn display_state(&self) -> &DisplayState {
        &self.display
    }

    /// Expand a section without touching the model list
    pub fn expand_section(&mut self, index: usize) -> bool {
        self.display.expand(index)
    }

    /// Bind to the source's current policy and derive draft and display state
    pub fn initialize<S: PolicySource>(&mut self, source: &S) {
        let policy = source.current_policy();
        self.draft_index = policy.models.len();
        self.reset_draft(policy);
        self.resync_display_state(policy);
        debug!(models = policy.models.len(), "model editor initialized");
    }

    pub fn is_draft_slot(&self, index: usize) -> bool {
        index == self.draft_index
    }

    /// Inputs for the draft at the current index, without changing state
    ///
    /// Index 0 yields the reference defaults. Index `k` yields the inputs and
    /// outputs of model `k - 1`, or nothing if that model does not exist.
    pub fn chained_inputs(&self, policy: &Policy) -> Vec<Field> {
        if self.draft_index == 0 {
            return self.reference.default_inputs().to_vec();
        }

        match policy.models.get(self.draft_index - 1) {
            Some(previous) => previous
                .inputs
                .iter()
                .chain(previous.outputs.iter())
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Move the draft index onto the model it chains from
    ///
    /// Only steps when that model exists.
    pub fn step_back(&mut self, policy: &Policy) {
        if self.draft_index > 0 && self.draft_index <= policy.models.len() {
            self.draft_index -= 1;
        }
    }

    /// Chained inputs for the draft, stepping the index back onto the source model
    ///
    /// With `k > 0` models this returns `models[k-1].inputs ++ models[k-1].outputs`
    /// and leaves `draft_index == k - 1`. The next `add_model`, `remove_model` or
    /// `initialize` puts the index back at the end of the list.
    pub fn compute_draft_inputs(&mut self, policy: &Policy) -> Vec<Field> {
        let inputs = self.chained_inputs(policy);
        self.step_back(policy);
        inputs
    }

    pub fn is_valid_draft(&self) -> bool {
        self.draft_problems().is_empty()
    }

    /// What the draft still lacks before it can be added
    pub fn draft_problems(&self) -> Vec<&'static str> {
        let mut problems = Vec::new();
        if self.draft.inputs.is_empty() {
            problems.push("inputs");
        }
        if self.draft.outputs.is_empty() {
            problems.push("outputs");
        }
        if self.draft.model_type.is_empty() {
            problems.push("type");
        }
        if self.draft.configuration.is_empty() {
            problems.push("configuration");
        }
        problems
    }

    /// Append the draft to the policy if it is complete
    ///
    /// Returns whether the model was added. An incomplete draft sets the
    /// validation flag and leaves everything else untouched.
    pub fn add_model(&mut self, policy: &mut Policy) -> bool {
        if !self.is_valid_draft() {
            warn!(missing = ?self.draft_problems(), "draft model is incomplete");
            self.show_model_error = true;
            return false;
        }

        let model = self.draft.clone();
        info!(
            model_type = %model.model_type,
            outputs = model.outputs.len(),
            position = policy.models.len(),
            "model added"
        );
        policy.models.push(model);
        self.reset_draft(policy);
        self.resync_display_state(policy);
        true
    }

    /// The model rendered at `index`; the draft while the policy has no models
    pub fn model_at<'a>(&'a self, policy: &'a Policy, index: usize) -> Result<&'a Model, EditorError> {
        if policy.models.is_empty() {
            return Ok(&self.draft);
        }

        policy.models.get(index).ok_or(EditorError::IndexOutOfRange {
            index,
            len: policy.models.len(),
        })
    }

    /// Remove a committed model, shifting later models left
    ///
    /// The draft keeps the inputs it already had, even if they were chained
    /// from the removed model.
    pub fn remove_model(&mut self, policy: &mut Policy, index: usize) -> Result<Model, EditorError> {
        if index >= policy.models.len() {
            return Err(EditorError::IndexOutOfRange {
                index,
                len: policy.models.len(),
            });
        }

        let removed = policy.models.remove(index);
        info!(position = index, remaining = policy.models.len(), "model removed");
        self.draft_index = policy.models.len();
        self.resync_display_state(policy);
        Ok(removed)
    }

    /// Hand control to the wizard's next step
    pub fn advance<S: PolicySource>(&self, source: &mut S) -> Result<(), WizardError> {
        source.next_step()
    }

    fn reset_draft(&mut self, policy: &Policy) {
        self.draft_index = policy.models.len();
        self.draft.inputs = self.chained_inputs(policy);
        self.draft.outputs.clear();
        self.draft.model_type.clear();
        self.draft.configuration.clear();
        self.show_model_error = false;
    }

    fn resync_display_state(&mut self, policy: &Policy) {
        self.display = DisplayState::for_model_count(policy.models.len());
    }
}
