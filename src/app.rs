//! Root application component
//!
//! The App owns the wizard (and through it the policy), routes key events to
//! the component of the current step or the top modal, and applies Actions.
//! Policy mutations from the models step go through `ModelListEditor`.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_wizard_layout, DescriptionComponent, HelpDialog, ModelsComponent, QuitDialog,
    RemoveDialog, ReviewComponent,
};
use crate::model::modal::{Modal, ModalStack};
use crate::model::{Policy, PolicySource, PolicyWizard, ReferenceData, WizardStep};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, info, warn};

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Owner of the policy and the current step
    pub wizard: PolicyWizard,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Set when the user accepted the policy on the review step
    pub finished: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub description: DescriptionComponent,
    pub models: ModelsComponent,
    pub review: ReviewComponent,
    pub quit_dialog: QuitDialog,
    pub remove_dialog: RemoveDialog,
    pub help_dialog: HelpDialog,
}

impl App {
    pub fn new(policy: Policy, reference: ReferenceData) -> App {
        let mut description = DescriptionComponent::new();
        description.load_from(&policy);

        App {
            wizard: PolicyWizard::new(policy),
            modals: ModalStack::new(),
            should_quit: false,
            finished: false,
            error: None,
            status_message: None,
            description,
            models: ModelsComponent::new(reference),
            review: ReviewComponent::default(),
            quit_dialog: QuitDialog,
            remove_dialog: RemoveDialog,
            help_dialog: HelpDialog::default(),
        }
    }

    /// The finished policy, if the user accepted it
    pub fn into_finished_policy(self) -> Option<Policy> {
        if self.finished {
            Some(self.wizard.into_policy())
        } else {
            None
        }
    }

    fn next_step(&mut self) {
        let result = match self.wizard.step() {
            WizardStep::Description => {
                self.description
                    .apply_to(self.wizard.current_policy_mut());
                self.wizard.next_step()
            }
            WizardStep::Models => self.models.editor.advance(&mut self.wizard),
            WizardStep::Review => self.wizard.next_step(),
        };

        match result {
            Ok(()) => self.enter_step(),
            Err(e) => {
                warn!(step = %self.wizard.step(), error = %e, "cannot advance wizard");
                self.error = Some(e.to_string());
            }
        }
    }

    fn prev_step(&mut self) {
        if self.wizard.step() == WizardStep::Description {
            return;
        }
        self.wizard.previous_step();
        self.enter_step();
    }

    /// Prepare the component of the step just entered
    fn enter_step(&mut self) {
        match self.wizard.step() {
            WizardStep::Description => self.description.load_from(self.wizard.current_policy()),
            WizardStep::Models => self.models.editor.initialize(&self.wizard),
            WizardStep::Review => self.review.scroll_offset = 0,
        }
    }

    fn add_model(&mut self) {
        if self.models.editor.add_model(self.wizard.current_policy_mut()) {
            let count = self.wizard.current_policy().models.len();
            self.models.on_model_added();
            self.status_message = Some(format!("Model {} added", count));
        }
    }

    fn remove_model(&mut self, index: usize) {
        match self
            .models
            .editor
            .remove_model(self.wizard.current_policy_mut(), index)
        {
            Ok(removed) => {
                self.models.on_model_removed();
                self.status_message =
                    Some(format!("Removed model {} ({})", index + 1, removed.model_type));
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.enter_step();
        info!(step = %self.wizard.step(), "policy wizard started");
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        // Banners stay until the next key press
        self.error = None;
        self.status_message = None;

        if let Some(modal) = self.modals.top().cloned() {
            return self.handle_modal_key_event(&modal, key);
        }

        match self.wizard.step() {
            WizardStep::Description => self.description.handle_key_event(key),
            WizardStep::Models => self.models.handle_key_event(key),
            WizardStep::Review => self.review.handle_key_event(key),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            debug!(%action, "update");
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick | Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Wizard Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::NextStep => self.next_step(),
            Action::PrevStep => self.prev_step(),
            Action::FinishPolicy => {
                info!(
                    policy = %self.wizard.current_policy().name,
                    models = self.wizard.current_policy().models.len(),
                    "policy finished"
                );
                self.finished = true;
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Models
            // ─────────────────────────────────────────────────────────────────
            Action::AddModel => self.add_model(),
            Action::RequestRemoveModel(index) => {
                self.modals.push(Modal::ConfirmRemove { index });
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ConfirmModal => {
                if let Some(Modal::ConfirmRemove { index }) = self.modals.pop() {
                    self.remove_model(index);
                }
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_wizard_layout(area);
        let step = self.wizard.step();

        // Title
        let policy_name = &self.wizard.current_policy().name;
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                " Policy Wizard ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                if policy_name.is_empty() {
                    String::new()
                } else {
                    format!("- {}", policy_name)
                },
                Style::default().fg(Color::White),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, layout.title);

        // Progress indicator
        let progress = format!(
            " Step {} of {}: {}",
            step.step_number(),
            WizardStep::COUNT,
            step.title()
        );
        frame.render_widget(
            Paragraph::new(Span::styled(progress, Style::default().fg(Color::DarkGray))),
            layout.progress,
        );

        // Step content
        match step {
            WizardStep::Description => self.description.draw(frame, layout.content)?,
            WizardStep::Models => {
                self.models
                    .draw_with_policy(frame, layout.content, self.wizard.current_policy())?
            }
            WizardStep::Review => {
                self.review
                    .draw_with_policy(frame, layout.content, self.wizard.current_policy())?
            }
        }

        // Status line
        let status = if let Some(ref error) = self.error {
            Span::styled(format!(" {}", error), Style::default().fg(Color::Red))
        } else if let Some(ref message) = self.status_message {
            Span::styled(format!(" {}", message), Style::default().fg(Color::Green))
        } else {
            Span::raw("")
        };
        frame.render_widget(Paragraph::new(status), layout.status);

        // Help bar
        let help_text = match step {
            WizardStep::Description => " Enter  Continue   Tab  Switch field   Esc  Quit",
            WizardStep::Models => {
                " j/k  Sections   a  New model   Ctrl+s  Add   d  Remove   n  Continue   ?  Help"
            }
            WizardStep::Review => " Enter  Finish   b  Back   j/k  Scroll   q  Quit",
        };
        let help = Paragraph::new(Line::from(Span::styled(
            help_text,
            Style::default().fg(Color::DarkGray),
        )))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, layout.help);

        // Modal overlay
        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }

        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::ConfirmRemove { .. } => self.remove_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::ConfirmRemove { index } => {
                let model = self.wizard.current_policy().models.get(*index);
                self.remove_dialog.draw_with_model(frame, area, *index, model)?;
            }
            Modal::Help => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }
}
