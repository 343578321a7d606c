//! Models step - build the policy's ordered list of models
//!
//! Left panel: one section per committed model plus the new-model section.
//! Right panel: the expanded section, either a read-only model or the form
//! for the draft. The draft state itself lives in `ModelListEditor`.

use crate::action::Action;
use crate::component::Component;
use crate::components::{split_sections, truncate_to_width};
use crate::model::{Field, Model, ModelListEditor, Policy, ReferenceData, ReferenceDataSource};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Focus
// ═══════════════════════════════════════════════════════════════════════════════

/// Editable field of the draft form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Type,
    Configuration,
    Outputs,
}

impl DraftField {
    fn next(&self) -> DraftField {
        match self {
            DraftField::Type => DraftField::Configuration,
            DraftField::Configuration => DraftField::Outputs,
            DraftField::Outputs => DraftField::Type,
        }
    }

    fn prev(&self) -> DraftField {
        match self {
            DraftField::Type => DraftField::Outputs,
            DraftField::Configuration => DraftField::Type,
            DraftField::Outputs => DraftField::Configuration,
        }
    }
}

/// Where key input goes on the models step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelsFocus {
    Sections,
    Draft(DraftField),
}

// ═══════════════════════════════════════════════════════════════════════════════
// Models Component
// ═══════════════════════════════════════════════════════════════════════════════

pub struct ModelsComponent {
    pub editor: ModelListEditor<ReferenceData>,
    pub focus: ModelsFocus,
    /// Output field being typed, added to the draft on Enter
    pub output_input: String,
    /// Problem with the last output entry
    pub field_error: Option<String>,
    list_state: ListState,
}

impl ModelsComponent {
    pub fn new(reference: ReferenceData) -> Self {
        Self {
            editor: ModelListEditor::new(reference),
            focus: ModelsFocus::Sections,
            output_input: String::new(),
            field_error: None,
            list_state: ListState::default(),
        }
    }

    /// Reset form state after a model was appended
    pub fn on_model_added(&mut self) {
        self.output_input.clear();
        self.field_error = None;
        self.focus = ModelsFocus::Draft(DraftField::Type);
    }

    /// Return to the section list after a model was removed
    pub fn on_model_removed(&mut self) {
        self.focus = ModelsFocus::Sections;
    }

    fn draft_slot(&self) -> usize {
        self.editor.display_state().slot_count().saturating_sub(1)
    }

    fn expanded(&self) -> usize {
        self.editor.display_state().expanded()
    }

    fn cycle_type(&mut self, forward: bool) {
        let types = self.editor.reference().model_types().to_vec();
        if types.is_empty() {
            return;
        }

        let current = types
            .iter()
            .position(|t| *t == self.editor.draft().model_type);
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => types.len() - 1,
            (Some(i), true) => (i + 1) % types.len(),
            (Some(i), false) => (i + types.len() - 1) % types.len(),
        };
        self.editor.draft_mut().model_type = types[next].clone();
    }

    fn commit_output(&mut self) {
        let Some(field) = Field::parse(&self.output_input) else {
            self.field_error = Some(format!(
                "'{}' is not a valid field (use name or name:type)",
                self.output_input.trim()
            ));
            return;
        };

        let draft = self.editor.draft();
        let taken = draft
            .inputs
            .iter()
            .chain(draft.outputs.iter())
            .any(|f| f.name == field.name);
        if taken {
            self.field_error = Some(format!("Field '{}' already exists", field.name));
            return;
        }

        self.editor.draft_mut().outputs.push(field);
        self.output_input.clear();
        self.field_error = None;
    }

    fn handle_sections_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let next = self.expanded() + 1;
                self.editor.expand_section(next);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if let Some(prev) = self.expanded().checked_sub(1) {
                    self.editor.expand_section(prev);
                }
                None
            }
            KeyCode::Char('a') => {
                let slot = self.draft_slot();
                self.editor.expand_section(slot);
                self.focus = ModelsFocus::Draft(DraftField::Type);
                None
            }
            KeyCode::Enter => {
                if self.editor.is_draft_slot(self.expanded()) {
                    self.focus = ModelsFocus::Draft(DraftField::Type);
                }
                None
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                let expanded = self.expanded();
                if expanded < self.draft_slot() {
                    Some(Action::RequestRemoveModel(expanded))
                } else {
                    None
                }
            }
            KeyCode::Char('n') => Some(Action::NextStep),
            KeyCode::Char('b') | KeyCode::Esc => Some(Action::PrevStep),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            _ => None,
        }
    }

    fn handle_draft_key(&mut self, field: DraftField, key: KeyEvent) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if ctrl => return Some(Action::AddModel),
            KeyCode::Char('x') if ctrl => {
                self.editor.draft_mut().outputs.pop();
                return None;
            }
            KeyCode::Esc => {
                self.focus = ModelsFocus::Sections;
                return None;
            }
            KeyCode::Tab => {
                self.focus = ModelsFocus::Draft(field.next());
                return None;
            }
            KeyCode::BackTab => {
                self.focus = ModelsFocus::Draft(field.prev());
                return None;
            }
            _ => {}
        }

        if ctrl {
            return None;
        }

        match (field, key.code) {
            (DraftField::Type, KeyCode::Right) => self.cycle_type(true),
            (DraftField::Type, KeyCode::Left) => self.cycle_type(false),
            (DraftField::Configuration, KeyCode::Char(c)) => {
                self.editor.draft_mut().configuration.push(c);
            }
            (DraftField::Configuration, KeyCode::Backspace) => {
                self.editor.draft_mut().configuration.pop();
            }
            (DraftField::Outputs, KeyCode::Char(c)) => {
                self.output_input.push(c);
                self.field_error = None;
            }
            (DraftField::Outputs, KeyCode::Backspace) => {
                self.output_input.pop();
                self.field_error = None;
            }
            (DraftField::Outputs, KeyCode::Enter) => self.commit_output(),
            _ => {}
        }
        None
    }
}

impl Component for ModelsComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match self.focus {
            ModelsFocus::Sections => self.handle_sections_key(key),
            ModelsFocus::Draft(field) => self.handle_draft_key(field, key),
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the policy, so we use draw_with_policy
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════════

impl ModelsComponent {
    pub fn draw_with_policy(&mut self, frame: &mut Frame, area: Rect, policy: &Policy) -> Result<()> {
        let (list_area, section_area) = split_sections(area);
        self.draw_sections(frame, list_area, policy);

        let expanded = self.expanded();
        if self.editor.is_draft_slot(expanded) {
            self.draw_draft_form(frame, section_area);
        } else {
            match self.editor.model_at(policy, expanded) {
                Ok(model) => draw_model_details(frame, section_area, expanded, model),
                Err(e) => {
                    let paragraph = Paragraph::new(e.to_string())
                        .style(Style::default().fg(Color::Red))
                        .block(Block::default().borders(Borders::ALL));
                    frame.render_widget(paragraph, section_area);
                }
            }
        }
        Ok(())
    }

    fn draw_sections(&mut self, frame: &mut Frame, area: Rect, policy: &Policy) {
        let state = *self.editor.display_state();
        let label_width = area.width.saturating_sub(6) as usize;

        let items: Vec<ListItem> = state
            .flags()
            .into_iter()
            .enumerate()
            .map(|(i, expanded)| {
                let arrow = if expanded { "▾ " } else { "▸ " };
                let (label, color) = if self.editor.is_draft_slot(i) {
                    ("+ New model".to_string(), Color::Green)
                } else {
                    let summary = policy
                        .models
                        .get(i)
                        .map(|m| m.summary())
                        .unwrap_or_default();
                    (format!("{}. {}", i + 1, summary), Color::White)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(arrow, Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        truncate_to_width(&label, label_width),
                        Style::default().fg(color),
                    ),
                ]))
            })
            .collect();

        let border_color = if self.focus == ModelsFocus::Sections {
            Color::Cyan
        } else {
            Color::DarkGray
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Models ({}) ", policy.models.len()))
                    .border_style(Style::default().fg(border_color)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );

        self.list_state.select(Some(state.expanded()));
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn draw_draft_form(&self, frame: &mut Frame, area: Rect) {
        let draft = self.editor.draft();
        let focused = |field: DraftField| self.focus == ModelsFocus::Draft(field);
        let label_style = Style::default().fg(Color::Cyan);
        let value_style = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        let marker = |field: DraftField| {
            if focused(field) {
                Span::styled("> ", Style::default().fg(Color::Yellow))
            } else {
                Span::raw("  ")
            }
        };

        let mut lines = vec![
            Line::from(vec![
                Span::raw("  "),
                Span::styled("Inputs:        ", label_style),
                Span::styled(field_list(&draft.inputs), Style::default().fg(Color::DarkGray)),
            ]),
            Line::from(""),
            Line::from(vec![
                marker(DraftField::Type),
                Span::styled("Type:          ", label_style),
                Span::styled(
                    if draft.model_type.is_empty() {
                        "< choose with ←/→ >".to_string()
                    } else {
                        format!("< {} >", draft.model_type)
                    },
                    value_style,
                ),
            ]),
            Line::from(vec![
                marker(DraftField::Configuration),
                Span::styled("Configuration: ", label_style),
                Span::styled(
                    format!(
                        "{}{}",
                        draft.configuration,
                        if focused(DraftField::Configuration) { "_" } else { "" }
                    ),
                    value_style,
                ),
            ]),
            Line::from(vec![
                marker(DraftField::Outputs),
                Span::styled("Outputs:       ", label_style),
                Span::styled(field_list(&draft.outputs), value_style),
            ]),
            Line::from(vec![
                Span::raw("                 "),
                Span::styled("+ ", Style::default().fg(Color::Green)),
                Span::raw(format!(
                    "{}{}",
                    self.output_input,
                    if focused(DraftField::Outputs) { "_" } else { "" }
                )),
            ]),
        ];

        if let Some(ref error) = self.field_error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        if self.editor.show_model_error() {
            let problems = self.editor.draft_problems();
            if !problems.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("Model is incomplete, missing: {}", problems.join(", ")),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )));
            }
        }

        let border_color = if matches!(self.focus, ModelsFocus::Draft(_)) {
            Color::Cyan
        } else {
            Color::DarkGray
        };

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" New Model #{} ", self.editor.draft_index() + 1))
                .border_style(Style::default().fg(border_color)),
        );
        frame.render_widget(paragraph, area);
    }
}

fn field_list(fields: &[Field]) -> String {
    if fields.is_empty() {
        return "(none)".to_string();
    }
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn draw_model_details(frame: &mut Frame, area: Rect, index: usize, model: &Model) {
    let label_style = Style::default().fg(Color::Cyan);
    let lines = vec![
        Line::from(vec![
            Span::styled("Type:          ", label_style),
            Span::raw(model.model_type.clone()),
        ]),
        Line::from(vec![
            Span::styled("Inputs:        ", label_style),
            Span::raw(field_list(&model.inputs)),
        ]),
        Line::from(vec![
            Span::styled("Outputs:       ", label_style),
            Span::raw(field_list(&model.outputs)),
        ]),
        Line::from(vec![
            Span::styled("Configuration: ", label_style),
            Span::raw(model.configuration.clone()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "d  Remove this model",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Model #{} ", index + 1))
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PolicySource, PolicyWizard};
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn reference() -> ReferenceData {
        ReferenceData {
            default_inputs: vec![Field::new("raw", "string")],
            model_types: vec!["Morphline".to_string(), "DateTime".to_string()],
        }
    }

    fn setup() -> (ModelsComponent, PolicyWizard) {
        let wizard = PolicyWizard::new(Policy::new("test"));
        let mut component = ModelsComponent::new(reference());
        component.editor.initialize(&wizard);
        (component, wizard)
    }

    fn press(component: &mut ModelsComponent, code: KeyCode) -> Option<Action> {
        component.handle_key_event(key(code)).unwrap()
    }

    fn type_text(component: &mut ModelsComponent, text: &str) {
        for c in text.chars() {
            press(component, KeyCode::Char(c));
        }
    }

    fn fill_form(component: &mut ModelsComponent, output: &str) {
        component.focus = ModelsFocus::Draft(DraftField::Type);
        press(component, KeyCode::Right);
        press(component, KeyCode::Tab);
        type_text(component, "{}");
        press(component, KeyCode::Tab);
        type_text(component, output);
        press(component, KeyCode::Enter);
    }

    #[test]
    fn test_fill_draft_through_keys() {
        let (mut component, _wizard) = setup();
        press(&mut component, KeyCode::Char('a'));
        assert_eq!(component.focus, ModelsFocus::Draft(DraftField::Type));

        fill_form(&mut component, "text:string");

        let draft = component.editor.draft();
        assert_eq!(draft.model_type, "Morphline");
        assert_eq!(draft.configuration, "{}");
        assert_eq!(draft.outputs, vec![Field::new("text", "string")]);
        assert!(component.output_input.is_empty());
        assert!(component.editor.is_valid_draft());
    }

    #[test]
    fn test_type_cycles_both_ways() {
        let (mut component, _wizard) = setup();
        component.focus = ModelsFocus::Draft(DraftField::Type);

        press(&mut component, KeyCode::Left);
        assert_eq!(component.editor.draft().model_type, "DateTime");
        press(&mut component, KeyCode::Right);
        assert_eq!(component.editor.draft().model_type, "Morphline");
        press(&mut component, KeyCode::Left);
        assert_eq!(component.editor.draft().model_type, "DateTime");
    }

    #[test]
    fn test_invalid_and_duplicate_outputs_rejected() {
        let (mut component, _wizard) = setup();
        component.focus = ModelsFocus::Draft(DraftField::Outputs);

        type_text(&mut component, "9bad");
        press(&mut component, KeyCode::Enter);
        assert!(component.field_error.is_some());
        assert!(component.editor.draft().outputs.is_empty());

        component.output_input.clear();
        type_text(&mut component, "raw");
        press(&mut component, KeyCode::Enter);
        assert_eq!(
            component.field_error.as_deref(),
            Some("Field 'raw' already exists")
        );
    }

    #[test]
    fn test_ctrl_keys_in_draft() {
        let (mut component, _wizard) = setup();
        fill_form(&mut component, "text");

        assert_eq!(
            component.handle_key_event(ctrl('x')).unwrap(),
            None
        );
        assert!(component.editor.draft().outputs.is_empty());
        assert_eq!(
            component.handle_key_event(ctrl('s')).unwrap(),
            Some(Action::AddModel)
        );
    }

    #[test]
    fn test_sections_navigation_and_remove_request() {
        let (mut component, mut wizard) = setup();
        fill_form(&mut component, "text");
        assert!(component.editor.add_model(wizard.current_policy_mut()));
        component.on_model_added();
        component.focus = ModelsFocus::Sections;

        // Draft slot is expanded after the add; it cannot be removed
        assert_eq!(press(&mut component, KeyCode::Char('d')), None);

        press(&mut component, KeyCode::Up);
        assert_eq!(component.editor.display_state().expanded(), 0);
        assert_eq!(
            press(&mut component, KeyCode::Char('d')),
            Some(Action::RequestRemoveModel(0))
        );

        press(&mut component, KeyCode::Up);
        assert_eq!(component.editor.display_state().expanded(), 0);
        press(&mut component, KeyCode::Down);
        press(&mut component, KeyCode::Down);
        assert_eq!(component.editor.display_state().expanded(), 1);
    }

    #[test]
    fn test_sections_step_keys() {
        let (mut component, _wizard) = setup();
        assert_eq!(press(&mut component, KeyCode::Char('n')), Some(Action::NextStep));
        assert_eq!(press(&mut component, KeyCode::Esc), Some(Action::PrevStep));
        assert_eq!(press(&mut component, KeyCode::Char('?')), Some(Action::OpenHelp));
    }

    #[test]
    fn test_draw_shows_sections_and_error() {
        let (mut component, mut wizard) = setup();
        fill_form(&mut component, "text");
        component.editor.add_model(wizard.current_policy_mut());
        component.editor.add_model(wizard.current_policy_mut());
        assert!(component.editor.show_model_error());

        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                component
                    .draw_with_policy(frame, area, wizard.current_policy())
                    .unwrap();
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("1. Morphline"));
        assert!(text.contains("+ New model"));
        assert!(text.contains("raw:string, text:string"));
        assert!(text.contains("missing: outputs, type, configuration"));
    }
}
