//! Description step - name and describe the policy

use crate::action::Action;
use crate::component::Component;
use crate::model::Policy;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Text field with focus in the description form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionField {
    Name,
    Description,
}

/// Description step component
pub struct DescriptionComponent {
    pub focus: DescriptionField,
    pub name: String,
    pub description: String,
}

impl Default for DescriptionComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptionComponent {
    pub fn new() -> Self {
        Self {
            focus: DescriptionField::Name,
            name: String::new(),
            description: String::new(),
        }
    }

    /// Pre-fill the form from an existing policy
    pub fn load_from(&mut self, policy: &Policy) {
        self.name = policy.name.clone();
        self.description = policy.description.clone();
    }

    /// Write the form into the policy
    pub fn apply_to(&self, policy: &mut Policy) {
        policy.name = self.name.trim().to_string();
        policy.description = self.description.trim().to_string();
    }

    fn focused_input(&mut self) -> &mut String {
        match self.focus {
            DescriptionField::Name => &mut self.name,
            DescriptionField::Description => &mut self.description,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            DescriptionField::Name => DescriptionField::Description,
            DescriptionField::Description => DescriptionField::Name,
        };
    }
}

impl Component for DescriptionComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Enter => Some(Action::NextStep),
            KeyCode::Esc => Some(Action::OpenQuitDialog),
            KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_focus();
                None
            }
            KeyCode::Backspace => {
                self.focused_input().pop();
                None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.focused_input().push(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let field_line = |label: &str, value: &str, focused: bool| {
            let cursor = if focused { "_" } else { "" };
            let marker_style = if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(vec![
                Span::styled(if focused { "> " } else { "  " }, marker_style),
                Span::styled(format!("{:13}", label), Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("{}{}", value, cursor),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        };

        let lines = vec![
            Line::from(""),
            Line::from("Give the policy a name and an optional description."),
            Line::from(""),
            field_line("Name:", &self.name, self.focus == DescriptionField::Name),
            Line::from(""),
            field_line(
                "Description:",
                &self.description,
                self.focus == DescriptionField::Description,
            ),
        ];

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Policy Description ")
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(paragraph, area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(component: &mut DescriptionComponent, text: &str) {
        for c in text.chars() {
            component.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let mut component = DescriptionComponent::new();
        type_text(&mut component, "twitter");
        component.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_text(&mut component, "counts tweets");
        component.handle_key_event(key(KeyCode::Backspace)).unwrap();

        assert_eq!(component.name, "twitter");
        assert_eq!(component.description, "counts tweet");
    }

    #[test]
    fn test_enter_requests_next_step() {
        let mut component = DescriptionComponent::new();
        assert_eq!(
            component.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::NextStep)
        );
    }

    #[test]
    fn test_apply_and_load_round_trip_trims() {
        let mut component = DescriptionComponent::new();
        component.name = "  fraud ".to_string();
        component.description = "rules ".to_string();

        let mut policy = Policy::default();
        component.apply_to(&mut policy);
        assert_eq!(policy.name, "fraud");
        assert_eq!(policy.description, "rules");

        let mut reloaded = DescriptionComponent::new();
        reloaded.load_from(&policy);
        assert_eq!(reloaded.name, "fraud");
    }
}
