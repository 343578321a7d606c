//! Model removal confirmation dialog

use crate::action::Action;
use crate::component::Component;
use crate::components::{centered_popup, truncate_to_width};
use crate::model::Model;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Asks before a committed model is removed
#[derive(Default)]
pub struct RemoveDialog;

impl Component for RemoveDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Action::ConfirmModal),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the model being removed, so we use draw_with_model
        Ok(())
    }
}

impl RemoveDialog {
    pub fn draw_with_model(
        &self,
        frame: &mut Frame,
        area: Rect,
        index: usize,
        model: Option<&Model>,
    ) -> Result<()> {
        let popup_area = centered_popup(area, 50, 9);
        frame.render_widget(Clear, popup_area);

        let label = model
            .map(|m| m.summary())
            .unwrap_or_else(|| "unknown model".to_string());
        let label = truncate_to_width(&label, popup_area.width.saturating_sub(4) as usize);

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Remove model {}?", index + 1),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label, Style::default().fg(Color::Cyan))),
            Line::from(Span::styled(
                "Later models keep their inputs.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " y ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Remove  "),
                Span::styled(
                    " n/Esc ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw("Cancel"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Remove Model ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            )
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_remove_dialog_keys() {
        let mut dialog = RemoveDialog;
        let yes = KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE);
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(dialog.handle_key_event(yes).unwrap(), Some(Action::ConfirmModal));
        assert_eq!(dialog.handle_key_event(esc).unwrap(), Some(Action::CloseModal));
    }

    #[test]
    fn test_remove_dialog_renders_model_number() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let model = Model {
            model_type: "DateTime".to_string(),
            ..Model::default()
        };

        terminal
            .draw(|frame| {
                let area = frame.area();
                RemoveDialog
                    .draw_with_model(frame, area, 1, Some(&model))
                    .unwrap();
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Remove model 2?"));
        assert!(text.contains("DateTime"));
    }
}
