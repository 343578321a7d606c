//! Review step - the finished policy as it will be printed

use crate::action::Action;
use crate::component::Component;
use crate::model::Policy;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Review step component
#[derive(Default)]
pub struct ReviewComponent {
    pub scroll_offset: usize,
}

impl Component for ReviewComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Enter | KeyCode::Char('f') => Some(Action::FinishPolicy),
            KeyCode::Esc | KeyCode::Char('b') => Some(Action::PrevStep),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            KeyCode::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(10);
                None
            }
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the policy, so we use draw_with_policy
        Ok(())
    }
}

impl ReviewComponent {
    pub fn draw_with_policy(&mut self, frame: &mut Frame, area: Rect, policy: &Policy) -> Result<()> {
        let json = serde_json::to_string_pretty(policy)?;
        let lines: Vec<Line> = json.lines().map(Line::from).collect();
        let total = lines.len();
        let visible_height = area.height.saturating_sub(2) as usize;

        let max_scroll = total.saturating_sub(visible_height);
        if self.scroll_offset > max_scroll {
            self.scroll_offset = max_scroll;
        }

        let title = format!(
            " {} - {} model{} ",
            policy.name,
            policy.models.len(),
            if policy.models.len() == 1 { "" } else { "s" }
        );

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(Color::Green)),
            )
            .scroll((self.scroll_offset as u16, 0));
        frame.render_widget(paragraph, area);

        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(self.scroll_offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Field, Model};
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn policy_with_models(count: usize) -> Policy {
        let mut policy = Policy::new("twitter");
        for i in 0..count {
            policy.models.push(Model {
                inputs: vec![Field::new("raw", "string")],
                outputs: vec![Field::new(format!("out{}", i), "string")],
                model_type: "Morphline".to_string(),
                configuration: "{}".to_string(),
            });
        }
        policy
    }

    #[test]
    fn test_review_keys() {
        let mut review = ReviewComponent::default();
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        let back = KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE);
        assert_eq!(review.handle_key_event(enter).unwrap(), Some(Action::FinishPolicy));
        assert_eq!(review.handle_key_event(back).unwrap(), Some(Action::PrevStep));
    }

    #[test]
    fn test_scroll_is_clamped_on_draw() {
        let mut review = ReviewComponent {
            scroll_offset: 500,
        };
        let policy = policy_with_models(3);
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();

        terminal
            .draw(|frame| {
                let area = frame.area();
                review.draw_with_policy(frame, area, &policy).unwrap();
            })
            .unwrap();

        let total = serde_json::to_string_pretty(&policy).unwrap().lines().count();
        assert_eq!(review.scroll_offset, total - 8);
    }

    #[test]
    fn test_review_title_counts_models() {
        let mut review = ReviewComponent::default();
        let policy = policy_with_models(1);
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();

        terminal
            .draw(|frame| {
                let area = frame.area();
                review.draw_with_policy(frame, area, &policy).unwrap();
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("twitter - 1 model "));
        assert!(text.contains("\"type\": \"Morphline\""));
    }
}
