//! Component trait - Interface for UI components
//!
//! Each wizard screen and dialog is a component with its own presentation
//! state. Changes to the policy go through Actions handled by the App.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// Trait for UI components
///
/// 1. `handle_key_event` - Edit local state or return an Action
/// 2. `update` - Process Actions routed to the component
/// 3. `draw` - Render the component
pub trait Component {
    /// Initialize the component
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Handle a key event, returning an optional Action
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Update component state based on an Action
    ///
    /// May return a follow-up Action for the App to process.
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Draw the component to the frame
    ///
    /// Pure rendering: no state changes beyond scroll clamping.
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
