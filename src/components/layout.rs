//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::UnicodeWidthChar;

/// Wizard screen layout areas
pub struct WizardLayout {
    pub title: Rect,
    pub progress: Rect,
    pub content: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate the wizard frame: title, progress line, step content, status, help
pub fn calculate_wizard_layout(area: Rect) -> WizardLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(1), // Progress
            Constraint::Min(8),    // Content
            Constraint::Length(1), // Status
            Constraint::Length(3), // Help
        ])
        .split(area);

    WizardLayout {
        title: chunks[0],
        progress: chunks[1],
        content: chunks[2],
        status: chunks[3],
        help: chunks[4],
    }
}

/// Split the models step into the section list and the expanded section
pub fn split_sections(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Cut `text` to at most `max_width` terminal columns, marking the cut with `…`
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}
