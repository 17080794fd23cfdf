use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Helper function to create a centered rectangle
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height.saturating_sub(height)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((r.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((r.width.saturating_sub(width)) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Render a text value with a block cursor at character column `cursor`.
pub fn with_cursor(value: &str, cursor: usize) -> String {
    let mut out = String::with_capacity(value.len() + 3);
    let mut inserted = false;
    for (i, c) in value.chars().enumerate() {
        if i == cursor {
            out.push('█');
            inserted = true;
        }
        out.push(c);
    }
    if !inserted {
        out.push('█');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_is_drawn_at_column() {
        assert_eq!(with_cursor("1:30", 0), "█1:30");
        assert_eq!(with_cursor("1:30", 2), "1:█30");
        assert_eq!(with_cursor("1:30", 4), "1:30█");
        assert_eq!(with_cursor("", 0), "█");
    }
}
