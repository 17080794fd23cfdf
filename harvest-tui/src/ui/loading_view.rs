use super::utils::centered_rect;
use super::*;

pub fn render_loading(
    frame: &mut Frame,
    body: Rect,
    entries_done: bool,
    catalog_done: bool,
    throbber_state: &mut ThrobberState,
) {
    let area = centered_rect(36, 5, body);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let throbber = throbber_widgets_tui::Throbber::default()
        .label(" Loading Harvest...")
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(throbber_widgets_tui::WhichUse::Spin);
    frame.render_stateful_widget(throbber, rows[0], throbber_state);

    frame.render_widget(progress_line("Time entries", entries_done), rows[1]);
    frame.render_widget(progress_line("Projects and tasks", catalog_done), rows[2]);
}

fn progress_line(label: &str, done: bool) -> Paragraph<'static> {
    let (mark, style) = if done {
        ("✓", Style::default().fg(Color::Green))
    } else {
        ("…", Style::default().fg(Color::DarkGray))
    };
    Paragraph::new(Line::from(vec![
        Span::styled(format!("  {} ", mark), style),
        Span::styled(label.to_string(), Style::default().fg(Color::White)),
    ]))
}
