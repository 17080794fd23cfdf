use super::*;
use crate::app::screen::PickerRow;

pub fn render_picker(
    frame: &mut Frame,
    body: Rect,
    title: &str,
    prompt: &str,
    rows: &[PickerRow],
    selected: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(body);

    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", prompt),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        chunks[0],
    );

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| match row {
            PickerRow::Item { label, recent } => {
                let style = if *recent {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(label.clone()).style(style)
            }
            PickerRow::Divider => ListItem::new("─".repeat(chunks[1].width as usize))
                .style(Style::default().fg(Color::DarkGray)),
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", title))
                .padding(Padding::horizontal(1)),
        )
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, chunks[1], &mut state);
}
