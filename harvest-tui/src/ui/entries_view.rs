use super::*;
use crate::app::screen::EntryRow;

pub fn render_entries(
    frame: &mut Frame,
    body: Rect,
    title: &str,
    rows: &[EntryRow],
    selected: usize,
) {
    let area = Rect {
        x: body.x + 1,
        y: body.y,
        width: body.width.saturating_sub(2),
        height: body.height,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ({}) ", title, rows.len()))
        .padding(Padding::horizontal(1));

    if rows.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No entries for this day. Press n to add one.",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = rows.iter().map(entry_item).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn entry_item(row: &EntryRow) -> ListItem<'static> {
    let muted = Style::default().fg(Color::DarkGray);
    let mut first = vec![
        Span::styled(
            format!("{:>6}", row.hours),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        Span::raw(row.project.clone()),
        Span::styled(format!("  {}", row.task), muted),
    ];
    if row.running {
        first.push(Span::styled("  ● running", Style::default().fg(Color::Green)));
    }
    if row.locked {
        first.push(Span::styled("  locked", Style::default().fg(Color::Red)));
    }
    if !row.billable {
        first.push(Span::styled("  non-billable", muted));
    }

    let mut lines = vec![Line::from(first)];
    if !row.notes.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("        {}", row.notes),
            muted,
        )));
    }
    ListItem::new(lines)
}
