use super::utils::{centered_rect, with_cursor};
use super::*;
use crate::app::screen::FormField;

pub fn render_form(frame: &mut Frame, body: Rect, title: &str, fields: &[FormField]) {
    let height = (fields.len() as u16) * 2 + 3;
    let area = centered_rect(body.width.saturating_sub(4).min(72), height, body);
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];
    for field in fields {
        let label_style = if field.focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let value = match field.cursor {
            Some(cursor) => with_cursor(&field.value, cursor),
            None => field.value.clone(),
        };
        let marker = if field.focused { "> " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(format!("{:<10}", field.label), label_style),
            Span::styled(value, Style::default().fg(Color::White)),
        ]));
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(paragraph, area);
}
