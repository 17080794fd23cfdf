use super::utils::centered_rect;
use super::*;

pub fn render_confirm(frame: &mut Frame, title: &str, lines: &[String]) {
    let area = centered_rect(56, 10, frame.area());
    frame.render_widget(Clear, area);

    let mut text = vec![Line::from("")];
    for (i, line) in lines.iter().enumerate() {
        let style = if i == 0 {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        text.push(Line::from(Span::styled(line.clone(), style)));
    }
    text.push(Line::from(""));
    text.push(Line::from(vec![
        Span::styled("[y] Yes", Style::default().fg(Color::Red)),
        Span::raw("    "),
        Span::styled("[n] No", Style::default().fg(Color::White)),
    ]));

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title))
                .padding(Padding::horizontal(1)),
        )
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

pub fn render_help(frame: &mut Frame, body: Rect, bindings: &[(&str, &str)]) {
    let area = centered_rect(60, bindings.len() as u16 + 4, body);
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];
    for (keys, action) in bindings {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<22}", keys), Style::default().fg(Color::Yellow)),
            Span::styled(action.to_string(), Style::default().fg(Color::White)),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Keys ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(paragraph, area);
}
