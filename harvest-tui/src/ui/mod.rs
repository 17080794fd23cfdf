use crate::app::screen::{Body, Screen, StatusView};
use crate::app::Severity;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
    Frame,
};
use throbber_widgets_tui::ThrobberState;

mod dialogs;
mod entries_view;
mod form_view;
mod loading_view;
mod picker_view;
pub(super) mod utils;

/// Paint one frame from the render description.
pub fn render(frame: &mut Frame, screen: &Screen, throbber_state: &mut ThrobberState) {
    let banner_height = screen.banners.len() as u16;
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // header
            Constraint::Length(banner_height), // persistent fetch errors
            Constraint::Min(0),                // body
            Constraint::Length(1),             // status line
            Constraint::Length(1),             // key hints
        ])
        .split(frame.area());

    render_header(frame, root[0], screen, throbber_state);
    render_banners(frame, root[1], &screen.banners);

    let body = root[2];
    match &screen.body {
        Body::Loading {
            entries_done,
            catalog_done,
        } => loading_view::render_loading(
            frame,
            body,
            *entries_done,
            *catalog_done,
            throbber_state,
        ),
        Body::Entries { rows, selected } => {
            entries_view::render_entries(frame, body, &screen.title, rows, *selected)
        }
        Body::Picker {
            prompt,
            rows,
            selected,
        } => picker_view::render_picker(frame, body, &screen.title, prompt, rows, *selected),
        Body::Form { fields } => form_view::render_form(frame, body, &screen.title, fields),
        Body::Confirm { lines } => dialogs::render_confirm(frame, &screen.title, lines),
        Body::Help { bindings } => dialogs::render_help(frame, body, bindings),
    }

    render_status(frame, root[3], screen.status.as_ref());
    render_hints(frame, root[4], &screen.hints);
}

fn render_header(
    frame: &mut Frame,
    area: Rect,
    screen: &Screen,
    throbber_state: &mut ThrobberState,
) {
    let row = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: 1,
    };
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(row);

    let throbber = throbber_widgets_tui::Throbber::default()
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if screen.header.refreshing {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    frame.render_stateful_widget(throbber, cols[0], throbber_state);

    let muted = Style::default().fg(Color::DarkGray);
    let line = Line::from(vec![
        Span::styled("Harvest", Style::default().fg(Color::Yellow)),
        Span::styled("  |  ", muted),
        Span::styled(screen.header.date.clone(), Style::default().fg(Color::White)),
        Span::styled("  |  total ", muted),
        Span::styled(
            screen.header.day_total.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  |  ", muted),
        Span::styled(screen.header.user.clone(), muted),
    ]);
    frame.render_widget(Paragraph::new(line), cols[1]);
}

fn render_banners(frame: &mut Frame, area: Rect, banners: &[String]) {
    let lines: Vec<Line> = banners
        .iter()
        .map(|b| {
            Line::from(Span::styled(
                format!(" ! {}", b),
                Style::default().fg(Color::Black).bg(Color::Red),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status(frame: &mut Frame, area: Rect, status: Option<&StatusView>) {
    let Some(status) = status else {
        return;
    };
    let color = match status.severity {
        Severity::Info => Color::White,
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", status.text),
            Style::default().fg(color),
        )),
        area,
    );
}

fn render_hints(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = vec![Span::raw(" ")];
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
