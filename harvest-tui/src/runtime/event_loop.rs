use crate::api::TimeTrackingService;
use crate::app::{screen, App};
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event as TermEvent, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use throbber_widgets_tui::ThrobberState;

use super::actions::dispatch;
use super::commands::{channel, Event};
use super::update::{start, update};

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    service: Arc<dyn TimeTrackingService>,
) -> Result<()> {
    let (message_tx, mut message_rx) = channel();
    let mut throbber_state = ThrobberState::default();

    dispatch(start(app), &service, &message_tx);

    loop {
        let screen = screen::describe(app);
        terminal.draw(|f| ui::render(f, &screen, &mut throbber_state))?;

        if app.is_loading() {
            throbber_state.calc_next();
        }

        if event::poll(Duration::from_millis(100))? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let commands = update(app, Event::Key(key));
                    dispatch(commands, &service, &message_tx);
                }
            }
        }

        while let Ok(message) = message_rx.try_recv() {
            let commands = update(app, Event::Message(message));
            dispatch(commands, &service, &message_tx);
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
