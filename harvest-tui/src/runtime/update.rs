use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

use crate::app::{App, View};
use crate::time_utils::{describe_date, format_hours};

use super::commands::{Command, Event, Message};
use super::messages::handle_message;
use super::views::handle_view_key;

pub const TICK_INTERVAL: Duration = Duration::from_secs(5);
/// Entries are re-fetched this often while any of them has a running timer.
pub const RUNNING_POLL_INTERVAL: Duration = Duration::from_secs(25);

/// Commands to issue once, when the engine starts in `Loading`.
pub fn start(app: &mut App) -> Vec<Command> {
    vec![
        request_entries(app),
        request_catalog(app),
        Command::Tick {
            after: TICK_INTERVAL,
        },
    ]
}

/// Apply one event to the state and return the commands it triggers.
pub fn update(app: &mut App, event: Event) -> Vec<Command> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Message(Message::Tick { at }) => handle_tick(app, at),
        Event::Message(message) => handle_message(app, message),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) -> Vec<Command> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        quit(app);
        return Vec::new();
    }
    if app.is_loading() {
        return Vec::new();
    }
    handle_view_key(key, app)
}

/// Quit, leaving a farewell line when leaving from the entry list.
pub(super) fn quit(app: &mut App) {
    if app.view == View::List {
        app.farewell = Some(format!(
            "Tracked {} on {}. Bye!",
            format_hours(app.day_total()),
            describe_date(app.focused_date)
        ));
    }
    app.quit();
}

fn handle_tick(app: &mut App, at: Instant) -> Vec<Command> {
    app.expire_status(at);

    let mut commands = vec![Command::Tick {
        after: TICK_INTERVAL,
    }];
    let poll_due = at.saturating_duration_since(app.last_entries_refresh) >= RUNNING_POLL_INTERVAL;
    if !app.is_loading() && !app.entries_loading && app.has_running_entry() && poll_due {
        tracing::debug!("polling entries for running timer");
        commands.push(request_entries(app));
    }
    commands
}

/// Issue a wholesale fetch of the focused date, superseding any fetch still in flight.
pub(super) fn request_entries(app: &mut App) -> Command {
    app.entries_request += 1;
    app.entries_loading = true;
    app.last_entries_refresh = Instant::now();
    Command::FetchEntries {
        date: app.focused_date,
        request_id: app.entries_request,
    }
}

pub(super) fn request_catalog(app: &mut App) -> Command {
    app.catalog_loading = true;
    Command::FetchCatalog
}
