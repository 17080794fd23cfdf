use crossterm::event::KeyEvent;
use std::time::{Duration, Instant};
use time::Date;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::ApiError;
use crate::types::{EntryPatch, NewTimeEntry, ProjectWithTasks, TimeEntry};

/// Side effects requested by the engine. Each one produces exactly one [`Message`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchEntries { date: Date, request_id: u64 },
    FetchCatalog,
    CreateEntry(NewTimeEntry),
    UpdateEntry { id: u64, patch: EntryPatch },
    DeleteEntry { id: u64 },
    StartTimer { id: u64 },
    StopTimer { id: u64 },
    Tick { after: Duration },
}

/// Completion of a [`Command`], fed back into the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    EntriesFetched {
        date: Date,
        request_id: u64,
        result: Result<Vec<TimeEntry>, ApiError>,
    },
    CatalogFetched(Result<Vec<ProjectWithTasks>, ApiError>),
    EntryCreated(Result<TimeEntry, ApiError>),
    EntryUpdated {
        id: u64,
        result: Result<TimeEntry, ApiError>,
    },
    EntryDeleted {
        id: u64,
        result: Result<(), ApiError>,
    },
    TimerStarted {
        id: u64,
        result: Result<TimeEntry, ApiError>,
    },
    TimerStopped {
        id: u64,
        result: Result<TimeEntry, ApiError>,
    },
    Tick {
        at: Instant,
    },
}

/// Everything the engine reacts to, one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Key(KeyEvent),
    Message(Message),
}

pub type MessageTx = UnboundedSender<Message>;
pub type MessageRx = UnboundedReceiver<Message>;

pub fn channel() -> (MessageTx, MessageRx) {
    mpsc::unbounded_channel()
}
