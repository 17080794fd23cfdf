mod actions;
mod commands;
mod event_loop;
mod messages;
mod update;
mod views;

pub use event_loop::run_app;
