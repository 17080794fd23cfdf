use async_trait::async_trait;
use time::Date;

use crate::types::{EntryPatch, NewTimeEntry, Project, TaskAssignment, TimeEntry, User};

mod client;
mod dev_backend;
mod dto;
mod error;

pub use client::HarvestClient;
pub use dev_backend::DevBackend;
pub use error::ApiError;

/// Everything the workflow engine needs from the remote time-tracking service.
///
/// Implementations own their own timeouts; every call resolves to exactly one
/// success or one [`ApiError`].
#[async_trait]
pub trait TimeTrackingService: Send + Sync + 'static {
    /// Check the configured credentials and return the authenticated user.
    async fn validate_credentials(&self) -> Result<User, ApiError>;

    /// All of the current user's entries on `date`, across every page.
    async fn fetch_entries(&self, date: Date) -> Result<Vec<TimeEntry>, ApiError>;

    async fn fetch_projects(&self) -> Result<Vec<Project>, ApiError>;

    async fn fetch_task_assignments(&self) -> Result<Vec<TaskAssignment>, ApiError>;

    async fn create_entry(&self, entry: &NewTimeEntry) -> Result<TimeEntry, ApiError>;

    /// Partial update; unset fields in `patch` are left untouched.
    async fn update_entry(&self, id: u64, patch: &EntryPatch) -> Result<TimeEntry, ApiError>;

    async fn delete_entry(&self, id: u64) -> Result<(), ApiError>;

    /// Start (restart) the timer on an entry. The service stops any other running timer.
    async fn start_timer(&self, id: u64) -> Result<TimeEntry, ApiError>;

    async fn stop_timer(&self, id: u64) -> Result<TimeEntry, ApiError>;
}
