use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, RETRY_AFTER},
    Client, RequestBuilder, Url,
};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::OnceLock;
use std::time::Duration;
use time::Date;

use crate::api::dto::{
    CreateTimeEntryRequest, Page, ProjectsPage, TaskAssignmentsPage, TimeEntriesPage,
    TimeEntryDto, UpdateTimeEntryRequest, UserDto,
};
use crate::api::{ApiError, TimeTrackingService};
use crate::config::HarvestConfig;
use crate::time_utils::format_date;
use crate::types::{EntryPatch, NewTimeEntry, Project, TaskAssignment, TimeEntry, User};

const ACCOUNT_HEADER: &str = "Harvest-Account-Id";
const PER_PAGE: &str = "100";

/// Harvest v2 REST client.
#[derive(Debug, Clone)]
pub struct HarvestClient {
    client: Client,
    base_url: Url,
    // Set once credentials are validated; scopes entry listing to the current user.
    user_id: OnceLock<u64>,
}

impl HarvestClient {
    pub fn new(config: &HarvestConfig) -> Result<Self> {
        let base_url = Url::parse(&format!("{}/", config.api_url.trim_end_matches('/')))
            .with_context(|| format!("Invalid API URL: {}", config.api_url))?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.access_token))
            .context("Access token contains invalid characters")?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCOUNT_HEADER,
            HeaderValue::from_str(&config.account_id)
                .context("Account id contains invalid characters")?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            user_id: OnceLock::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::NetworkOrTimeout(format!("bad URL for {}: {}", path, e)))
    }

    async fn send(&self, request: RequestBuilder, call_name: &str) -> Result<String, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!("{} failed: {}", call_name, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let body = response.text().await?;

        if !status.is_success() {
            let err = ApiError::from_status(status, retry_after, &body);
            tracing::warn!("{} returned {}: {}", call_name, status, err);
            return Err(err);
        }

        tracing::debug!("{} returned {}", call_name, status);
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T, ApiError> {
        let body = self.send(request, call_name).await?;
        serde_json::from_str(&body).map_err(|e| {
            ApiError::MalformedResponse(format!("failed to parse {} response: {}", call_name, e))
        })
    }

    /// Every item of a paginated listing.
    async fn get_all_pages<P>(
        &self,
        path: &str,
        query: &[(&str, String)],
        call_name: &str,
    ) -> Result<Vec<P::Item>, ApiError>
    where
        P: Page + DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        collect_pages(|page| {
            let request = self
                .client
                .get(url.clone())
                .query(query)
                .query(&[("per_page", PER_PAGE), ("page", page.to_string().as_str())]);
            async move { Ok(self.get_json::<P>(request, call_name).await?.into_parts()) }
        })
        .await
    }

    async fn entry_call(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<TimeEntry, ApiError> {
        let dto: TimeEntryDto = self.get_json(request, call_name).await?;
        TimeEntry::try_from(dto)
    }
}

fn wire_date(date: Date) -> Result<String, ApiError> {
    format_date(date)
        .map_err(|e| ApiError::MalformedResponse(format!("cannot format date {}: {}", date, e)))
}

/// Request pages from 1 on, following `next_page` while it moves forward.
async fn collect_pages<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, ApiError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<(Vec<T>, Option<u32>), ApiError>>,
{
    let mut items = Vec::new();
    let mut page = 1u32;

    loop {
        let (mut batch, next_page) = fetch_page(page).await?;
        items.append(&mut batch);

        match next_page {
            Some(next) if next > page => page = next,
            _ => break,
        }
    }

    Ok(items)
}

#[async_trait]
impl TimeTrackingService for HarvestClient {
    async fn validate_credentials(&self) -> Result<User, ApiError> {
        let dto: UserDto = self
            .get_json(
                self.client.get(self.endpoint("/v2/users/me")?),
                "GET /v2/users/me",
            )
            .await?;
        let _ = self.user_id.set(dto.id);
        Ok(dto.into())
    }

    async fn fetch_entries(&self, date: Date) -> Result<Vec<TimeEntry>, ApiError> {
        let day = wire_date(date)?;
        let mut query = vec![("from", day.clone()), ("to", day)];
        if let Some(user_id) = self.user_id.get() {
            query.push(("user_id", user_id.to_string()));
        }
        let dtos = self
            .get_all_pages::<TimeEntriesPage>("/v2/time_entries", &query, "GET /v2/time_entries")
            .await?;
        dtos.into_iter().map(TimeEntry::try_from).collect()
    }

    async fn fetch_projects(&self) -> Result<Vec<Project>, ApiError> {
        let dtos = self
            .get_all_pages::<ProjectsPage>(
                "/v2/projects",
                &[("is_active", "true".to_string())],
                "GET /v2/projects",
            )
            .await?;
        Ok(dtos.into_iter().map(Project::from).collect())
    }

    async fn fetch_task_assignments(&self) -> Result<Vec<TaskAssignment>, ApiError> {
        let dtos = self
            .get_all_pages::<TaskAssignmentsPage>(
                "/v2/task_assignments",
                &[("is_active", "true".to_string())],
                "GET /v2/task_assignments",
            )
            .await?;
        Ok(dtos
            .into_iter()
            .filter(|a| a.is_active)
            .map(TaskAssignment::from)
            .collect())
    }

    async fn create_entry(&self, entry: &NewTimeEntry) -> Result<TimeEntry, ApiError> {
        let body = CreateTimeEntryRequest {
            project_id: entry.project_id,
            task_id: entry.task_id,
            spent_date: wire_date(entry.spent_date)?,
            hours: entry.hours,
            notes: &entry.notes,
            billable: entry.billable,
        };
        self.entry_call(
            self.client
                .post(self.endpoint("/v2/time_entries")?)
                .json(&body),
            "POST /v2/time_entries",
        )
        .await
    }

    async fn update_entry(&self, id: u64, patch: &EntryPatch) -> Result<TimeEntry, ApiError> {
        let body = UpdateTimeEntryRequest {
            hours: patch.hours,
            notes: patch.notes.as_deref(),
            task_id: patch.task_id,
            billable: patch.billable,
        };
        self.entry_call(
            self.client
                .patch(self.endpoint(&format!("/v2/time_entries/{}", id))?)
                .json(&body),
            "PATCH /v2/time_entries/:id",
        )
        .await
    }

    async fn delete_entry(&self, id: u64) -> Result<(), ApiError> {
        self.send(
            self.client
                .delete(self.endpoint(&format!("/v2/time_entries/{}", id))?),
            "DELETE /v2/time_entries/:id",
        )
        .await
        .map(|_| ())
    }

    async fn start_timer(&self, id: u64) -> Result<TimeEntry, ApiError> {
        self.entry_call(
            self.client
                .patch(self.endpoint(&format!("/v2/time_entries/{}/restart", id))?),
            "PATCH /v2/time_entries/:id/restart",
        )
        .await
    }

    async fn stop_timer(&self, id: u64) -> Result<TimeEntry, ApiError> {
        self.entry_call(
            self.client
                .patch(self.endpoint(&format!("/v2/time_entries/{}/stop", id))?),
            "PATCH /v2/time_entries/:id/stop",
        )
        .await
    }
}
