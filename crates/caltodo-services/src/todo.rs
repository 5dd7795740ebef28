//! To-do resource client.
//!
//! One method per backend call against `/api/todos`. Every call is issued
//! exactly once: no retry, no batching, no idempotency key.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use crate::error::ServiceError;
use crate::http::{check_status, endpoint, handle_response, parse_base_url};

/// Wire format of dates in query strings and bodies.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A to-do item as held in a date bucket of the local cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: i64,
    pub text: String,
    pub done: bool,
}

/// A to-do item as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl TodoResponse {
    pub fn into_item(self) -> TodoItem {
        TodoItem {
            id: self.id,
            text: self.text,
            done: self.done,
        }
    }
}

impl From<TodoResponse> for TodoItem {
    fn from(r: TodoResponse) -> Self {
        r.into_item()
    }
}

/// Request to create a new to-do on a date.
#[derive(Debug, Clone, Serialize)]
pub struct TodoCreateRequest {
    pub text: String,
    pub date: NaiveDate,
}

/// Request to replace an item's text and done flag.
#[derive(Debug, Clone, Serialize)]
pub struct TodoUpdateRequest {
    pub text: String,
    pub done: bool,
}

/// HTTP client for the to-do resource.
#[derive(Debug, Clone)]
pub struct TodoClient {
    client: reqwest::Client,
    base_url: Url,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    /// Build a client sharing an existing connection pool.
    pub fn with_http_client(base_url: &str, client: reqwest::Client) -> Result<Self, ServiceError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// List the items of a single date.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_by_date(&self, date: NaiveDate) -> Result<Vec<TodoResponse>, ServiceError> {
        let mut url = endpoint(&self.base_url, "/api/todos")?;
        url.query_pairs_mut()
            .append_pair("date", &date.format(DATE_FORMAT).to_string());

        let response = self.client.get(url).send().await?;
        let todos: Vec<TodoResponse> = handle_response(response).await?;
        tracing::debug!("Fetched {} todos for {}", todos.len(), date);
        Ok(todos)
    }

    /// List the items of every date in `[from, to]`.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TodoResponse>, ServiceError> {
        let mut url = endpoint(&self.base_url, "/api/todos/range")?;
        url.query_pairs_mut()
            .append_pair("from", &from.format(DATE_FORMAT).to_string())
            .append_pair("to", &to.format(DATE_FORMAT).to_string());

        let response = self.client.get(url).send().await?;
        let todos: Vec<TodoResponse> = handle_response(response).await?;
        tracing::debug!("Fetched {} todos in {}..={}", todos.len(), from, to);
        Ok(todos)
    }

    #[instrument(skip(self), level = "info")]
    pub async fn create(&self, text: &str, date: NaiveDate) -> Result<TodoResponse, ServiceError> {
        let url = endpoint(&self.base_url, "/api/todos")?;
        let body = TodoCreateRequest {
            text: text.to_string(),
            date,
        };

        let response = self.client.post(url).json(&body).send().await?;
        handle_response(response).await
    }

    #[instrument(skip(self), level = "info")]
    pub async fn update(&self, id: i64, text: &str, done: bool) -> Result<TodoResponse, ServiceError> {
        let url = endpoint(&self.base_url, &format!("/api/todos/{}", id))?;
        let body = TodoUpdateRequest {
            text: text.to_string(),
            done,
        };

        let response = self.client.put(url).json(&body).send().await?;
        handle_response(response).await
    }

    #[instrument(skip(self), level = "info")]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let url = endpoint(&self.base_url, &format!("/api/todos/{}", id))?;

        let response = self.client.delete(url).send().await?;
        // 204 No Content on success
        check_status(response).await?;
        Ok(())
    }
}
