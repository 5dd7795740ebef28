//! Schedule summary client.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use crate::error::ServiceError;
use crate::http::{endpoint, handle_response, parse_base_url};
use crate::todo::DATE_FORMAT;

/// A cached item sent along with a summary request.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryTodo {
    pub id: String,
    pub text: String,
    pub done: bool,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryRequest {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub todos: Vec<SummaryTodo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub title: Option<String>,
    pub one_line: Option<String>,
    pub bullets: Option<String>,
    pub risk_note: Option<String>,
    pub free_text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SummaryClient {
    client: reqwest::Client,
    base_url: Url,
}

impl SummaryClient {
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    pub fn with_http_client(base_url: &str, client: reqwest::Client) -> Result<Self, ServiceError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Summarize `[from, to]`, handing the backend the items the client holds.
    #[instrument(skip(self, request), level = "info", fields(from = %request.from, to = %request.to))]
    pub async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResponse, ServiceError> {
        let url = endpoint(&self.base_url, "/api/summary")?;
        let response = self.client.post(url).json(request).send().await?;
        handle_response(response).await
    }

    /// Summarize `[from, to]` from the backend's own data.
    #[instrument(skip(self), level = "info")]
    pub async fn summarize_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<SummaryResponse, ServiceError> {
        let mut url = endpoint(&self.base_url, "/api/summary/range")?;
        url.query_pairs_mut()
            .append_pair("from", &from.format(DATE_FORMAT).to_string())
            .append_pair("to", &to.format(DATE_FORMAT).to_string());

        let response = self.client.get(url).send().await?;
        handle_response(response).await
    }
}
