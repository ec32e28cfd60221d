//! Fatwa API service layer

use std::sync::Arc;

use fatwa_common::error::Result;
use fatwa_common::models::{
    FatwaDetail, FatwaSummary, FeedbackRequest, ListQuery, ListResponse, TopicCount,
    TopicsResponse,
};
use tracing::{debug, info, instrument};

use crate::client::FatwaClient;

/// Service for handling fatwa API interactions.
#[derive(Clone)]
pub struct ApiService {
    client: Arc<FatwaClient>,
}

impl ApiService {
    /// Create new API service.
    pub fn new(client: Arc<FatwaClient>) -> Self {
        Self { client }
    }

    /// Fetch the summary list for the given query.
    ///
    /// A response without an `items` field decodes as an empty list.
    #[instrument(skip(self), fields(topic = ?query.topic, q = ?query.q))]
    pub async fn list_fatawa(&self, query: &ListQuery) -> Result<Vec<FatwaSummary>> {
        let response: ListResponse = self
            .client
            .get_json("/api/fatawa", &query.to_pairs())
            .await?;

        debug!(count = response.items.len(), "Fetched fatwa list");
        Ok(response.items)
    }

    /// Fetch the full record for one id.
    #[instrument(skip(self))]
    pub async fn get_fatwa(&self, id: i64) -> Result<FatwaDetail> {
        self.client
            .get_json(&format!("/api/fatawa/{id}"), &[])
            .await
    }

    /// Fetch the topic aggregates for the filter control.
    #[instrument(skip(self))]
    pub async fn topics(&self) -> Result<Vec<TopicCount>> {
        let response: TopicsResponse = self.client.get_json("/api/topics", &[]).await?;
        Ok(response.topics)
    }

    /// Post a feedback comment for a record.
    ///
    /// The comment is trimmed first; a whitespace-only comment is a silent
    /// no-op that issues no request. Returns whether a request was made.
    #[instrument(skip(self, comment))]
    pub async fn submit_feedback(&self, fatwa_id: i64, comment: &str) -> Result<bool> {
        let comment = comment.trim();
        if comment.is_empty() {
            debug!(fatwa_id, "Skipping empty feedback submission");
            return Ok(false);
        }

        let body = FeedbackRequest {
            fatwa_id,
            comment: comment.to_string(),
        };
        // Success body is unused beyond confirming the 2xx status.
        let _: serde_json::Value = self.client.post_json("/api/feedback", &body).await?;

        info!(fatwa_id, "Feedback submitted");
        Ok(true)
    }

    /// Post a feedback comment, then re-fetch the same record so the view
    /// reflects the server's state.
    ///
    /// No optimistic update: visibility of the new comment depends entirely
    /// on the server's read-after-write consistency. Returns `None` when the
    /// comment was empty and nothing was sent or fetched.
    #[instrument(skip(self, comment))]
    pub async fn submit_and_refresh(
        &self,
        fatwa_id: i64,
        comment: &str,
    ) -> Result<Option<FatwaDetail>> {
        if !self.submit_feedback(fatwa_id, comment).await? {
            return Ok(None);
        }

        let detail = self.get_fatwa(fatwa_id).await?;
        Ok(Some(detail))
    }
}
