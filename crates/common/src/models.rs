//! Data models for the fatwa browser
//!
//! These mirror the JSON shapes served by the remote API: summary rows for
//! the list view, the full record for the detail view, topic aggregates for
//! the filter, and the feedback submission body. Nothing here is owned or
//! mutated client-side; records are fetched on demand and replaced wholesale
//! on the next fetch.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Placeholder shown when a record carries no title.
pub const UNTITLED: &str = "(untitled)";

/// Default number of rows requested from the list endpoint.
pub const DEFAULT_LIST_LIMIT: u32 = 80;

/// A summary row as returned by `GET /api/fatawa`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatwaSummary {
    /// Record id, unique server-side.
    pub id: i64,
    /// Title; may be absent or empty, rendered as a placeholder.
    #[serde(default)]
    pub title: Option<String>,
    /// Topic the record is filed under.
    pub topic: String,
    /// Source URL, present in list rows but unused by the list label.
    #[serde(default)]
    pub url: Option<String>,
    /// Short question summary, present in list rows but unused by the label.
    #[serde(default)]
    pub question_summary: Option<String>,
}

impl FatwaSummary {
    /// Title for display, falling back to the untitled placeholder.
    pub fn display_title(&self) -> &str {
        display_title(self.title.as_deref())
    }

    /// The `topic | #id` meta line shown under each list entry.
    pub fn meta_line(&self) -> String {
        format!("{} | #{}", self.topic, self.id)
    }
}

/// The full record as returned by `GET /api/fatawa/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatwaDetail {
    /// Record id.
    pub id: i64,
    /// Title; may be absent.
    #[serde(default)]
    pub title: Option<String>,
    /// Topic the record is filed under.
    pub topic: String,
    /// Jurisprudential school, if known.
    #[serde(default)]
    pub madhhab: Option<String>,
    /// External source link.
    #[serde(default)]
    pub url: Option<String>,
    /// Summarized question text.
    #[serde(default)]
    pub question_summary: Option<String>,
    /// Draft ruling text.
    #[serde(default)]
    pub draft_fatwa_text: Option<String>,
    /// Serialized JSON array of reference strings, parsed defensively.
    #[serde(default)]
    pub quran_references_json: Option<String>,
    /// Feedback comments, newest first as the server orders them.
    #[serde(default)]
    pub feedback: Vec<Feedback>,
}

impl FatwaDetail {
    /// Title for display, falling back to the untitled placeholder.
    pub fn display_title(&self) -> &str {
        display_title(self.title.as_deref())
    }

    /// Madhhab for display, falling back to "unknown madhhab".
    pub fn display_madhhab(&self) -> &str {
        match self.madhhab.as_deref() {
            Some(m) if !m.is_empty() => m,
            _ => "unknown madhhab",
        }
    }

    /// Decoded Quran references. Malformed or missing JSON yields an empty
    /// list, never an error.
    pub fn quran_references(&self) -> Vec<String> {
        parse_or_default(self.quran_references_json.as_deref())
    }
}

/// One feedback comment attached to a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    /// Server-assigned id, if present in the payload.
    #[serde(default)]
    pub id: Option<i64>,
    /// The comment text.
    pub comment: String,
    /// Submission time as a unix timestamp, if present.
    #[serde(default)]
    pub created_at_unix: Option<i64>,
}

/// A topic name paired with the number of records under it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicCount {
    /// Topic name.
    pub topic: String,
    /// Number of records filed under the topic.
    pub count: u64,
}

impl TopicCount {
    /// The `topic (count)` label shown in the filter control.
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.topic, self.count)
    }
}

/// Envelope for `GET /api/fatawa`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListResponse {
    /// Summary rows; defaults to empty when the field is missing.
    #[serde(default)]
    pub items: Vec<FatwaSummary>,
    /// Total matching rows, if the server reports it.
    #[serde(default)]
    pub total: Option<u64>,
}

/// Envelope for `GET /api/topics`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicsResponse {
    /// Topic aggregates; defaults to empty when the field is missing.
    #[serde(default)]
    pub topics: Vec<TopicCount>,
}

/// Body for `POST /api/feedback`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    /// Record the comment belongs to.
    pub fatwa_id: i64,
    /// Trimmed comment text.
    pub comment: String,
}

/// Query parameters for the list endpoint.
///
/// Rebuilt from current control state on every trigger; there is no state
/// carried between queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Selected topic, omitted from the query string when `None`.
    pub topic: Option<String>,
    /// Trimmed search text, omitted when `None`.
    pub q: Option<String>,
    /// Row limit, always present.
    pub limit: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            topic: None,
            q: None,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl ListQuery {
    /// Build a query from the current topic selection and raw search text.
    ///
    /// Empty topic and whitespace-only search collapse to `None` so the
    /// corresponding parameters are left out of the request entirely.
    pub fn new(topic: Option<&str>, search: &str, limit: u32) -> Self {
        let topic = topic
            .map(str::to_string)
            .filter(|t| !t.is_empty());
        let trimmed = search.trim();
        let q = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        Self { topic, q, limit }
    }

    /// Key/value pairs in query-string order: `topic`, `q`, then `limit`.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(topic) = &self.topic {
            pairs.push(("topic", topic.clone()));
        }
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }
}

/// Decode a serialized JSON value, falling back to the type's default on
/// malformed or missing input.
///
/// This is the deliberate leniency policy for fields like
/// `quran_references_json`: bad data from the server renders as empty rather
/// than failing the whole detail view.
pub fn parse_or_default<T>(raw: Option<&str>) -> T
where
    T: DeserializeOwned + Default,
{
    match raw {
        Some(text) if !text.is_empty() => serde_json::from_str(text).unwrap_or_default(),
        _ => T::default(),
    }
}

fn display_title(title: Option<&str>) -> &str {
    match title {
        Some(t) if !t.is_empty() => t,
        _ => UNTITLED,
    }
}
