use chrono::{DateTime, Utc};
use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::Responder;
use rocket::{response, Response};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use thiserror::Error;

/// One hit from the upstream search call. Snippet data only; statistics
/// arrive separately and are joined by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSearchHit {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub published_at: DateTime<Utc>,
    pub channel_title: String,
}

/// Statistics and content details for one video, keyed by the same id as
/// its search hit. `duration` is the raw ISO8601 token from the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawVideoStats {
    pub id: String,
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    pub duration: String,
}

/// A fully scored video as returned to the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredVideo {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub published_at: DateTime<Utc>,
    pub channel_title: String,
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    /// Duration in seconds.
    pub video_length: i64,
    pub performance_score: i64,
}

/// One page of ranked results plus the upstream continuation token.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPage {
    pub videos: Vec<ScoredVideo>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Request-level failure taxonomy. Every request fails independently; none
/// of these abort the process.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required input was missing or blank. Reported to the caller,
    /// never retried.
    #[error("missing or blank required input: {0}")]
    Validation(String),
    /// The upstream data source failed (transport error or non-2xx). The
    /// caller decides retry policy.
    #[error("upstream request failed: {0}")]
    Upstream(String),
    /// A search hit had no matching detail record and the join-gap policy
    /// is set to fail the page.
    #[error("no detail record for video {0}")]
    JoinGap(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Upstream(e.to_string())
    }
}

impl ApiError {
    fn status(&self) -> Status {
        match self {
            ApiError::Validation(_) => Status::BadRequest,
            ApiError::Upstream(_) | ApiError::JoinGap(_) => Status::BadGateway,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "invalid request",
            ApiError::Upstream(_) => "upstream failure",
            ApiError::JoinGap(_) => "incomplete upstream data",
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let body = ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
        };
        let json = serde_json::to_string(&body).unwrap();
        Response::build()
            .status(self.status())
            .header(ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}
