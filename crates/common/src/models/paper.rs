//! Paper entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ingestion state of a paper. Server-managed; not user-editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperStatus {
    Pending,
    Processing,
    Ready,
    Error,
}

/// Screening decision recorded by a human reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreeningLabel {
    Include,
    Exclude,
    Maybe,
}

/// A document attached (or not yet attached) to a review.
///
/// A null `review_id` means unattached. The backend cascades review
/// deletion, so a paper whose review disappears comes back orphaned on
/// the next fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub id: Uuid,
    pub review_id: Option<Uuid>,
    pub title: Option<String>,

    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,

    pub authors: Option<serde_json::Value>,
    pub year: Option<i32>,
    pub doi: Option<String>,
    pub status: PaperStatus,
    pub screening_label: Option<ScreeningLabel>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Paginated listing as returned by `GET /api/v1/papers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperPage {
    pub papers: Vec<Paper>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

/// Partial body for `PATCH /api/v1/papers/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaperPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screening_label: Option<ScreeningLabel>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaperStatus>,
}

/// Listing filters. Unset filters are omitted from the query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaperFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}
