//! Review entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Lifecycle status of a review. Drives phase derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Draft,
    Active,
    Completed,
    Archived,
}

/// A systematic-review project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Paginated listing as returned by `GET /api/v1/reviews`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewPage {
    pub reviews: Vec<Review>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

/// Body for `POST /api/v1/reviews`. The server assigns id, timestamps,
/// and the initial `draft` status.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReview {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial body for `PATCH /api/v1/reviews/{id}`. Unset fields are
/// omitted from the request so the server leaves them unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateReview {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReviewStatus>,
}

/// Listing filters. Unset filters are omitted from the query string
/// rather than sent as null or empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        let json = serde_json::to_string(&ReviewStatus::Draft).unwrap();
        assert_eq!(json, "\"draft\"");
        let status: ReviewStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(status, ReviewStatus::Archived);
    }

    #[test]
    fn test_unknown_status_is_a_decode_error() {
        let result = serde_json::from_str::<ReviewStatus>("\"paused\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_update_omits_unset_fields() {
        let patch = UpdateReview {
            status: Some(ReviewStatus::Active),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "active" }));
    }

    #[test]
    fn test_empty_filter_serializes_to_nothing() {
        let json = serde_json::to_value(ReviewFilter::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
