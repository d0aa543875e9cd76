//! Review accessor

use async_trait::async_trait;
use srma_common::models::{CreateReview, Review, ReviewFilter, ReviewPage, UpdateReview};
use srma_common::Result;
use uuid::Uuid;

use crate::transport::ApiClient;

const REVIEWS: &str = "/api/v1/reviews";

/// Review operations against `/api/v1/reviews`
#[async_trait]
pub trait ReviewsApi: Send + Sync {
    async fn list(&self, filter: &ReviewFilter) -> Result<ReviewPage>;
    async fn get(&self, id: Uuid) -> Result<Review>;
    async fn create(&self, body: &CreateReview) -> Result<Review>;
    async fn update(&self, id: Uuid, body: &UpdateReview) -> Result<Review>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// HTTP implementation backed by the shared transport client
pub struct HttpReviewsApi {
    client: ApiClient,
}

impl HttpReviewsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReviewsApi for HttpReviewsApi {
    async fn list(&self, filter: &ReviewFilter) -> Result<ReviewPage> {
        self.client.get_query(REVIEWS, filter).await
    }

    async fn get(&self, id: Uuid) -> Result<Review> {
        self.client.get(&format!("{}/{}", REVIEWS, id)).await
    }

    async fn create(&self, body: &CreateReview) -> Result<Review> {
        self.client.post(REVIEWS, body).await
    }

    async fn update(&self, id: Uuid, body: &UpdateReview) -> Result<Review> {
        self.client.patch(&format!("{}/{}", REVIEWS, id), body).await
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.client.delete(&format!("{}/{}", REVIEWS, id)).await
    }
}
