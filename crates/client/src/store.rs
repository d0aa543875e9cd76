//! Store facade
//!
//! Composes the query cache with the resource accessors. The store is
//! the only writer of cache state: reads go through `QueryCache::fetch`,
//! successful mutations apply their invalidation contract, and failed
//! mutations touch nothing.

use crate::api::{HttpPapersApi, HttpReviewsApi, PaperUpload, PapersApi, ReviewsApi};
use crate::cache::{Entity, QueryCache, QueryKey};
use crate::transport::ApiClient;
use srma_common::models::{
    CreateReview, Paper, PaperFilter, PaperPage, PaperPatch, Review, ReviewFilter, ReviewPage,
    UpdateReview,
};
use srma_common::{ApiError, ClientConfig, Result};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub struct Store {
    cache: QueryCache,
    reviews: Arc<dyn ReviewsApi>,
    papers: Arc<dyn PapersApi>,
}

impl Store {
    pub fn new(cache: QueryCache, reviews: Arc<dyn ReviewsApi>, papers: Arc<dyn PapersApi>) -> Self {
        Self {
            cache,
            reviews,
            papers,
        }
    }

    /// Build a store wired to the HTTP accessors.
    pub fn open(config: &ClientConfig) -> Result<Self> {
        let client = ApiClient::new(&config.api)?;
        Ok(Self::new(
            QueryCache::new(&config.cache),
            Arc::new(HttpReviewsApi::new(client.clone())),
            Arc::new(HttpPapersApi::new(client)),
        ))
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    // ---- reviews: reads ----

    pub async fn list_reviews(&self, filter: &ReviewFilter) -> Result<ReviewPage> {
        let key = QueryKey::list(Entity::Reviews, filter)?;
        self.cache.fetch(&key, || self.reviews.list(filter)).await
    }

    /// Last cached listing for these filters, fresh or stale, for
    /// rendering while a refetch is in flight.
    pub fn cached_reviews(&self, filter: &ReviewFilter) -> Option<ReviewPage> {
        let key = QueryKey::list(Entity::Reviews, filter).ok()?;
        self.cache.peek(&key)
    }

    /// Detail read with the enablement guard: no selection, no network
    /// call.
    pub async fn review_detail(&self, id: Option<Uuid>) -> Result<Option<Review>> {
        let Some(id) = id.filter(|id| !id.is_nil()) else {
            return Ok(None);
        };
        let key = QueryKey::detail(Entity::Reviews, id);
        self.cache.fetch(&key, || self.reviews.get(id)).await.map(Some)
    }

    // ---- reviews: mutations ----

    pub async fn create_review(&self, body: &CreateReview) -> Result<Review> {
        body.validate().map_err(ApiError::from)?;
        let review = self.reviews.create(body).await?;
        self.cache.invalidate(&QueryKey::root(Entity::Reviews));
        info!(review_id = %review.id, "review created");
        Ok(review)
    }

    pub async fn update_review(&self, id: Uuid, patch: &UpdateReview) -> Result<Review> {
        let review = self.reviews.update(id, patch).await?;
        // Lists go stale; the detail slot is refreshed from the mutation
        // response and stays servable without a refetch.
        self.cache.invalidate(&QueryKey::root(Entity::Reviews));
        self.cache.put(&QueryKey::detail(Entity::Reviews, id), &review)?;
        info!(review_id = %id, "review updated");
        Ok(review)
    }

    pub async fn delete_review(&self, id: Uuid) -> Result<()> {
        self.reviews.delete(id).await?;
        self.cache.invalidate(&QueryKey::root(Entity::Reviews));
        info!(review_id = %id, "review deleted");
        Ok(())
    }

    // ---- papers: reads ----

    pub async fn list_papers(&self, filter: &PaperFilter) -> Result<PaperPage> {
        let key = QueryKey::list(Entity::Papers, filter)?;
        self.cache.fetch(&key, || self.papers.list(filter)).await
    }

    /// Last cached listing for these filters, fresh or stale.
    pub fn cached_papers(&self, filter: &PaperFilter) -> Option<PaperPage> {
        let key = QueryKey::list(Entity::Papers, filter).ok()?;
        self.cache.peek(&key)
    }

    pub async fn paper_detail(&self, id: Option<Uuid>) -> Result<Option<Paper>> {
        let Some(id) = id.filter(|id| !id.is_nil()) else {
            return Ok(None);
        };
        let key = QueryKey::detail(Entity::Papers, id);
        self.cache.fetch(&key, || self.papers.get(id)).await.map(Some)
    }

    // ---- papers: mutations ----

    pub async fn upload_paper(&self, upload: PaperUpload) -> Result<Paper> {
        if upload.file_name.trim().is_empty() {
            return Err(ApiError::validation(
                "file name must not be empty",
                Some("file_name"),
            ));
        }
        let paper = self.papers.upload(upload).await?;
        self.cache.invalidate(&QueryKey::root(Entity::Papers));
        info!(paper_id = %paper.id, status = ?paper.status, "paper uploaded");
        Ok(paper)
    }

    pub async fn update_paper(&self, id: Uuid, patch: &PaperPatch) -> Result<Paper> {
        let paper = self.papers.update(id, patch).await?;
        self.cache.invalidate(&QueryKey::root(Entity::Papers));
        self.cache.put(&QueryKey::detail(Entity::Papers, id), &paper)?;
        info!(paper_id = %id, "paper updated");
        Ok(paper)
    }

    pub async fn delete_paper(&self, id: Uuid) -> Result<()> {
        self.papers.delete(id).await?;
        self.cache.invalidate(&QueryKey::root(Entity::Papers));
        info!(paper_id = %id, "paper deleted");
        Ok(())
    }
}
