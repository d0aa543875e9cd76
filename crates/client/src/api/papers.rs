//! Paper accessor

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use srma_common::models::{Paper, PaperFilter, PaperPage, PaperPatch};
use srma_common::Result;
use uuid::Uuid;

use crate::transport::ApiClient;

const PAPERS: &str = "/api/v1/papers";

/// A file to upload as a new paper. Processing happens out of band; the
/// created paper comes back in `pending` status.
#[derive(Debug, Clone)]
pub struct PaperUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// Attach the paper to a review inline, if known.
    pub review_id: Option<Uuid>,
}

/// Paper operations against `/api/v1/papers`
#[async_trait]
pub trait PapersApi: Send + Sync {
    async fn list(&self, filter: &PaperFilter) -> Result<PaperPage>;
    async fn get(&self, id: Uuid) -> Result<Paper>;
    async fn upload(&self, upload: PaperUpload) -> Result<Paper>;
    async fn update(&self, id: Uuid, body: &PaperPatch) -> Result<Paper>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// HTTP implementation backed by the shared transport client
pub struct HttpPapersApi {
    client: ApiClient,
}

impl HttpPapersApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PapersApi for HttpPapersApi {
    async fn list(&self, filter: &PaperFilter) -> Result<PaperPage> {
        self.client.get_query(PAPERS, filter).await
    }

    async fn get(&self, id: Uuid) -> Result<Paper> {
        self.client.get(&format!("{}/{}", PAPERS, id)).await
    }

    async fn upload(&self, upload: PaperUpload) -> Result<Paper> {
        let part = Part::bytes(upload.bytes).file_name(upload.file_name);
        let mut form = Form::new().part("file", part);
        if let Some(review_id) = upload.review_id {
            form = form.text("review_id", review_id.to_string());
        }
        self.client.post_multipart(PAPERS, form).await
    }

    async fn update(&self, id: Uuid, body: &PaperPatch) -> Result<Paper> {
        self.client.patch(&format!("{}/{}", PAPERS, id), body).await
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.client.delete(&format!("{}/{}", PAPERS, id)).await
    }
}
