pub mod s3;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub use s3::S3Store;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("access denied: {message}")]
    AccessDenied { message: String },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("object store error: {0}")]
    Other(String),
}

/// One page of a prefix listing. Absence of `next_continuation` marks the
/// final page.
#[derive(Debug, Clone)]
pub struct ListPage {
    pub keys: Vec<String>,
    pub next_continuation: Option<String>,
}

/// Minimal object-store surface the pipeline needs: paginated listing and
/// whole-object retrieval. Implemented by [`S3Store`] for production and by
/// in-memory stores in tests.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn list_page(
        &self,
        prefix: &str,
        continuation: Option<String>,
    ) -> Result<ListPage, StoreError>;

    async fn get(&self, key: &str) -> Result<Bytes, StoreError>;
}
