pub mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::filter::{Pagination, QueryFilter};
use crate::types::Collection;

pub use client::CmsClient;

/// Errors from talking to the CMS
#[derive(Debug, Error)]
pub enum CmsError {
    #[error("Invalid CMS URL: {0}")]
    InvalidUrl(String),

    #[error("CMS request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("CMS returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Unexpected CMS response: {0}")]
    Decode(String),
}

/// One page of documents as returned by the CMS find endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedDocs {
    pub docs: Vec<Value>,
    pub total_docs: u64,
    pub limit: u32,
    pub page: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_prev_page: bool,
}

/// External document store the handlers forward to
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(
        &self,
        collection: Collection,
        filter: &QueryFilter,
        pagination: Pagination,
    ) -> Result<PaginatedDocs, CmsError>;

    async fn create(&self, collection: Collection, data: Value) -> Result<Value, CmsError>;
}
