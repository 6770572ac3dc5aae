use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::{CmsError, DocumentStore, PaginatedDocs};
use crate::config::CmsConfig;
use crate::filter::{Pagination, QueryFilter};
use crate::types::Collection;

/// HTTP client for the CMS REST API
#[derive(Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    base_url: Url,
    depth: u32,
}

impl CmsClient {
    pub fn new(config: &CmsConfig) -> Result<Self, CmsError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| CmsError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(&format!("users API-Key {}", key))
                .map_err(|_| CmsError::InvalidUrl("CMS API key contains invalid characters".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url,
            depth: config.depth,
        })
    }

    fn collection_url(&self, collection: Collection) -> Result<Url, CmsError> {
        self.base_url
            .join(&format!("api/{}", collection.slug()))
            .map_err(|e| CmsError::InvalidUrl(e.to_string()))
    }

    /// Query parameters for a find call
    pub fn find_params(&self, filter: &QueryFilter, pagination: Pagination) -> Vec<(String, String)> {
        let mut params = filter.to_query_pairs();
        params.push(("page".to_string(), pagination.page.to_string()));
        params.push(("limit".to_string(), pagination.limit.to_string()));
        params.push(("depth".to_string(), self.depth.to_string()));
        params
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, CmsError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CmsError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| CmsError::Decode(e.to_string()))
    }
}

#[async_trait]
impl DocumentStore for CmsClient {
    async fn find(
        &self,
        collection: Collection,
        filter: &QueryFilter,
        pagination: Pagination,
    ) -> Result<PaginatedDocs, CmsError> {
        let url = self.collection_url(collection)?;
        let params = self.find_params(filter, pagination);
        tracing::debug!("CMS find {} with {} params", url, params.len());

        let response = self.http.get(url).query(&params).send().await?;
        let body = Self::read_json(response).await?;

        serde_json::from_value(body).map_err(|e| CmsError::Decode(e.to_string()))
    }

    async fn create(&self, collection: Collection, data: Value) -> Result<Value, CmsError> {
        let url = self.collection_url(collection)?;
        tracing::debug!("CMS create in {}", url);

        let response = self.http.post(url).json(&data).send().await?;
        let mut body = Self::read_json(response).await?;

        // The CMS wraps created documents as { "doc": {...}, "message": "..." }
        match body.get_mut("doc").map(Value::take) {
            Some(doc) => Ok(doc),
            None => Err(CmsError::Decode("missing 'doc' in create response".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> CmsConfig {
        CmsConfig {
            base_url: base_url.to_string(),
            api_key: Some("abc123".to_string()),
            timeout_secs: 5,
            depth: 0,
        }
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(CmsClient::new(&config("not a url")), Err(CmsError::InvalidUrl(_))));
    }

    #[test]
    fn collection_url_joins_api_path() {
        let client = CmsClient::new(&config("http://cms.local:3001/")).unwrap();
        let url = client.collection_url(Collection::Reports).unwrap();
        assert_eq!(url.as_str(), "http://cms.local:3001/api/reports");
    }

    #[test]
    fn find_params_append_pagination() {
        let client = CmsClient::new(&config("http://cms.local")).unwrap();
        let params = client.find_params(
            &QueryFilter::not_equals("status", "CLOSED"),
            Pagination { page: 2, limit: 20 },
        );
        assert_eq!(
            params,
            vec![
                ("where[status][not_equals]".to_string(), "CLOSED".to_string()),
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "20".to_string()),
                ("depth".to_string(), "0".to_string()),
            ]
        );
    }
}
