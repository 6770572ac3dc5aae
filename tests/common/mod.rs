#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use komodo_portal_api::access::Role;
use komodo_portal_api::auth::{generate_jwt, Claims};
use komodo_portal_api::config;
use komodo_portal_api::cms::{CmsError, DocumentStore, PaginatedDocs};
use komodo_portal_api::filter::{Pagination, QueryFilter};
use komodo_portal_api::server::{app, AppState};
use komodo_portal_api::types::Collection;

/// In-memory stand-in for the CMS that records what it was asked
#[derive(Default)]
pub struct MemoryStore {
    pub docs: Vec<Value>,
    pub finds: Mutex<Vec<(Collection, QueryFilter, Pagination)>>,
    pub creates: Mutex<Vec<(Collection, Value)>>,
}

impl MemoryStore {
    pub fn with_docs(docs: Vec<Value>) -> Self {
        Self {
            docs,
            ..Default::default()
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(
        &self,
        collection: Collection,
        filter: &QueryFilter,
        pagination: Pagination,
    ) -> Result<PaginatedDocs, CmsError> {
        self.finds
            .lock()
            .unwrap()
            .push((collection, filter.clone(), pagination));

        Ok(PaginatedDocs {
            docs: self.docs.clone(),
            total_docs: self.docs.len() as u64,
            limit: pagination.limit,
            page: pagination.page,
            total_pages: 1,
            has_next_page: false,
            has_prev_page: false,
        })
    }

    async fn create(&self, collection: Collection, data: Value) -> Result<Value, CmsError> {
        self.creates.lock().unwrap().push((collection, data.clone()));
        let mut doc = data;
        doc["id"] = json!(101);
        Ok(doc)
    }
}

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    router: axum::Router,
}

impl TestApp {
    pub fn new(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        let router = app(AppState { store: store.clone() });
        Self { store, router }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let payload = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, payload))
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        self.request("GET", uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Result<(StatusCode, Value)> {
        self.request("POST", uri, token, Some(body)).await
    }
}

/// Signed token for a principal holding `roles`
pub fn token_for(roles: &[Role]) -> String {
    let claims = Claims::new(
        "user-1".to_string(),
        Some("tester@example.com".to_string()),
        roles.iter().map(|r| r.as_str().to_string()).collect(),
    );
    generate_jwt(&claims).expect("dev secret configured")
}

/// Token signed with the configured secret over arbitrary claim JSON.
/// `exp` and `iat` are filled in when absent.
pub fn token_with_claims(mut claims: Value) -> String {
    let now = chrono::Utc::now().timestamp();
    if claims.get("exp").is_none() {
        claims["exp"] = json!(now + 600);
    }
    if claims.get("iat").is_none() {
        claims["iat"] = json!(now);
    }
    let key = jsonwebtoken::EncodingKey::from_secret(config::config().security.jwt_secret.as_bytes());
    jsonwebtoken::encode(&jsonwebtoken::Header::default(), &claims, &key).expect("claims encode")
}
