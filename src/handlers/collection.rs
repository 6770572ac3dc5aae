use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::access::Principal;
use crate::cms::PaginatedDocs;
use crate::config;
use crate::error::ApiError;
use crate::filter::{ListParams, ListingConfig, Pagination, Status};
use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;
use crate::types::Operation;

use super::utils::{access_request, authorize, collection_access};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Free-text search across the listing's text fields
    pub q: Option<String>,
    pub category: Option<String>,
    /// Status to exclude
    pub status: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    pub fn params(&self) -> ListParams {
        let status = self.status.as_deref().and_then(|s| match s.parse::<Status>() {
            Ok(status) => Some(status),
            Err(e) => {
                tracing::debug!("Ignoring status parameter: {}", e);
                None
            }
        });

        ListParams {
            query: self.q.clone(),
            category: self.category.clone(),
            status,
        }
    }
}

/// GET /api/:collection - List or search records
pub async fn get(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ListQuery>,
    principal: Option<Extension<Principal>>,
) -> ApiResult<PaginatedDocs> {
    let access = collection_access(&slug)?;
    let listing = ListingConfig::for_collection(access.collection)
        .ok_or_else(|| ApiError::not_found(format!("No listing for collection '{}'", slug)))?;

    let req = access_request(&principal);
    authorize(access, Operation::Read, &req)?;

    let filter = listing.build_filter(&query.params());
    let pagination = Pagination::from_params(
        query.page.as_deref(),
        query.limit.as_deref(),
        &config::config().filter,
    );

    let mut page = state.store.find(access.collection, &filter, pagination).await?;
    for doc in page.docs.iter_mut() {
        access.redact(doc, &req);
    }

    Ok(ApiResponse::success(page))
}

/// POST /api/:collection - Create a record
pub async fn post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    principal: Option<Extension<Principal>>,
    Json(mut payload): Json<Value>,
) -> ApiResult<Value> {
    let access = collection_access(&slug)?;
    let req = access_request(&principal);
    authorize(access, Operation::Create, &req)?;

    if !payload.is_object() {
        return Err(ApiError::invalid_json("Request body must be a JSON object"));
    }

    let dropped = access.strip_unwritable(&mut payload, &req);
    if !dropped.is_empty() {
        tracing::debug!("Dropped restricted fields {:?} from {} create", dropped, access.collection);
    }

    let mut created = state.store.create(access.collection, payload).await?;
    access.redact(&mut created, &req);

    Ok(ApiResponse::created(created))
}
