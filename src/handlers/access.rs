use axum::{extract::Path, Extension};
use serde::Serialize;

use crate::access::{collection_policies, AccessSummary, Principal};
use crate::middleware::{ApiResponse, ApiResult};
use crate::types::Collection;

use super::utils::{access_request, collection_access};

#[derive(Debug, Serialize)]
pub struct CallerAccess {
    pub user: Option<String>,
    pub roles: Vec<String>,
    pub collections: Vec<AccessSummary>,
}

/// GET /api/access - What the caller may do across all collections
pub async fn get_all(principal: Option<Extension<Principal>>) -> ApiResult<CallerAccess> {
    let req = access_request(&principal);

    let collections = Collection::ALL
        .into_iter()
        .map(|c| collection_policies(c).summary(&req))
        .collect();

    Ok(ApiResponse::success(CallerAccess {
        user: req.user.map(|u| u.id.clone()),
        roles: req.user.map(|u| u.roles.labels()).unwrap_or_default(),
        collections,
    }))
}

/// GET /api/access/:collection - What the caller may do with one collection
pub async fn get(
    Path(slug): Path<String>,
    principal: Option<Extension<Principal>>,
) -> ApiResult<AccessSummary> {
    let access = collection_access(&slug)?;
    let req = access_request(&principal);
    Ok(ApiResponse::success(access.summary(&req)))
}
