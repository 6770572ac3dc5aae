use axum::Extension;

use crate::access::{collection_policies, AccessRequest, CollectionAccess, Principal};
use crate::config;
use crate::error::ApiError;
use crate::types::{Collection, Operation};

/// Resolve a collection slug from the path
pub fn resolve_collection(slug: &str) -> Result<Collection, ApiError> {
    slug.parse::<Collection>().map_err(ApiError::not_found)
}

/// Build the gate context from the optional principal extension
pub fn access_request(principal: &Option<Extension<Principal>>) -> AccessRequest<'_> {
    AccessRequest::new(principal.as_ref().map(|Extension(p)| p))
}

/// Run the collection gate, mapping a denial to 401 for anonymous callers and 403 otherwise
pub fn authorize(
    access: &CollectionAccess,
    operation: Operation,
    req: &AccessRequest<'_>,
) -> Result<(), ApiError> {
    if access.permits(operation, req) {
        return Ok(());
    }

    let caller = req.user.map(|u| u.id.as_str()).unwrap_or("anonymous");
    if config::config().security.enable_audit_logging {
        tracing::info!("Access denied: {} {} on {}", caller, operation.as_str(), access.collection);
    } else {
        tracing::debug!("Access denied: {} {} on {}", caller, operation.as_str(), access.collection);
    }

    if req.is_anonymous() {
        Err(ApiError::unauthorized("Sign in required"))
    } else {
        Err(ApiError::forbidden(format!(
            "Not allowed to {} {}",
            operation.as_str(),
            access.collection
        )))
    }
}

/// Policies for the collection named in the path
pub fn collection_access(slug: &str) -> Result<&'static CollectionAccess, ApiError> {
    resolve_collection(slug).map(collection_policies)
}
