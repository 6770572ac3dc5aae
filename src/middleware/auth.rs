use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::decode_jwt;
use crate::error::ApiError;

/// Attaches the caller's `Principal` to the request when a bearer token is present.
///
/// Requests without an Authorization header continue anonymously; access gates
/// downstream decide what an anonymous caller may do. A header that is present
/// but malformed or carries an invalid token is rejected with 401.
pub async fn principal_middleware(mut request: Request, next: Next) -> Result<Response, ApiError> {
    if let Some(token) = extract_jwt_from_headers(request.headers()).map_err(ApiError::unauthorized)? {
        let principal = decode_jwt(&token)?;
        tracing::debug!("Authenticated principal {} with roles {:?}", principal.id, principal.roles.labels());
        request.extensions_mut().insert(principal);
    }

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<Option<String>, String> {
    let Some(auth_header) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(Some(token.trim().to_string()))
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
