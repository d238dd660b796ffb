use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use contracts::system::auth::TokenClaims;

use super::scopes;

/// Pull the bearer token out of the request and validate it.
async fn authenticate(req: &Request<Body>) -> Result<TokenClaims, StatusCode> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    super::jwt::validate_token(token)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)
}

/// Middleware that requires valid JWT authentication
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let claims = authenticate(&req).await?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Middleware that requires admin privileges
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let claims = authenticate(&req).await?;
    if !claims.is_admin {
        return Err(StatusCode::FORBIDDEN);
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Middleware that requires a specific scope grant
async fn require_scope(
    mut req: Request<Body>,
    next: Next,
    scope: &'static str,
) -> Result<Response, StatusCode> {
    let claims = authenticate(&req).await?;
    if !claims.has_scope(scope) {
        return Err(StatusCode::FORBIDDEN);
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Scope grant OR the admin role, for mixed write policies
async fn require_scope_or_admin(
    mut req: Request<Body>,
    next: Next,
    scope: &'static str,
) -> Result<Response, StatusCode> {
    let claims = authenticate(&req).await?;
    if !claims.has_scope(scope) && !claims.is_admin {
        return Err(StatusCode::FORBIDDEN);
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

// Per-resource policies referenced from routes.rs.

pub async fn customers_read(req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    require_scope(req, next, scopes::CUSTOMERS_READ).await
}

pub async fn customers_write(req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    require_scope(req, next, scopes::CUSTOMERS_WRITE).await
}

pub async fn orders_read(req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    require_scope(req, next, scopes::ORDERS_READ).await
}

pub async fn orders_write(req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    require_scope(req, next, scopes::ORDERS_WRITE).await
}

pub async fn order_items_read(req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    require_scope(req, next, scopes::ORDER_ITEMS_READ).await
}

pub async fn order_items_write(req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    require_scope(req, next, scopes::ORDER_ITEMS_WRITE).await
}

pub async fn products_read(req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    require_scope(req, next, scopes::PRODUCTS_READ).await
}

/// Products are writable with the write scope or by an admin
pub async fn products_write(req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    require_scope_or_admin(req, next, scopes::PRODUCTS_WRITE).await
}
