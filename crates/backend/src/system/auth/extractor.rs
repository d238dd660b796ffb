use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use contracts::system::auth::TokenClaims;

/// Claims of the authenticated caller, placed in the request
/// extensions by the auth middleware. Rejects with 401 on routes that
/// were not wrapped in one of the auth layers.
pub struct CurrentUser(pub TokenClaims);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<TokenClaims>()
            .ok_or(StatusCode::UNAUTHORIZED)?;
        Ok(CurrentUser(claims.clone()))
    }
}
