use axum::{extract::Json, http::StatusCode};
use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo,
};
use contracts::system::users::User;

use crate::api::error::ApiError;
use crate::system::auth::extractor::CurrentUser;
use crate::system::auth::{jwt, refresh_tokens, scopes};
use crate::system::users::service as user_service;

fn user_info(user: User) -> UserInfo {
    UserInfo {
        id: user.id,
        username: user.username,
        full_name: user.full_name,
        email: user.email,
        is_admin: user.is_admin,
    }
}

async fn issue_access_token(user: &User) -> Result<String, ApiError> {
    let scope = scopes::scopes_for(user.is_admin);
    jwt::generate_access_token(&user.id, &user.username, user.is_admin, &scope)
        .await
        .map_err(ApiError::Internal)
}

/// POST /api/v1/auth/login
pub async fn login(Json(request): Json<LoginRequest>) -> Result<Json<LoginResponse>, ApiError> {
    let user = user_service::verify_credentials(&request.username, &request.password)
        .await
        .map_err(ApiError::Internal)?
        .ok_or(ApiError::Unauthorized)?;

    let access_token = issue_access_token(&user).await?;

    let refresh_token = jwt::generate_refresh_token();
    refresh_tokens::issue(
        &user.id,
        &refresh_token,
        jwt::calculate_refresh_token_expiration(),
    )
    .await
    .map_err(|e| ApiError::Internal(e.into()))?;

    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
        user: user_info(user),
    }))
}

/// POST /api/v1/auth/refresh
pub async fn refresh(
    Json(request): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let user_id = refresh_tokens::find_live_user_id(&request.refresh_token)
        .await
        .map_err(|e| ApiError::Internal(e.into()))?
        .ok_or(ApiError::Unauthorized)?;

    let user = user_service::get_by_id(&user_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or(ApiError::Unauthorized)?;

    let access_token = issue_access_token(&user).await?;

    Ok(Json(RefreshResponse { access_token }))
}

/// POST /api/v1/auth/logout
pub async fn logout(Json(request): Json<RefreshRequest>) -> Result<StatusCode, ApiError> {
    refresh_tokens::revoke(&request.refresh_token)
        .await
        .map_err(|e| ApiError::Internal(e.into()))?;

    Ok(StatusCode::OK)
}

/// GET /api/v1/auth/me (protected by middleware)
pub async fn current_user(CurrentUser(claims): CurrentUser) -> Result<Json<UserInfo>, ApiError> {
    let user = user_service::get_by_id(&claims.sub)
        .await
        .map_err(ApiError::Internal)?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(user_info(user)))
}
