use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use contracts::system::users::{ChangePasswordDto, CreateUserDto, UpdateUserDto, User};
use serde_json::json;

use crate::api::error::ApiError;
use crate::system::auth::extractor::CurrentUser;
use crate::system::users::service;

/// GET /api/v1/users (admin only)
pub async fn list() -> Result<Json<Vec<User>>, ApiError> {
    let users = service::list_all().await.map_err(ApiError::Internal)?;
    Ok(Json(users))
}

/// GET /api/v1/users/:id (admin only)
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<User>, ApiError> {
    match service::get_by_id(&id).await.map_err(ApiError::Internal)? {
        Some(user) => Ok(Json(user)),
        None => Err(ApiError::NotFound),
    }
}

/// POST /api/v1/users (admin only)
pub async fn create(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<CreateUserDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let user_id = service::create(dto, Some(claims.sub))
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok((StatusCode::CREATED, Json(json!({ "id": user_id }))))
}

/// PUT /api/v1/users/:id (admin only)
pub async fn update(
    Path(id): Path<String>,
    Json(mut dto): Json<UpdateUserDto>,
) -> Result<StatusCode, ApiError> {
    dto.id = id;
    if service::update(dto)
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// DELETE /api/v1/users/:id (admin only)
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    if service::delete(&id).await.map_err(ApiError::Internal)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// POST /api/v1/users/:id/change-password (self or admin)
pub async fn change_password(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(mut dto): Json<ChangePasswordDto>,
) -> Result<StatusCode, ApiError> {
    if id != claims.sub && !claims.is_admin {
        return Err(ApiError::Forbidden);
    }
    dto.user_id = id;

    // Admins reset without the old password; everyone else proves it
    service::change_password(dto, !claims.is_admin)
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(StatusCode::NO_CONTENT)
}
