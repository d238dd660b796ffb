use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use contracts::domain::supplier::{CreateSupplierDto, SupplierDto, UpdateSupplierDto};
use contracts::shared::paged::PagedResult;

use super::PageParams;
use crate::api::error::ApiError;
use crate::domain::supplier;

/// GET /api/v1/suppliers?pageNumber=1&pageSize=10
pub async fn list(
    Query(params): Query<PageParams>,
) -> Result<Json<PagedResult<SupplierDto>>, ApiError> {
    let page = supplier::service::list_paged(params.page_number(), params.page_size()).await?;
    Ok(Json(page))
}

/// GET /api/v1/suppliers/:id
pub async fn get_by_id(Path(id): Path<i32>) -> Result<Json<SupplierDto>, ApiError> {
    match supplier::service::get_by_id(id).await? {
        Some(dto) => Ok(Json(dto)),
        None => Err(ApiError::NotFound),
    }
}

/// POST /api/v1/suppliers
pub async fn create(Json(dto): Json<CreateSupplierDto>) -> Result<impl IntoResponse, ApiError> {
    let created = supplier::service::create(dto).await?;
    let location = format!("/api/v1/suppliers/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// PUT /api/v1/suppliers/:id
pub async fn update(
    Path(id): Path<i32>,
    Json(dto): Json<UpdateSupplierDto>,
) -> Result<StatusCode, ApiError> {
    if supplier::service::update(id, dto).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// DELETE /api/v1/suppliers/:id
pub async fn delete(Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    if supplier::service::delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
