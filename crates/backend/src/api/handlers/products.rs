use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use contracts::domain::product::{CreateProductDto, ProductDto, ProductQuery, UpdateProductDto};
use contracts::shared::paged::PagedResult;

use crate::api::error::ApiError;
use crate::domain::product;

/// GET /api/v1/products?pageNumber=&pageSize=&search=&supplierId=&minPrice=&maxPrice=&discontinued=&sortBy=&sortDir=
pub async fn list(
    Query(query): Query<ProductQuery>,
) -> Result<Json<PagedResult<ProductDto>>, ApiError> {
    let page = product::service::get_catalog(query).await?;
    Ok(Json(page))
}

/// GET /api/v1/products/:id
pub async fn get_by_id(Path(id): Path<i32>) -> Result<Json<ProductDto>, ApiError> {
    match product::service::get_by_id(id).await? {
        Some(dto) => Ok(Json(dto)),
        None => Err(ApiError::NotFound),
    }
}

/// POST /api/v1/products
pub async fn create(Json(dto): Json<CreateProductDto>) -> Result<impl IntoResponse, ApiError> {
    let created = product::service::create(dto).await?;
    let location = format!("/api/v1/products/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// PUT /api/v1/products/:id
pub async fn update(
    Path(id): Path<i32>,
    Json(dto): Json<UpdateProductDto>,
) -> Result<StatusCode, ApiError> {
    if product::service::update(id, dto).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// DELETE /api/v1/products/:id (admin only)
pub async fn delete(Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    if product::service::delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
