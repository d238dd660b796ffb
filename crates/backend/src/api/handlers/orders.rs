use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use contracts::domain::order::{CreateOrderDto, OrderDto, OrderWithItemsDto, UpdateOrderDto};
use contracts::shared::paged::PagedResult;

use super::PageParams;
use crate::api::error::ApiError;
use crate::domain::order;

/// GET /api/v1/orders?pageNumber=1&pageSize=10
pub async fn list(Query(params): Query<PageParams>) -> Result<Json<PagedResult<OrderDto>>, ApiError> {
    let page = order::service::list_paged(params.page_number(), params.page_size()).await?;
    Ok(Json(page))
}

/// GET /api/v1/orders/:id
pub async fn get_by_id(Path(id): Path<i32>) -> Result<Json<OrderDto>, ApiError> {
    match order::service::get_by_id(id).await? {
        Some(dto) => Ok(Json(dto)),
        None => Err(ApiError::NotFound),
    }
}

/// GET /api/v1/orders/:id/items
pub async fn get_with_items(Path(id): Path<i32>) -> Result<Json<OrderWithItemsDto>, ApiError> {
    match order::service::get_with_items(id).await? {
        Some(dto) => Ok(Json(dto)),
        None => Err(ApiError::NotFound),
    }
}

/// POST /api/v1/orders
pub async fn create(Json(dto): Json<CreateOrderDto>) -> Result<impl IntoResponse, ApiError> {
    let created = order::service::create(dto).await?;
    let location = format!("/api/v1/orders/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// PUT /api/v1/orders/:id
pub async fn update(
    Path(id): Path<i32>,
    Json(dto): Json<UpdateOrderDto>,
) -> Result<StatusCode, ApiError> {
    if order::service::update(id, dto).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// DELETE /api/v1/orders/:id
pub async fn delete(Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    if order::service::delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
