use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use contracts::domain::order_item::{CreateOrderItemDto, OrderItemDto, UpdateOrderItemDto};
use contracts::shared::paged::PagedResult;

use crate::api::error::ApiError;
use crate::domain::order_item;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemListParams {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
    pub order_id: Option<i32>,
}

/// GET /api/v1/order-items?pageNumber=1&pageSize=20&orderId=5
pub async fn list(
    Query(params): Query<OrderItemListParams>,
) -> Result<Json<PagedResult<OrderItemDto>>, ApiError> {
    let page = order_item::service::list_paged(
        params.page_number.unwrap_or(0),
        params.page_size.unwrap_or(0),
        params.order_id,
    )
    .await?;
    Ok(Json(page))
}

/// GET /api/v1/order-items/:id
pub async fn get_by_id(Path(id): Path<i32>) -> Result<Json<OrderItemDto>, ApiError> {
    match order_item::service::get_by_id(id).await? {
        Some(dto) => Ok(Json(dto)),
        None => Err(ApiError::NotFound),
    }
}

/// POST /api/v1/order-items
pub async fn create(Json(dto): Json<CreateOrderItemDto>) -> Result<impl IntoResponse, ApiError> {
    let created = order_item::service::create(dto).await?;
    let location = format!("/api/v1/order-items/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// PUT /api/v1/order-items/:id
pub async fn update(
    Path(id): Path<i32>,
    Json(dto): Json<UpdateOrderItemDto>,
) -> Result<StatusCode, ApiError> {
    if order_item::service::update(id, dto).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// DELETE /api/v1/order-items/:id
pub async fn delete(Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    if order_item::service::delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
