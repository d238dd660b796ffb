use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use contracts::domain::customer::{
    CreateCustomerDto, CustomerDto, CustomerWithOrdersDto, UpdateCustomerDto,
};
use contracts::shared::paged::PagedResult;

use super::PageParams;
use crate::api::error::ApiError;
use crate::domain::customer;

/// GET /api/v1/customers?pageNumber=1&pageSize=10
pub async fn list(
    Query(params): Query<PageParams>,
) -> Result<Json<PagedResult<CustomerDto>>, ApiError> {
    let page = customer::service::list_paged(params.page_number(), params.page_size()).await?;
    Ok(Json(page))
}

/// GET /api/v1/customers/:id
pub async fn get_by_id(Path(id): Path<i32>) -> Result<Json<CustomerDto>, ApiError> {
    match customer::service::get_by_id(id).await? {
        Some(dto) => Ok(Json(dto)),
        None => Err(ApiError::NotFound),
    }
}

/// GET /api/v1/customers/:id/orders
pub async fn get_with_orders(Path(id): Path<i32>) -> Result<Json<CustomerWithOrdersDto>, ApiError> {
    match customer::service::get_with_orders(id).await? {
        Some(dto) => Ok(Json(dto)),
        None => Err(ApiError::NotFound),
    }
}

/// POST /api/v1/customers
pub async fn create(Json(dto): Json<CreateCustomerDto>) -> Result<impl IntoResponse, ApiError> {
    let created = customer::service::create(dto).await?;
    let location = format!("/api/v1/customers/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// PUT /api/v1/customers/:id
pub async fn update(
    Path(id): Path<i32>,
    Json(dto): Json<UpdateCustomerDto>,
) -> Result<StatusCode, ApiError> {
    if customer::service::update(id, dto).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// DELETE /api/v1/customers/:id
pub async fn delete(Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    if customer::service::delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
