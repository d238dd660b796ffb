use std::collections::HashMap;

use chrono::Utc;
use contracts::domain::order::{CreateOrderDto, OrderDto, OrderWithItemsDto, UpdateOrderDto};
use contracts::shared::paged::PagedResult;
use sea_orm::Set;

use super::repository::{self, ActiveModel, Model};
use crate::domain::customer::repository as customer_repository;
use crate::domain::order_item::repository as order_item_repository;
use crate::domain::order_item::service::order_item_to_dto;
use crate::domain::product::repository as product_repository;
use crate::shared::error::{ServiceError, ServiceResult};

const DEFAULT_PAGE_SIZE: i64 = 10;

pub async fn list_paged(page_number: i64, page_size: i64) -> ServiceResult<PagedResult<OrderDto>> {
    let page_number = if page_number <= 0 { 1 } else { page_number } as u64;
    let page_size = if page_size <= 0 { DEFAULT_PAGE_SIZE } else { page_size } as u64;

    let total = repository::count_all().await?;
    let models = repository::find_page(page_size, (page_number - 1) * page_size).await?;
    let items = with_customer_names(models).await?;

    Ok(PagedResult::new(items, page_number, page_size, total))
}

pub async fn get_by_id(id: i32) -> ServiceResult<Option<OrderDto>> {
    let Some(model) = repository::get_by_id(id).await? else {
        return Ok(None);
    };
    let customer_name = customer_repository::get_by_id(model.customer_id)
        .await?
        .map(|c| format!("{} {}", c.first_name, c.last_name));
    Ok(Some(order_to_dto(model, customer_name)))
}

/// Order with its items in insertion order, each joined to its product
/// name. Names are resolved at read time so renames show up immediately.
pub async fn get_with_items(id: i32) -> ServiceResult<Option<OrderWithItemsDto>> {
    let Some(order) = repository::get_by_id(id).await? else {
        return Ok(None);
    };

    let customer_name = customer_repository::get_by_id(order.customer_id)
        .await?
        .map(|c| format!("{} {}", c.first_name, c.last_name));

    let item_models = order_item_repository::find_by_order(id).await?;

    let mut product_ids: Vec<i32> = item_models.iter().map(|i| i.product_id).collect();
    product_ids.sort_unstable();
    product_ids.dedup();
    let product_names: HashMap<i32, String> = product_repository::find_by_ids(product_ids)
        .await?
        .into_iter()
        .map(|p| (p.id, p.product_name))
        .collect();

    let items = item_models
        .into_iter()
        .map(|i| {
            let product_name = product_names.get(&i.product_id).cloned();
            order_item_to_dto(i, product_name)
        })
        .collect();

    Ok(Some(OrderWithItemsDto {
        id: order.id,
        order_number: order.order_number,
        order_date: order.order_date,
        customer_id: order.customer_id,
        customer_name,
        total_amount: order.total_amount,
        items,
    }))
}

pub async fn create(dto: CreateOrderDto) -> ServiceResult<OrderDto> {
    if dto.order_number.trim().is_empty() {
        return Err(ServiceError::invalid("orderNumber is required"));
    }
    if dto.total_amount < 0.0 {
        return Err(ServiceError::invalid("totalAmount cannot be negative"));
    }

    // No orphan orders: the owner must exist, and the row fetched here
    // also provides the display name for the response
    let customer = customer_repository::get_by_id(dto.customer_id)
        .await?
        .ok_or_else(|| ServiceError::reference("Customer", dto.customer_id))?;

    let active = ActiveModel {
        order_number: Set(dto.order_number),
        order_date: Set(dto.order_date),
        customer_id: Set(dto.customer_id),
        total_amount: Set(dto.total_amount),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
        ..Default::default()
    };

    let model = repository::insert(active).await?;
    let customer_name = format!("{} {}", customer.first_name, customer.last_name);
    Ok(order_to_dto(model, Some(customer_name)))
}

pub async fn update(id: i32, dto: UpdateOrderDto) -> ServiceResult<bool> {
    let Some(existing) = repository::get_by_id(id).await? else {
        return Ok(false);
    };

    if dto.order_number.trim().is_empty() {
        return Err(ServiceError::invalid("orderNumber is required"));
    }
    if dto.total_amount < 0.0 {
        return Err(ServiceError::invalid("totalAmount cannot be negative"));
    }

    let mut active: ActiveModel = existing.into();
    active.order_number = Set(dto.order_number);
    active.order_date = Set(dto.order_date);
    active.total_amount = Set(dto.total_amount);
    active.updated_at = Set(Some(Utc::now()));

    repository::update(active).await?;
    Ok(true)
}

pub async fn delete(id: i32) -> ServiceResult<bool> {
    Ok(repository::delete_by_id(id).await?)
}

async fn with_customer_names(models: Vec<Model>) -> ServiceResult<Vec<OrderDto>> {
    let mut customer_ids: Vec<i32> = models.iter().map(|m| m.customer_id).collect();
    customer_ids.sort_unstable();
    customer_ids.dedup();

    let names: HashMap<i32, String> = customer_repository::find_by_ids(customer_ids)
        .await?
        .into_iter()
        .map(|c| (c.id, format!("{} {}", c.first_name, c.last_name)))
        .collect();

    Ok(models
        .into_iter()
        .map(|m| {
            let customer_name = names.get(&m.customer_id).cloned();
            order_to_dto(m, customer_name)
        })
        .collect())
}

pub(crate) fn order_to_dto(m: Model, customer_name: Option<String>) -> OrderDto {
    OrderDto {
        id: m.id,
        order_number: m.order_number,
        order_date: m.order_date,
        customer_id: m.customer_id,
        customer_name,
        total_amount: m.total_amount,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}
