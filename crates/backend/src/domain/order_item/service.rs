use std::collections::HashMap;

use contracts::domain::order_item::{CreateOrderItemDto, OrderItemDto, UpdateOrderItemDto};
use contracts::shared::paged::PagedResult;
use sea_orm::Set;

use super::repository::{self, ActiveModel, Model};
use crate::domain::order::repository as order_repository;
use crate::domain::product::repository as product_repository;
use crate::shared::error::{ServiceError, ServiceResult};

const DEFAULT_PAGE_SIZE: i64 = 20;

pub async fn list_paged(
    page_number: i64,
    page_size: i64,
    order_id: Option<i32>,
) -> ServiceResult<PagedResult<OrderItemDto>> {
    let page_number = if page_number <= 0 { 1 } else { page_number } as u64;
    let page_size = if page_size <= 0 { DEFAULT_PAGE_SIZE } else { page_size } as u64;

    let total = repository::count(order_id).await?;
    let models = repository::find_page(order_id, page_size, (page_number - 1) * page_size).await?;
    let items = with_product_names(models).await?;

    Ok(PagedResult::new(items, page_number, page_size, total))
}

pub async fn get_by_id(id: i32) -> ServiceResult<Option<OrderItemDto>> {
    let Some(model) = repository::get_by_id(id).await? else {
        return Ok(None);
    };
    let product_name = product_repository::get_by_id(model.product_id)
        .await?
        .map(|p| p.product_name);
    Ok(Some(order_item_to_dto(model, product_name)))
}

pub async fn create(dto: CreateOrderItemDto) -> ServiceResult<OrderItemDto> {
    // No orphan rows: both sides of the line must exist
    if !order_repository::exists(dto.order_id).await? {
        return Err(ServiceError::reference("Order", dto.order_id));
    }
    let product = product_repository::get_by_id(dto.product_id)
        .await?
        .ok_or_else(|| ServiceError::reference("Product", dto.product_id))?;

    validate_line(dto.unit_price, dto.quantity)?;

    let active = ActiveModel {
        order_id: Set(dto.order_id),
        product_id: Set(dto.product_id),
        unit_price: Set(dto.unit_price),
        quantity: Set(dto.quantity),
        ..Default::default()
    };

    let model = repository::insert(active).await?;
    Ok(order_item_to_dto(model, Some(product.product_name)))
}

pub async fn update(id: i32, dto: UpdateOrderItemDto) -> ServiceResult<bool> {
    let Some(existing) = repository::get_by_id(id).await? else {
        return Ok(false);
    };

    if !product_repository::exists(dto.product_id).await? {
        return Err(ServiceError::reference("Product", dto.product_id));
    }
    validate_line(dto.unit_price, dto.quantity)?;

    let mut active: ActiveModel = existing.into();
    active.product_id = Set(dto.product_id);
    active.unit_price = Set(dto.unit_price);
    active.quantity = Set(dto.quantity);

    repository::update(active).await?;
    Ok(true)
}

pub async fn delete(id: i32) -> ServiceResult<bool> {
    Ok(repository::delete_by_id(id).await?)
}

fn validate_line(unit_price: f64, quantity: i32) -> ServiceResult<()> {
    if quantity < 1 {
        return Err(ServiceError::invalid("quantity must be >= 1"));
    }
    if unit_price < 0.0 {
        return Err(ServiceError::invalid("unitPrice cannot be negative"));
    }
    Ok(())
}

async fn with_product_names(models: Vec<Model>) -> ServiceResult<Vec<OrderItemDto>> {
    let mut product_ids: Vec<i32> = models.iter().map(|m| m.product_id).collect();
    product_ids.sort_unstable();
    product_ids.dedup();

    let names: HashMap<i32, String> = product_repository::find_by_ids(product_ids)
        .await?
        .into_iter()
        .map(|p| (p.id, p.product_name))
        .collect();

    Ok(models
        .into_iter()
        .map(|m| {
            let product_name = names.get(&m.product_id).cloned();
            order_item_to_dto(m, product_name)
        })
        .collect())
}

pub(crate) fn order_item_to_dto(m: Model, product_name: Option<String>) -> OrderItemDto {
    OrderItemDto {
        id: m.id,
        product_id: m.product_id,
        product_name,
        line_total: OrderItemDto::line_total(m.unit_price, m.quantity),
        unit_price: m.unit_price,
        quantity: m.quantity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_validation() {
        assert!(validate_line(10.0, 1).is_ok());
        assert!(validate_line(0.0, 5).is_ok());
        assert!(validate_line(10.0, 0).is_err());
        assert!(validate_line(10.0, -3).is_err());
        assert!(validate_line(-0.01, 1).is_err());
    }
}
