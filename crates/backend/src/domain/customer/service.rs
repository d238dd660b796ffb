use chrono::Utc;
use contracts::domain::customer::{
    CreateCustomerDto, CustomerDto, CustomerWithOrdersDto, UpdateCustomerDto,
};
use contracts::shared::paged::PagedResult;
use sea_orm::Set;

use super::repository::{self, ActiveModel};
use crate::domain::order::repository as order_repository;
use crate::domain::order::service::order_to_dto;
use crate::shared::error::{ServiceError, ServiceResult};

const DEFAULT_PAGE_SIZE: i64 = 10;

pub async fn list_paged(page_number: i64, page_size: i64) -> ServiceResult<PagedResult<CustomerDto>> {
    let page_number = if page_number <= 0 { 1 } else { page_number } as u64;
    let page_size = if page_size <= 0 { DEFAULT_PAGE_SIZE } else { page_size } as u64;

    let total = repository::count_all().await?;
    let items: Vec<CustomerDto> = repository::find_page(page_size, (page_number - 1) * page_size)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(PagedResult::new(items, page_number, page_size, total))
}

pub async fn get_by_id(id: i32) -> ServiceResult<Option<CustomerDto>> {
    Ok(repository::get_by_id(id).await?.map(Into::into))
}

/// Customer plus its orders, newest first. The display name on each
/// order is computed from the customer row loaded here.
pub async fn get_with_orders(id: i32) -> ServiceResult<Option<CustomerWithOrdersDto>> {
    let Some(customer) = repository::get_by_id(id).await? else {
        return Ok(None);
    };

    let customer_name = format!("{} {}", customer.first_name, customer.last_name);
    let orders = order_repository::find_by_customer(id)
        .await?
        .into_iter()
        .map(|o| order_to_dto(o, Some(customer_name.clone())))
        .collect();

    Ok(Some(CustomerWithOrdersDto {
        id: customer.id,
        first_name: customer.first_name,
        last_name: customer.last_name,
        city: customer.city,
        country: customer.country,
        address1: customer.address1,
        address2: customer.address2,
        state: customer.state,
        zip_code: customer.zip_code,
        phone: customer.phone,
        orders,
    }))
}

pub async fn create(dto: CreateCustomerDto) -> ServiceResult<CustomerDto> {
    validate_names(&dto.first_name, &dto.last_name)?;

    let active = ActiveModel {
        first_name: Set(dto.first_name),
        last_name: Set(dto.last_name),
        city: Set(dto.city),
        country: Set(dto.country),
        address1: Set(dto.address1),
        address2: Set(dto.address2),
        state: Set(dto.state),
        zip_code: Set(dto.zip_code),
        phone: Set(dto.phone),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
        ..Default::default()
    };

    Ok(repository::insert(active).await?.into())
}

pub async fn update(id: i32, dto: UpdateCustomerDto) -> ServiceResult<bool> {
    let Some(existing) = repository::get_by_id(id).await? else {
        return Ok(false);
    };

    validate_names(&dto.first_name, &dto.last_name)?;

    let mut active: ActiveModel = existing.into();
    active.first_name = Set(dto.first_name);
    active.last_name = Set(dto.last_name);
    active.city = Set(dto.city);
    active.country = Set(dto.country);
    active.address1 = Set(dto.address1);
    active.address2 = Set(dto.address2);
    active.state = Set(dto.state);
    active.zip_code = Set(dto.zip_code);
    active.phone = Set(dto.phone);
    active.updated_at = Set(Some(Utc::now()));

    repository::update(active).await?;
    Ok(true)
}

pub async fn delete(id: i32) -> ServiceResult<bool> {
    Ok(repository::delete_by_id(id).await?)
}

fn validate_names(first_name: &str, last_name: &str) -> ServiceResult<()> {
    if first_name.trim().is_empty() {
        return Err(ServiceError::invalid("firstName is required"));
    }
    if last_name.trim().is_empty() {
        return Err(ServiceError::invalid("lastName is required"));
    }
    Ok(())
}
