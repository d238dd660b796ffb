use chrono::Utc;
use contracts::domain::supplier::{CreateSupplierDto, SupplierDto, UpdateSupplierDto};
use contracts::shared::paged::PagedResult;
use sea_orm::Set;

use super::repository::{self, ActiveModel};
use crate::shared::error::{ServiceError, ServiceResult};

const DEFAULT_PAGE_SIZE: i64 = 10;

pub async fn list_paged(page_number: i64, page_size: i64) -> ServiceResult<PagedResult<SupplierDto>> {
    let page_number = if page_number <= 0 { 1 } else { page_number } as u64;
    let page_size = if page_size <= 0 { DEFAULT_PAGE_SIZE } else { page_size } as u64;

    let total = repository::count_all().await?;
    let items: Vec<SupplierDto> = repository::find_page(page_size, (page_number - 1) * page_size)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(PagedResult::new(items, page_number, page_size, total))
}

pub async fn get_by_id(id: i32) -> ServiceResult<Option<SupplierDto>> {
    Ok(repository::get_by_id(id).await?.map(Into::into))
}

pub async fn create(dto: CreateSupplierDto) -> ServiceResult<SupplierDto> {
    let company_name = dto.company_name.trim().to_string();
    if company_name.is_empty() {
        return Err(ServiceError::invalid("companyName is required"));
    }

    let active = ActiveModel {
        company_name: Set(company_name),
        contact_name: Set(dto.contact_name),
        contact_title: Set(dto.contact_title),
        city: Set(dto.city),
        country: Set(dto.country),
        phone: Set(dto.phone),
        fax: Set(dto.fax),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
        ..Default::default()
    };

    Ok(repository::insert(active).await?.into())
}

pub async fn update(id: i32, dto: UpdateSupplierDto) -> ServiceResult<bool> {
    let Some(existing) = repository::get_by_id(id).await? else {
        return Ok(false);
    };

    let company_name = dto.company_name.trim().to_string();
    if company_name.is_empty() {
        return Err(ServiceError::invalid("companyName is required"));
    }

    let mut active: ActiveModel = existing.into();
    active.company_name = Set(company_name);
    active.contact_name = Set(dto.contact_name);
    active.contact_title = Set(dto.contact_title);
    active.city = Set(dto.city);
    active.country = Set(dto.country);
    active.phone = Set(dto.phone);
    active.fax = Set(dto.fax);
    active.updated_at = Set(Some(Utc::now()));

    repository::update(active).await?;
    Ok(true)
}

pub async fn delete(id: i32) -> ServiceResult<bool> {
    Ok(repository::delete_by_id(id).await?)
}
