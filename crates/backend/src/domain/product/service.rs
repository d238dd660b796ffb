use std::collections::HashMap;

use chrono::Utc;
use contracts::domain::product::{CreateProductDto, ProductDto, ProductQuery, UpdateProductDto};
use contracts::shared::paged::PagedResult;
use sea_orm::Set;

use super::repository::{self, ActiveModel, Model};
use crate::domain::supplier::repository as supplier_repository;
use crate::shared::error::{ServiceError, ServiceResult};

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

/// Plain listing: the catalog query with no filters and default sort.
pub async fn list_paged(page_number: i64, page_size: i64) -> ServiceResult<PagedResult<ProductDto>> {
    get_catalog(ProductQuery {
        page_number,
        page_size,
        ..ProductQuery::default()
    })
    .await
}

pub async fn get_catalog(query: ProductQuery) -> ServiceResult<PagedResult<ProductDto>> {
    let page_number = if query.page_number <= 0 {
        1
    } else {
        query.page_number
    } as u64;
    let page_size = if query.page_size <= 0 {
        DEFAULT_PAGE_SIZE
    } else {
        query.page_size
    };

    validate_query(&query, page_size)?;
    let page_size = page_size as u64;

    let total = repository::count_catalog(&query).await?;
    let models =
        repository::find_catalog_page(&query, page_size, (page_number - 1) * page_size).await?;
    let items = with_supplier_names(models).await?;

    Ok(PagedResult::new(items, page_number, page_size, total))
}

pub async fn get_by_id(id: i32) -> ServiceResult<Option<ProductDto>> {
    let Some(model) = repository::get_by_id(id).await? else {
        return Ok(None);
    };
    let supplier_name = supplier_repository::get_by_id(model.supplier_id)
        .await?
        .map(|s| s.company_name);
    Ok(Some(to_dto(model, supplier_name)))
}

pub async fn create(dto: CreateProductDto) -> ServiceResult<ProductDto> {
    let product_name = dto.product_name.trim().to_string();
    if product_name.is_empty() {
        return Err(ServiceError::invalid("productName is required"));
    }
    if dto.unit_price < 0.0 {
        return Err(ServiceError::invalid("unitPrice cannot be negative"));
    }

    // Existence check doubles as the supplier-name lookup for the DTO
    let supplier = supplier_repository::get_by_id(dto.supplier_id)
        .await?
        .ok_or_else(|| ServiceError::reference("Supplier", dto.supplier_id))?;

    let active = ActiveModel {
        product_name: Set(product_name),
        supplier_id: Set(dto.supplier_id),
        unit_price: Set(dto.unit_price),
        package: Set(dto.package),
        is_discontinued: Set(dto.is_discontinued),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
        ..Default::default()
    };

    let model = repository::insert(active).await?;
    Ok(to_dto(model, Some(supplier.company_name)))
}

pub async fn update(id: i32, dto: UpdateProductDto) -> ServiceResult<bool> {
    let Some(existing) = repository::get_by_id(id).await? else {
        return Ok(false);
    };

    let product_name = dto.product_name.trim().to_string();
    if product_name.is_empty() {
        return Err(ServiceError::invalid("productName is required"));
    }
    if dto.unit_price < 0.0 {
        return Err(ServiceError::invalid("unitPrice cannot be negative"));
    }
    if supplier_repository::get_by_id(dto.supplier_id).await?.is_none() {
        return Err(ServiceError::reference("Supplier", dto.supplier_id));
    }

    let mut active: ActiveModel = existing.into();
    active.product_name = Set(product_name);
    active.supplier_id = Set(dto.supplier_id);
    active.unit_price = Set(dto.unit_price);
    active.package = Set(dto.package);
    active.is_discontinued = Set(dto.is_discontinued);
    active.updated_at = Set(Some(Utc::now()));

    repository::update(active).await?;
    Ok(true)
}

pub async fn delete(id: i32) -> ServiceResult<bool> {
    Ok(repository::delete_by_id(id).await?)
}

fn validate_query(query: &ProductQuery, page_size: i64) -> ServiceResult<()> {
    if page_size > MAX_PAGE_SIZE {
        return Err(ServiceError::invalid(format!(
            "pageSize cannot exceed {}",
            MAX_PAGE_SIZE
        )));
    }
    if let Some(min_price) = query.min_price {
        if min_price < 0.0 {
            return Err(ServiceError::invalid("minPrice cannot be negative"));
        }
    }
    if let Some(max_price) = query.max_price {
        if max_price < 0.0 {
            return Err(ServiceError::invalid("maxPrice cannot be negative"));
        }
    }
    if let (Some(min_price), Some(max_price)) = (query.min_price, query.max_price) {
        if min_price > max_price {
            return Err(ServiceError::invalid("minPrice cannot exceed maxPrice"));
        }
    }
    if let Some(supplier_id) = query.supplier_id {
        if supplier_id <= 0 {
            return Err(ServiceError::invalid("supplierId must be positive"));
        }
    }
    if !matches!(query.sort_by.as_str(), "name" | "price" | "createdAt") {
        return Err(ServiceError::invalid(format!(
            "Unknown sortBy '{}'",
            query.sort_by
        )));
    }
    if !matches!(query.sort_dir.as_str(), "asc" | "desc") {
        return Err(ServiceError::invalid(format!(
            "Unknown sortDir '{}'",
            query.sort_dir
        )));
    }
    Ok(())
}

/// Batch-resolve supplier display names for one page of products.
async fn with_supplier_names(models: Vec<Model>) -> ServiceResult<Vec<ProductDto>> {
    let mut supplier_ids: Vec<i32> = models.iter().map(|m| m.supplier_id).collect();
    supplier_ids.sort_unstable();
    supplier_ids.dedup();

    let names: HashMap<i32, String> = supplier_repository::find_by_ids(supplier_ids)
        .await?
        .into_iter()
        .map(|s| (s.id, s.company_name))
        .collect();

    Ok(models
        .into_iter()
        .map(|m| {
            let supplier_name = names.get(&m.supplier_id).cloned();
            to_dto(m, supplier_name)
        })
        .collect())
}

fn to_dto(m: Model, supplier_name: Option<String>) -> ProductDto {
    ProductDto {
        id: m.id,
        product_name: m.product_name,
        supplier_id: m.supplier_id,
        supplier_name,
        unit_price: m.unit_price,
        package: m.package,
        is_discontinued: m.is_discontinued,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_oversized_page() {
        let query = ProductQuery::default();
        assert!(validate_query(&query, 101).is_err());
        assert!(validate_query(&query, 100).is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_prices() {
        let query = ProductQuery {
            min_price: Some(-1.0),
            ..ProductQuery::default()
        };
        assert!(validate_query(&query, 20).is_err());

        let query = ProductQuery {
            max_price: Some(-0.5),
            ..ProductQuery::default()
        };
        assert!(validate_query(&query, 20).is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_price_range() {
        let query = ProductQuery {
            min_price: Some(10.0),
            max_price: Some(5.0),
            ..ProductQuery::default()
        };
        assert!(validate_query(&query, 20).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_supplier_id() {
        let query = ProductQuery {
            supplier_id: Some(0),
            ..ProductQuery::default()
        };
        assert!(validate_query(&query, 20).is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_sort() {
        let query = ProductQuery {
            sort_by: "weight".to_string(),
            ..ProductQuery::default()
        };
        assert!(validate_query(&query, 20).is_err());

        let query = ProductQuery {
            sort_dir: "up".to_string(),
            ..ProductQuery::default()
        };
        assert!(validate_query(&query, 20).is_err());
    }

    #[test]
    fn test_validate_accepts_all_sort_keys() {
        for sort_by in ["name", "price", "createdAt"] {
            for sort_dir in ["asc", "desc"] {
                let query = ProductQuery {
                    sort_by: sort_by.to_string(),
                    sort_dir: sort_dir.to_string(),
                    ..ProductQuery::default()
                };
                assert!(validate_query(&query, 20).is_ok());
            }
        }
    }
}
