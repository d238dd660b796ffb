use contracts::domain::product::ProductQuery;
use sea_orm::entity::prelude::*;
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_name: String,
    pub supplier_id: i32,
    pub unit_price: f64,
    pub package: Option<String>,
    pub is_discontinued: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Conjunction of the filters present on the query; absent filters
/// impose no constraint. Substring search relies on SQLite's
/// case-insensitive LIKE.
fn apply_filters(mut select: Select<Entity>, query: &ProductQuery) -> Select<Entity> {
    if let Some(search) = query.search.as_deref() {
        if !search.is_empty() {
            select = select.filter(Column::ProductName.contains(search));
        }
    }
    if let Some(supplier_id) = query.supplier_id {
        select = select.filter(Column::SupplierId.eq(supplier_id));
    }
    if let Some(min_price) = query.min_price {
        select = select.filter(Column::UnitPrice.gte(min_price));
    }
    if let Some(max_price) = query.max_price {
        select = select.filter(Column::UnitPrice.lte(max_price));
    }
    if let Some(discontinued) = query.discontinued {
        select = select.filter(Column::IsDiscontinued.eq(discontinued));
    }
    select
}

/// Size of the filtered set, computed before any paging.
pub async fn count_catalog(query: &ProductQuery) -> Result<u64, DbErr> {
    apply_filters(Entity::find(), query).count(conn()).await
}

pub async fn find_catalog_page(
    query: &ProductQuery,
    limit: u64,
    offset: u64,
) -> Result<Vec<Model>, DbErr> {
    let select = apply_filters(Entity::find(), query);
    let descending = query.sort_dir == "desc";

    // Secondary sort keeps pagination stable when primary keys tie.
    let select = match (query.sort_by.as_str(), descending) {
        ("price", true) => select
            .order_by_desc(Column::UnitPrice)
            .order_by_asc(Column::ProductName),
        ("price", false) => select
            .order_by_asc(Column::UnitPrice)
            .order_by_asc(Column::ProductName),
        ("createdAt", true) => select
            .order_by_desc(Column::CreatedAt)
            .order_by_asc(Column::ProductName),
        ("createdAt", false) => select
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::ProductName),
        (_, true) => select
            .order_by_desc(Column::ProductName)
            .order_by_asc(Column::Id),
        (_, false) => select
            .order_by_asc(Column::ProductName)
            .order_by_asc(Column::Id),
    };

    select.limit(limit).offset(offset).all(conn()).await
}

pub async fn get_by_id(id: i32) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(id).one(conn()).await
}

pub async fn find_by_ids(ids: Vec<i32>) -> Result<Vec<Model>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    Entity::find()
        .filter(Column::Id.is_in(ids))
        .all(conn())
        .await
}

pub async fn exists(id: i32) -> Result<bool, DbErr> {
    Ok(Entity::find_by_id(id).count(conn()).await? > 0)
}

pub async fn insert(active: ActiveModel) -> Result<Model, DbErr> {
    active.insert(conn()).await
}

pub async fn update(active: ActiveModel) -> Result<Model, DbErr> {
    active.update(conn()).await
}

pub async fn delete_by_id(id: i32) -> Result<bool, DbErr> {
    let result = Entity::delete_by_id(id).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}
