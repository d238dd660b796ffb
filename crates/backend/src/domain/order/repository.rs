use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub order_number: String,
    pub order_date: DateTimeUtc,
    pub customer_id: i32,
    pub total_amount: f64,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn count_all() -> Result<u64, DbErr> {
    Entity::find().count(conn()).await
}

/// Newest orders first; order number breaks date ties.
pub async fn find_page(limit: u64, offset: u64) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .order_by_desc(Column::OrderDate)
        .order_by_asc(Column::OrderNumber)
        .limit(limit)
        .offset(offset)
        .all(conn())
        .await
}

pub async fn get_by_id(id: i32) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(id).one(conn()).await
}

pub async fn find_by_customer(customer_id: i32) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .filter(Column::CustomerId.eq(customer_id))
        .order_by_desc(Column::OrderDate)
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
