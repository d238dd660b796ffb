use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub unit_price: f64,
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn count(order_id: Option<i32>) -> Result<u64, DbErr> {
    let mut select = Entity::find();
    if let Some(order_id) = order_id {
        select = select.filter(Column::OrderId.eq(order_id));
    }
    select.count(conn()).await
}

pub async fn find_page(
    order_id: Option<i32>,
    limit: u64,
    offset: u64,
) -> Result<Vec<Model>, DbErr> {
    let mut select = Entity::find();
    if let Some(order_id) = order_id {
        select = select.filter(Column::OrderId.eq(order_id));
    }
    select
        .order_by_desc(Column::Id)
        .limit(limit)
        .offset(offset)
        .all(conn())
        .await
}

pub async fn get_by_id(id: i32) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(id).one(conn()).await
}

/// Items of one order in insertion order.
pub async fn find_by_order(order_id: i32) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .filter(Column::OrderId.eq(order_id))
        .order_by_asc(Column::Id)
        .all(conn())
        .await
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
