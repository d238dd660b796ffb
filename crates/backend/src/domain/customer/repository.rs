use contracts::domain::customer::CustomerDto;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CustomerDto {
    fn from(m: Model) -> Self {
        CustomerDto {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            city: m.city,
            country: m.country,
            address1: m.address1,
            address2: m.address2,
            state: m.state,
            zip_code: m.zip_code,
            phone: m.phone,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn count_all() -> Result<u64, DbErr> {
    Entity::find().count(conn()).await
}

pub async fn find_page(limit: u64, offset: u64) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .order_by_asc(Column::LastName)
        .order_by_asc(Column::FirstName)
        .limit(limit)
        .offset(offset)
        .all(conn())
        .await
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
