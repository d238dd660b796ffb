use contracts::domain::supplier::SupplierDto;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub company_name: String,
    pub contact_name: Option<String>,
    pub contact_title: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SupplierDto {
    fn from(m: Model) -> Self {
        SupplierDto {
            id: m.id,
            company_name: m.company_name,
            contact_name: m.contact_name,
            contact_title: m.contact_title,
            city: m.city,
            country: m.country,
            phone: m.phone,
            fax: m.fax,
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
        .order_by_asc(Column::CompanyName)
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
