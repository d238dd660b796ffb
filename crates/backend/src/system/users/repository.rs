use chrono::Utc;
use contracts::system::users::User;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use crate::shared::data::db::get_connection;

/// Account row. `password_hash` never crosses the service boundary;
/// the wire type is [`User`].
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sys_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: String,
    pub updated_at: String,
    pub last_login_at: Option<String>,
    pub created_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(m: Model) -> Self {
        User {
            id: m.id,
            username: m.username,
            email: m.email,
            full_name: m.full_name,
            is_active: m.is_active,
            is_admin: m.is_admin,
            created_at: m.created_at,
            updated_at: m.updated_at,
            last_login_at: m.last_login_at,
            created_by: m.created_by,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn count_all() -> Result<u64, DbErr> {
    Entity::find().count(conn()).await
}

/// Newest accounts first.
pub async fn find_all() -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await
}

pub async fn get_by_id(id: &str) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(id.to_string()).one(conn()).await
}

pub async fn get_by_username(username: &str) -> Result<Option<Model>, DbErr> {
    Entity::find()
        .filter(Column::Username.eq(username))
        .one(conn())
        .await
}

pub async fn insert(active: ActiveModel) -> Result<Model, DbErr> {
    active.insert(conn()).await
}

pub async fn update(active: ActiveModel) -> Result<Model, DbErr> {
    active.update(conn()).await
}

pub async fn delete_by_id(id: &str) -> Result<bool, DbErr> {
    let result = Entity::delete_by_id(id.to_string()).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}

pub async fn touch_last_login(id: &str) -> Result<(), DbErr> {
    Entity::update_many()
        .col_expr(Column::LastLoginAt, Expr::value(Utc::now().to_rfc3339()))
        .filter(Column::Id.eq(id))
        .exec(conn())
        .await?;
    Ok(())
}

pub async fn set_password_hash(id: &str, password_hash: &str) -> Result<(), DbErr> {
    Entity::update_many()
        .col_expr(Column::PasswordHash, Expr::value(password_hash))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now().to_rfc3339()))
        .filter(Column::Id.eq(id))
        .exec(conn())
        .await?;
    Ok(())
}
