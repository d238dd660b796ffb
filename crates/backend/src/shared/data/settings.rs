//! Key/value store backed by `sys_settings`. Holds process-level
//! secrets such as the JWT signing key.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sys_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn get(key: &str) -> Result<Option<String>, DbErr> {
    let row = Entity::find_by_id(key.to_string()).one(conn()).await?;
    Ok(row.map(|r| r.value))
}

/// Insert or overwrite a setting.
pub async fn put(key: &str, value: &str, description: Option<&str>) -> Result<(), DbErr> {
    let now = Utc::now().to_rfc3339();

    if Entity::find_by_id(key.to_string()).one(conn()).await?.is_some() {
        Entity::update_many()
            .col_expr(Column::Value, Expr::value(value))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Key.eq(key))
            .exec(conn())
            .await?;
        return Ok(());
    }

    let active = ActiveModel {
        key: Set(key.to_string()),
        value: Set(value.to_string()),
        description: Set(description.map(|d| d.to_string())),
        created_at: Set(Some(now.clone())),
        updated_at: Set(Some(now)),
    };
    active.insert(conn()).await?;
    Ok(())
}
