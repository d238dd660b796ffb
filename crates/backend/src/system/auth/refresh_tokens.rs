//! Persistent refresh tokens. Only a SHA-256 digest of the token ever
//! reaches the store; the plain value lives with the client.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use sha2::{Digest, Sha256};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sys_refresh_tokens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub token_hash: String,
    pub expires_at: String,
    pub created_at: String,
    pub revoked_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub async fn issue(user_id: &str, token: &str, expires_at: String) -> Result<(), DbErr> {
    let active = ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        token_hash: Set(hash_token(token)),
        expires_at: Set(expires_at),
        created_at: Set(Utc::now().to_rfc3339()),
        revoked_at: Set(None),
    };
    active.insert(conn()).await?;
    Ok(())
}

/// Owner of the token, provided it is unexpired and not revoked.
pub async fn find_live_user_id(token: &str) -> Result<Option<String>, DbErr> {
    let now = Utc::now().to_rfc3339();
    let row = Entity::find()
        .filter(Column::TokenHash.eq(hash_token(token)))
        .filter(Column::ExpiresAt.gt(now))
        .filter(Column::RevokedAt.is_null())
        .one(conn())
        .await?;
    Ok(row.map(|r| r.user_id))
}

/// Revoking an unknown token is a no-op.
pub async fn revoke(token: &str) -> Result<(), DbErr> {
    Entity::update_many()
        .col_expr(Column::RevokedAt, Expr::value(Utc::now().to_rfc3339()))
        .filter(Column::TokenHash.eq(hash_token(token)))
        .exec(conn())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_token_is_stable_hex_sha256() {
        assert_eq!(
            hash_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_ne!(hash_token("abc"), hash_token("abd"));
    }
}
