use anyhow::{bail, Result};
use chrono::Utc;
use contracts::system::users::{ChangePasswordDto, CreateUserDto, UpdateUserDto, User};
use sea_orm::Set;
use uuid::Uuid;

use super::repository::{self, ActiveModel};
use crate::system::auth::password;

fn validate_email(email: Option<&str>) -> Result<()> {
    if let Some(email) = email {
        if !email.trim().is_empty() && !email.contains('@') {
            bail!("'{email}' is not a valid email address");
        }
    }
    Ok(())
}

pub async fn create(dto: CreateUserDto, created_by: Option<String>) -> Result<String> {
    let username = dto.username.trim().to_string();
    if username.is_empty() {
        bail!("username must not be blank");
    }
    if repository::get_by_username(&username).await?.is_some() {
        bail!("username '{username}' is already taken");
    }
    validate_email(dto.email.as_deref())?;
    password::validate_password_strength(&dto.password)?;

    let now = Utc::now().to_rfc3339();
    let active = ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        username: Set(username),
        email: Set(dto.email),
        password_hash: Set(password::hash_password(&dto.password)?),
        full_name: Set(dto.full_name),
        is_active: Set(true),
        is_admin: Set(dto.is_admin),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        last_login_at: Set(None),
        created_by: Set(created_by),
    };

    let created = repository::insert(active).await?;
    Ok(created.id)
}

/// `false` when the account does not exist. The username and password
/// are immutable here; see [`change_password`].
pub async fn update(dto: UpdateUserDto) -> Result<bool> {
    let Some(existing) = repository::get_by_id(&dto.id).await? else {
        return Ok(false);
    };

    validate_email(dto.email.as_deref())?;

    let mut active: ActiveModel = existing.into();
    active.email = Set(dto.email);
    active.full_name = Set(dto.full_name);
    active.is_active = Set(dto.is_active);
    active.is_admin = Set(dto.is_admin);
    active.updated_at = Set(Utc::now().to_rfc3339());

    repository::update(active).await?;
    Ok(true)
}

pub async fn delete(id: &str) -> Result<bool> {
    Ok(repository::delete_by_id(id).await?)
}

pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    Ok(repository::get_by_id(id).await?.map(Into::into))
}

pub async fn list_all() -> Result<Vec<User>> {
    let users = repository::find_all().await?;
    Ok(users.into_iter().map(Into::into).collect())
}

/// The caller decides whether the old password must be presented
/// (self-service changes); admins reset without it.
pub async fn change_password(dto: ChangePasswordDto, require_old_password: bool) -> Result<()> {
    let Some(target) = repository::get_by_id(&dto.user_id).await? else {
        bail!("user '{}' was not found", dto.user_id);
    };

    if require_old_password {
        let Some(old_password) = dto.old_password.as_deref() else {
            bail!("oldPassword is required");
        };
        if !password::verify_password(old_password, &target.password_hash)? {
            bail!("old password does not match");
        }
    }

    password::validate_password_strength(&dto.new_password)?;
    let new_hash = password::hash_password(&dto.new_password)?;
    repository::set_password_hash(&target.id, &new_hash).await?;

    Ok(())
}

/// Login check. Unknown username and wrong password both come back as
/// `None`; an inactive account is an error so the caller can tell the
/// difference in logs.
pub async fn verify_credentials(username: &str, password_input: &str) -> Result<Option<User>> {
    let Some(account) = repository::get_by_username(username).await? else {
        return Ok(None);
    };

    if !account.is_active {
        bail!("account '{username}' is deactivated");
    }

    if !password::verify_password(password_input, &account.password_hash)? {
        return Ok(None);
    }

    let _ = repository::touch_last_login(&account.id).await;

    Ok(Some(account.into()))
}
