use anyhow::Result;
use contracts::system::users::CreateUserDto;

use crate::system::users::{repository, service};

/// First-run bootstrap: when the account table is empty, seed a
/// default admin so the API is reachable at all.
pub async fn ensure_admin_user_exists() -> Result<()> {
    if repository::count_all().await? > 0 {
        return Ok(());
    }

    let admin_id = service::create(
        CreateUserDto {
            username: "admin".to_string(),
            password: "admin".to_string(),
            email: None,
            full_name: Some("Administrator".to_string()),
            is_admin: true,
        },
        None,
    )
    .await?;

    tracing::warn!(
        user_id = %admin_id,
        "seeded default admin account (username 'admin', password 'admin'); change the password before exposing this service"
    );

    Ok(())
}
