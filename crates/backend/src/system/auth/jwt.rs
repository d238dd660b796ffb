use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;

use crate::shared::data::settings;

const ACCESS_TOKEN_LIFETIME_HOURS: i64 = 24;
const REFRESH_TOKEN_LIFETIME_DAYS: i64 = 90;
const JWT_SECRET_KEY: &str = "jwt_secret";

/// HS256 access token carrying the user's scope grant.
pub async fn generate_access_token(
    user_id: &str,
    username: &str,
    is_admin: bool,
    scope: &str,
) -> Result<String> {
    let now = Utc::now();

    let claims = TokenClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        is_admin,
        scope: scope.to_string(),
        exp: (now + chrono::Duration::hours(ACCESS_TOKEN_LIFETIME_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let secret = get_jwt_secret().await?;
    encode_claims(&claims, &secret)
}

pub async fn validate_token(token: &str) -> Result<TokenClaims> {
    let secret = get_jwt_secret().await?;
    decode_claims(token, &secret)
}

fn encode_claims(claims: &TokenClaims, secret: &str) -> Result<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")
}

fn decode_claims(token: &str, secret: &str) -> Result<TokenClaims> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;
    Ok(token_data.claims)
}

/// Opaque refresh token; persisted hashed, see
/// [`super::refresh_tokens`].
pub fn generate_refresh_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn calculate_refresh_token_expiration() -> String {
    let exp = Utc::now() + chrono::Duration::days(REFRESH_TOKEN_LIFETIME_DAYS);
    exp.to_rfc3339()
}

/// Signing secret, generated on first use and kept in `sys_settings`
/// so tokens survive restarts.
pub async fn get_jwt_secret() -> Result<String> {
    if let Ok(Some(secret)) = settings::get(JWT_SECRET_KEY).await {
        return Ok(secret);
    }

    let secret = generate_jwt_secret();
    settings::put(
        JWT_SECRET_KEY,
        &secret,
        Some("Auto-generated signing secret for access tokens"),
    )
    .await?;
    Ok(secret)
}

/// 256 random bits, base64-encoded.
fn generate_jwt_secret() -> String {
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_with_exp(exp: usize) -> TokenClaims {
        TokenClaims {
            sub: "user-1".to_string(),
            username: "jane".to_string(),
            is_admin: false,
            scope: "read:products".to_string(),
            exp,
            iat: Utc::now().timestamp() as usize,
        }
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let exp = (Utc::now() + chrono::Duration::hours(1)).timestamp() as usize;
        let claims = claims_with_exp(exp);
        let token = encode_claims(&claims, "test-secret").unwrap();

        let decoded = decode_claims(&token, "test-secret").unwrap();
        assert_eq!(decoded.sub, "user-1");
        assert_eq!(decoded.username, "jane");
        assert_eq!(decoded.scope, "read:products");
        assert!(!decoded.is_admin);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let exp = (Utc::now() + chrono::Duration::hours(1)).timestamp() as usize;
        let token = encode_claims(&claims_with_exp(exp), "secret-a").unwrap();
        assert!(decode_claims(&token, "secret-b").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let exp = (Utc::now() - chrono::Duration::hours(2)).timestamp() as usize;
        let token = encode_claims(&claims_with_exp(exp), "test-secret").unwrap();
        assert!(decode_claims(&token, "test-secret").is_err());
    }

    #[test]
    fn test_generated_secrets_are_distinct() {
        assert_ne!(generate_jwt_secret(), generate_jwt_secret());
    }
}
