use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // user_id
    pub username: String,
    pub is_admin: bool,
    /// Space-delimited grant list, e.g. "read:products write:products".
    pub scope: String,
    pub exp: usize, // expiration timestamp
    pub iat: usize, // issued at
}

impl TokenClaims {
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scope.split_whitespace().any(|s| s == scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_scope() {
        let claims = TokenClaims {
            sub: "u1".into(),
            username: "jane".into(),
            is_admin: false,
            scope: "read:products read:orders".into(),
            exp: 0,
            iat: 0,
        };
        assert!(claims.has_scope("read:products"));
        assert!(claims.has_scope("read:orders"));
        assert!(!claims.has_scope("write:products"));
        assert!(!claims.has_scope("read:product"));
    }
}
