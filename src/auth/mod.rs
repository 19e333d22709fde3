use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// How much of the project permission model applies to a caller.
///
/// `App` is an integration token and `Admin` an application administrator;
/// neither is subject to project roles. `User` callers need a role in the
/// project they are acting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    App,
    Admin,
    User,
}

impl Access {
    pub fn as_str(&self) -> &'static str {
        match self {
            Access::App => "app",
            Access::Admin => "admin",
            Access::User => "user",
        }
    }
}

impl std::str::FromStr for Access {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "app" => Ok(Access::App),
            "admin" => Ok(Access::Admin),
            "user" => Ok(Access::User),
            other => Err(format!("unknown access level '{}'", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: UserId,
    pub username: String,
    pub access: Access,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: UserId, username: impl Into<String>, access: Access, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: user_id,
            username: username.into(),
            access,
            exp,
            iat: now.timestamp(),
        }
    }
}

/// Identity of whoever is invoking a procedure, extracted from the JWT
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caller {
    pub user_id: UserId,
    pub username: String,
    pub access: Access,
}

impl Caller {
    pub fn new(user_id: UserId, username: impl Into<String>, access: Access) -> Self {
        Self {
            user_id,
            username: username.into(),
            access,
        }
    }

    pub fn user(user_id: UserId, username: impl Into<String>) -> Self {
        Self::new(user_id, username, Access::User)
    }

    pub fn admin(user_id: UserId, username: impl Into<String>) -> Self {
        Self::new(user_id, username, Access::Admin)
    }

    pub fn app(name: impl Into<String>) -> Self {
        Self::new(0, name, Access::App)
    }

    /// App and admin callers are not checked against project roles
    pub fn bypasses_project_roles(&self) -> bool {
        matches!(self.access, Access::App | Access::Admin)
    }
}

impl From<Claims> for Caller {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
            access: claims.access,
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidToken(String),
    InvalidSecret,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidToken(msg) => write!(f, "Invalid JWT token: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
        }
    }
}

impl std::error::Error for JwtError {}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Validate JWT token and extract claims
pub fn validate_jwt(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn token_round_trips_into_caller() {
        let claims = Claims::new(42, "alice", Access::User, 1);
        let token = generate_jwt(&claims, SECRET).unwrap();

        let caller = Caller::from(validate_jwt(&token, SECRET).unwrap());
        assert_eq!(caller, Caller::user(42, "alice"));
        assert!(!caller.bypasses_project_roles());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = generate_jwt(&Claims::new(1, "bob", Access::Admin, 1), "other").unwrap();
        assert!(matches!(validate_jwt(&token, SECRET), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn empty_secret_is_refused() {
        let claims = Claims::new(1, "bob", Access::User, 1);
        assert!(matches!(generate_jwt(&claims, ""), Err(JwtError::InvalidSecret)));
        assert!(matches!(validate_jwt("abc", ""), Err(JwtError::InvalidSecret)));
    }

    #[test]
    fn app_and_admin_bypass_roles() {
        assert!(Caller::app("integration").bypasses_project_roles());
        assert!(Caller::admin(1, "root").bypasses_project_roles());
        assert_eq!("admin".parse::<Access>(), Ok(Access::Admin));
        assert!("root".parse::<Access>().is_err());
    }
}
