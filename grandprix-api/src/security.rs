use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::ApiResult;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    /// Access token lifetime in seconds (default: 24 hours).
    pub token_expiry_seconds: i64,
}

impl JwtConfig {
    pub fn new(secret_key: String) -> Self {
        Self {
            secret_key,
            token_expiry_seconds: 60 * 60 * 24,
        }
    }

    pub fn from_env() -> Self {
        let secret_key = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set in environment, using default (DEVELOPMENT ONLY)");
            "change-this-secret-key".to_string()
        });
        Self::new(secret_key)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the user's UUID.
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

pub fn create_access_token(config: &JwtConfig, user_id: &Uuid) -> ApiResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (now + Duration::seconds(config.token_expiry_seconds)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret_key.as_bytes()),
    )?;
    Ok(token)
}

pub fn validate_token(config: &JwtConfig, token: &str) -> ApiResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret_key.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

/// Salted SHA-256 password digest, stored as `salt:digest` hex.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);
    let digest = salted_digest(&salt, password);
    format!("{}:{}", hex::encode(salt), digest)
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, digest)) = stored.split_once(':') else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    salted_digest(&salt, password) == digest
}

fn salted_digest(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
