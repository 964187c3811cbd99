use crate::core::errors::AdminError;
use crate::core::models::user::User;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,  // User ID
    pub role: String, // Role at issue time; the gates re-read the stored role
    pub jti: String,  // Token ID, keys the server-side token row
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<u64, AdminError> {
        self.sub
            .parse()
            .map_err(|_| AdminError::Unauthenticated(format!("Malformed token subject: {}", self.sub)))
    }
}

// Ten years; larger lifetimes are clamped to it.
const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

pub struct JwtService {
    secret: String,
    ttl: Duration,
}

impl JwtService {
    pub fn new(secret: String, ttl_secs: u64) -> Self {
        JwtService {
            secret,
            ttl: Duration::seconds(ttl_secs.min(MAX_TTL_SECS) as i64),
        }
    }

    pub fn generate_token(&self, user: &User, token_id: &str) -> Result<(String, DateTime<Utc>), AdminError> {
        let issued_at = Utc::now();
        let expires_at = issued_at + self.ttl;

        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role.to_string(),
            jti: token_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AdminError::InternalServerError(format!("JWT encoding error: {}", e)))?;
        Ok((token, expires_at))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AdminError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| AdminError::Unauthenticated(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }
}
