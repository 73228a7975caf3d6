// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token codec (HS256 JWT carrying the user ID).

use crate::error::{AppError, Result};
use crate::models::UserId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp), only when a lifetime is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

/// Encodes and verifies session tokens with a process-wide secret.
///
/// Tokens are not stored anywhere; rotating the secret invalidates all of
/// them at once. Without a TTL that is the only way a token stops working.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Option<Duration>,
}

impl TokenCodec {
    pub fn new(secret: &[u8], ttl: Option<Duration>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Create a token for a user session.
    pub fn encode(&self, user_id: &UserId) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
            .as_secs();

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: self.ttl.map(|ttl| now.saturating_add(ttl.as_secs())),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))
    }

    /// Verify a token and return the user ID it was issued for.
    ///
    /// Fails with `InvalidToken` on a bad signature, malformed token,
    /// unexpected algorithm, a subject that is not a user ID, or (with a
    /// TTL configured) a missing or past expiry.
    pub fn decode(&self, token: &str) -> Result<UserId> {
        let mut validation = Validation::new(Algorithm::HS256);
        if self.ttl.is_some() {
            validation.set_required_spec_claims(&["exp", "sub"]);
        } else {
            validation.validate_exp = false;
            validation.set_required_spec_claims(&["sub"]);
        }

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AppError::InvalidToken)?;

        token_data
            .claims
            .sub
            .parse()
            .map_err(|_| AppError::InvalidToken)
    }
}
