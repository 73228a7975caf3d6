// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Signed OAuth `state` parameter.
//!
//! Format (before base64url): `nonce|timestamp_ms_hex|hmac_sha256_hex`.
//! The nonce is also stored in a short-lived cookie so the callback can
//! check that it lands in the browser that started the flow.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Maximum time between starting the flow and the provider callback.
pub const MAX_STATE_AGE_MS: u128 = 10 * 60 * 1000;

/// Why a state parameter was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("malformed state parameter")]
    Malformed,
    #[error("state signature mismatch")]
    BadSignature,
    #[error("state parameter expired")]
    Expired,
    #[error("state nonce does not match this browser")]
    NonceMismatch,
}

/// Build a signed state value for `nonce` issued at `now_ms`.
pub fn sign_state(nonce: &str, now_ms: u128, secret: &[u8]) -> String {
    let payload = format!("{}|{:x}", nonce, now_ms);
    let signature = hex::encode(mac_for(&payload, secret).finalize().into_bytes());
    URL_SAFE_NO_PAD.encode(format!("{}|{}", payload, signature).as_bytes())
}

/// Verify a state value against the nonce cookie and the clock.
pub fn verify_state(
    state: &str,
    expected_nonce: Option<&str>,
    now_ms: u128,
    secret: &[u8],
) -> Result<(), StateError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(state)
        .map_err(|_| StateError::Malformed)?;
    let state_str = String::from_utf8(bytes).map_err(|_| StateError::Malformed)?;

    let parts: Vec<&str> = state_str.splitn(3, '|').collect();
    let &[nonce, timestamp_hex, signature_hex] = parts.as_slice() else {
        return Err(StateError::Malformed);
    };

    let signature = hex::decode(signature_hex).map_err(|_| StateError::Malformed)?;
    let payload = format!("{}|{}", nonce, timestamp_hex);
    mac_for(&payload, secret)
        .verify_slice(&signature)
        .map_err(|_| StateError::BadSignature)?;

    let issued_ms = u128::from_str_radix(timestamp_hex, 16).map_err(|_| StateError::Malformed)?;
    if now_ms.saturating_sub(issued_ms) > MAX_STATE_AGE_MS {
        return Err(StateError::Expired);
    }

    let Some(expected) = expected_nonce else {
        return Err(StateError::NonceMismatch);
    };
    if !bool::from(expected.as_bytes().ct_eq(nonce.as_bytes())) {
        return Err(StateError::NonceMismatch);
    }

    Ok(())
}

fn mac_for(payload: &str, secret: &[u8]) -> HmacSha256 {
    // HMAC accepts keys of any length.
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret)
        .unwrap_or_else(|_| unreachable!("HMAC-SHA256 accepts any key length"));
    mac.update(payload.as_bytes());
    mac
}
