use crate::models::AdminClaims;
use anyhow::Result;
use base64::{engine::general_purpose, Engine as _};

/// Decode JWT claims without validation
///
/// The token comes straight from the login endpoint over the API connection;
/// the frontend only needs the claims for display and expiry. The API checks
/// the signature on every call that carries the token.
pub fn decode_jwt_claims(token: &str) -> Result<AdminClaims> {
    let parts: Vec<&str> = token.split('.').collect();

    if parts.len() != 3 {
        return Err(anyhow::anyhow!("Invalid JWT format"));
    }

    // Decode the payload (second part)
    let payload = general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| anyhow::anyhow!("Failed to decode JWT payload: {}", e))?;

    let claims: AdminClaims = serde_json::from_slice(&payload)
        .map_err(|e| anyhow::anyhow!("Failed to parse JWT claims: {}", e))?;

    Ok(claims)
}
