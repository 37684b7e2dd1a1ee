use axum::http::{header::AUTHORIZATION, HeaderMap};
use sha2::{Digest, Sha256};

use crate::utils::error::AppError;

/// Checks an `Authorization` value against the webhook secret.
///
/// Accepts either `Bearer <token>` or the bare token.
pub fn token_matches(header_value: &str, secret: &str) -> bool {
  if header_value.is_empty() {
    return false;
  }

  let token = header_value.strip_prefix("Bearer ").unwrap_or(header_value);

  // Digests have a fixed length, so the comparison time is independent of the inputs.
  let presented = Sha256::digest(token.as_bytes());
  let expected = Sha256::digest(secret.as_bytes());

  presented
    .iter()
    .zip(expected.iter())
    .fold(0u8, |acc, (a, b)| acc | (a ^ b))
    == 0
}

pub fn authorize(headers: &HeaderMap, secret: &str) -> Result<(), AppError> {
  let auth_header = headers
    .get(AUTHORIZATION)
    .ok_or_else(|| AppError::unauthorized("Unauthorized"))?
    .to_str()
    .map_err(|_| AppError::unauthorized("Unauthorized"))?;

  if token_matches(auth_header, secret) {
    Ok(())
  } else {
    Err(AppError::unauthorized("Unauthorized"))
  }
}
