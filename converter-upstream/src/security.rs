//! Security utilities: access credential decoding and shallow ETags.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};

/// Errors raised while decoding the stored access credential.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Access key is empty")]
    Empty,

    #[error("Access key is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Access key is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Decodes the base64-encoded provider access key.
pub fn decode_access_key(encoded: &str) -> Result<String, CredentialError> {
    let encoded = encoded.trim();
    if encoded.is_empty() {
        return Err(CredentialError::Empty);
    }
    let decoded = String::from_utf8(STANDARD.decode(encoded)?)?;
    let decoded = decoded.trim();
    if decoded.is_empty() {
        return Err(CredentialError::Empty);
    }
    Ok(decoded.to_string())
}

/// Computes a strong ETag for a response body (quoted SHA-256 hex).
pub fn shallow_etag(body: &[u8]) -> String {
    let hash = Sha256::digest(body);
    format!("\"{}\"", hex::encode(hash))
}

/// Checks an `If-None-Match` header value against an ETag.
///
/// Handles `*`, comma-separated lists and weak (`W/`) validators.
pub fn etag_matches(if_none_match: &str, etag: &str) -> bool {
    let etag = etag.trim_start_matches("W/");
    if_none_match
        .split(',')
        .map(str::trim)
        .any(|candidate| candidate == "*" || candidate.trim_start_matches("W/") == etag)
}
