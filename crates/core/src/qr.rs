//! Parsing of the digital meal token shown by the student app.
//!
//! The app encodes `{"uid": "<user uuid>", "t": <unix millis>}` as a QR code.
//! The timestamp is carried along for display; freshness is not enforced.

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::UserId;

/// Maximum accepted length of a scanned payload.
pub const MAX_QR_PAYLOAD_LEN: usize = 512;

/// Decoded meal token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QrToken {
    pub uid: UserId,
    #[serde(default)]
    pub t: Option<i64>,
}

/// Parse the raw text decoded from a QR code.
pub fn parse_qr_token(raw: &str) -> Result<QrToken, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() || raw.len() > MAX_QR_PAYLOAD_LEN {
        return Err(CoreError::Validation("Invalid QR code format".to_string()));
    }
    serde_json::from_str(raw)
        .map_err(|e| CoreError::Validation(format!("Invalid QR code format: {e}")))
}
