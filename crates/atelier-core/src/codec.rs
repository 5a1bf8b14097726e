//! # Serialization Codec
//!
//! The two outward forms of a [`Configuration`]: a compact URL token for
//! share links and pretty JSON for file export.
//!
//! ## URL Token Pipeline
//! ```text
//!   encode                                                 decode
//!   ──────                                                 ──────
//!   Configuration                                          token
//!        │ serde_json::to_string                             │ base64 STANDARD
//!        ▼                                                   ▼
//!   compact JSON                                           bytes
//!        │ urlencoding::encode (UTF-8 → %XX, ASCII-safe)     │ from_utf8
//!        ▼                                                   ▼
//!   percent-encoded                                        percent-encoded
//!        │ base64 STANDARD                                   │ urlencoding::decode
//!        ▼                                                   ▼
//!   token  ──► "#cfg=" + token                             JSON text
//!                                                            │ serde_json
//!                                                            ▼
//!                                                          raw Value ──► validate()
//! ```
//!
//! Decoding yields raw JSON, not a `Configuration`: whatever comes back from
//! a link or a file is untrusted and goes through the validator.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::Value;

use crate::config::Configuration;
use crate::error::{CoreError, CoreResult, TokenStage};
use crate::URL_FRAGMENT_PREFIX;

// =============================================================================
// URL Token
// =============================================================================

/// Encodes a configuration as a URL-safe-ish token.
///
/// The percent-encoding step makes any non-ASCII text (font names, say)
/// survive the base64 step intact.
pub fn encode(config: &Configuration) -> String {
    encode_text(&compact_json(config))
}

/// Encodes arbitrary JSON the same way. A link built from a partial or
/// hand-written payload decodes to that payload.
pub fn encode_raw(raw: &Value) -> String {
    encode_text(&raw.to_string())
}

fn encode_text(json: &str) -> String {
    let escaped = urlencoding::encode(json);
    STANDARD.encode(escaped.as_bytes())
}

/// Reverses [`encode`], reporting the stage that failed.
pub fn decode(token: &str) -> CoreResult<Value> {
    let bytes = STANDARD
        .decode(token.trim())
        .map_err(|e| CoreError::invalid_token(TokenStage::Base64, e.to_string()))?;

    let escaped = String::from_utf8(bytes)
        .map_err(|e| CoreError::invalid_token(TokenStage::Utf8, e.to_string()))?;

    let json = urlencoding::decode(&escaped)
        .map_err(|e| CoreError::invalid_token(TokenStage::PercentEncoding, e.to_string()))?;

    serde_json::from_str(&json)
        .map_err(|e| CoreError::invalid_token(TokenStage::Json, e.to_string()))
}

/// Decodes a token, collapsing every failure into "absent".
///
/// Startup uses this: a bad link silently falls back to the stored or
/// default configuration.
pub fn decode_or_none(token: &str) -> Option<Value> {
    decode(token).ok()
}

/// Builds the URL fragment (`#cfg=<token>`) for a token.
pub fn fragment_for(token: &str) -> String {
    format!("{}{}", URL_FRAGMENT_PREFIX, token)
}

/// Extracts the token from a URL fragment, or from a full URL carrying one.
///
/// ## Example
/// ```rust
/// use atelier_core::codec::parse_fragment;
///
/// assert_eq!(parse_fragment("#cfg=abc"), Some("abc"));
/// assert_eq!(parse_fragment("https://shop.test/chair#cfg=abc"), Some("abc"));
/// assert_eq!(parse_fragment("#other"), None);
/// assert_eq!(parse_fragment("#cfg="), None);
/// ```
pub fn parse_fragment(input: &str) -> Option<&str> {
    let hash = &input[input.find('#')?..];
    hash.strip_prefix(URL_FRAGMENT_PREFIX)
        .filter(|token| !token.is_empty())
}

// =============================================================================
// File Form
// =============================================================================

/// Pretty-printed JSON (2-space indent) for `ui-config.json`.
pub fn to_file_text(config: &Configuration) -> String {
    serde_json::to_string_pretty(config).unwrap_or_else(|_| compact_json(config))
}

/// Parses imported file text into raw JSON.
///
/// ## Errors
/// [`CoreError::InvalidFormat`] when the text is not JSON. This is the only
/// failure the user ever sees from an import.
pub fn from_file_text(text: &str) -> CoreResult<Value> {
    serde_json::from_str(text).map_err(|e| CoreError::invalid_format(e.to_string()))
}

// Configuration holds only strings, integers, booleans and unit enums, for
// which serde_json cannot fail.
fn compact_json(config: &Configuration) -> String {
    serde_json::to_string(config).unwrap_or_default()
}

// =============================================================================
// Unit Tests
// =============================================================================
