//! URL-fragment codec for sync payloads.
//!
//! Wire form: `v1.` followed by URL-safe unpadded base64 of zstd-compressed
//! JSON. The public `compress`/`decompress` pair never fails loudly: any
//! problem is logged and reported as `None`, so a bad link can be shown to the
//! player as "corrupted" without further detail.

use std::io::Read;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use tracing::warn;

use crate::errors::CodecError;
use crate::sync::payload::SyncPayload;

/// Prefix identifying the encoding scheme.
pub const CODEC_VERSION_TAG: &str = "v1.";

const ZSTD_LEVEL: i32 = 19;

/// Upper bound on the payload JSON size, enforced when encoding and decoding.
pub const MAX_DECODED_BYTES: usize = 1 << 20;

/// Encode `payload` for the URL fragment, or `None` if encoding fails.
pub fn compress(payload: &SyncPayload) -> Option<String> {
    match try_compress(payload) {
        Ok(fragment) => Some(fragment),
        Err(err) => {
            warn!(kind = payload.kind(), error = %err, "failed to encode sync payload");
            None
        }
    }
}

/// Decode a fragment (with or without its leading `#`), or `None` if it is
/// corrupt, truncated or fails validation.
pub fn decompress(fragment: &str) -> Option<SyncPayload> {
    match try_decompress(fragment) {
        Ok(payload) => Some(payload),
        Err(err) => {
            warn!(len = fragment.len(), error = %err, "failed to decode sync payload");
            None
        }
    }
}

pub fn try_compress(payload: &SyncPayload) -> Result<String, CodecError> {
    let json = serde_json::to_vec(payload)?;
    if json.len() > MAX_DECODED_BYTES {
        return Err(oversized());
    }
    let packed = zstd::encode_all(json.as_slice(), ZSTD_LEVEL)?;

    let mut fragment = String::with_capacity(CODEC_VERSION_TAG.len() + packed.len() * 4 / 3 + 4);
    fragment.push_str(CODEC_VERSION_TAG);
    URL_SAFE_NO_PAD.encode_string(&packed, &mut fragment);
    Ok(fragment)
}

pub fn try_decompress(fragment: &str) -> Result<SyncPayload, CodecError> {
    let fragment = fragment.trim();
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let body = fragment
        .strip_prefix(CODEC_VERSION_TAG)
        .ok_or(CodecError::UnknownVersion)?;

    let packed = URL_SAFE_NO_PAD.decode(body)?;
    let json = inflate(&packed)?;
    let payload: SyncPayload = serde_json::from_slice(&json)?;
    payload.validate().map_err(CodecError::Invalid)?;
    Ok(payload)
}

fn inflate(packed: &[u8]) -> Result<Vec<u8>, CodecError> {
    let decoder = zstd::stream::read::Decoder::new(packed)?;
    let mut json = Vec::new();
    decoder
        .take(MAX_DECODED_BYTES as u64 + 1)
        .read_to_end(&mut json)?;

    if json.len() > MAX_DECODED_BYTES {
        return Err(oversized());
    }
    Ok(json)
}

fn oversized() -> CodecError {
    CodecError::Invalid(format!("payload JSON exceeds {MAX_DECODED_BYTES} bytes"))
}
