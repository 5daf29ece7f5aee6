//! Webhook signature verification.
//!
//! The provider sends `Stripe-Signature: t=<unix>,v1=<hex>[,v1=<hex>...]`. The expected
//! signature is the hex HMAC-SHA256 of `"{t}.{raw body}"` keyed by the endpoint secret.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::service::PaymentError;

type HmacSha256 = Hmac<Sha256>;

/// Maximum accepted age of a signed payload, in seconds.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Computes the `v1` signature for a payload at a given timestamp.
pub fn compute_signature(payload: &[u8], secret: &str, timestamp: i64) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Builds a complete signature header, as the provider would send it.
pub fn signature_header(payload: &[u8], secret: &str, timestamp: i64) -> String {
    format!(
        "t={},v1={}",
        timestamp,
        compute_signature(payload, secret, timestamp)
    )
}

/// Verifies `header` against `payload`.
///
/// Any `v1` entry may match; comparison is constant-time.
///
/// # Errors
///
/// Returns [`PaymentError::InvalidSignature`] if the header is malformed, the timestamp is
/// outside the tolerance window, or no signature matches.
pub fn verify(
    payload: &[u8],
    header: &str,
    secret: &str,
    now: i64,
    tolerance_secs: i64,
) -> Result<(), PaymentError> {
    if secret.is_empty() {
        return Err(PaymentError::InvalidSignature(
            "webhook secret is not configured".to_string(),
        ));
    }

    let mut timestamp: Option<i64> = None;
    let mut signatures: Vec<Vec<u8>> = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => timestamp = value.parse().ok(),
            "v1" => {
                if let Ok(bytes) = hex::decode(value) {
                    signatures.push(bytes);
                }
            }
            _ => {}
        }
    }

    let timestamp = timestamp
        .ok_or_else(|| PaymentError::InvalidSignature("missing timestamp".to_string()))?;

    if signatures.is_empty() {
        return Err(PaymentError::InvalidSignature(
            "no v1 signature in header".to_string(),
        ));
    }

    if (now - timestamp).abs() > tolerance_secs {
        return Err(PaymentError::InvalidSignature(
            "timestamp outside tolerance".to_string(),
        ));
    }

    let matched = signatures.iter().any(|candidate| {
        let mut mac =
            HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        mac.verify_slice(candidate).is_ok()
    });

    if matched {
        Ok(())
    } else {
        Err(PaymentError::InvalidSignature(
            "no matching signature".to_string(),
        ))
    }
}
