//! ID-token claim extraction.
//!
//! The flow controller depends on the [`TokenVerifier`] capability rather
//! than decoding tokens inline, so a deployment can decide how much to trust
//! displayed identity claims by swapping the implementation.

use base64::Engine;
use serde_json::Value;

use crate::error::VerificationError;

/// Capability for turning a raw ID token into claims.
pub trait TokenVerifier: Send + Sync {
    /// Extracts the claims of `id_token`.
    ///
    /// Implementations decide how much of the token to check against
    /// `expected_issuer` and `expected_audience`.
    ///
    /// # Errors
    ///
    /// Returns a [`VerificationError`] if the token cannot be decoded or
    /// fails the implementation's checks.
    fn verify(
        &self,
        id_token: &str,
        expected_issuer: &str,
        expected_audience: &str,
    ) -> Result<Value, VerificationError>;
}

/// Decoder that extracts claims without any signature check.
///
/// This matches the provider-trusting behavior of the original deployment:
/// claims are for display only and MUST NOT be used for authorization
/// decisions. Every decode logs a warning. Swap in a verifying
/// implementation to close the gap.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnverifiedDecoder;

impl TokenVerifier for UnverifiedDecoder {
    fn verify(
        &self,
        id_token: &str,
        _expected_issuer: &str,
        _expected_audience: &str,
    ) -> Result<Value, VerificationError> {
        let claims = decode_claims(id_token)?;
        tracing::warn!("id token claims decoded without signature verification");
        Ok(claims)
    }
}

/// Decodes the payload segment of a compact-serialized token.
///
/// The token is `base64url(header).base64url(payload).signature`; only the
/// payload is parsed, and nothing about the signature is checked.
///
/// # Errors
///
/// Returns a [`VerificationError`] if the token does not have three
/// segments, the payload is not valid base64url, or it is not JSON.
pub fn decode_claims(id_token: &str) -> Result<Value, VerificationError> {
    let parts: Vec<&str> = id_token.split('.').collect();
    if parts.len() != 3 {
        return Err(VerificationError::Malformed {
            reason: "expected three dot-separated segments".to_string(),
        });
    }

    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| VerificationError::Malformed {
            reason: format!("payload is not base64url: {e}"),
        })?;

    serde_json::from_slice(&payload).map_err(|e| VerificationError::Malformed {
        reason: format!("payload is not JSON: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encode_token(claims: &Value) -> String {
        let engine = &base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let header = engine.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = engine.encode(serde_json::to_vec(claims).expect("serialize claims"));
        format!("{header}.{payload}.fakesignature")
    }

    #[test]
    fn decode_claims_extracts_payload() {
        let claims = json!({
            "iss": "https://idp.example",
            "aud": "abc",
            "sub": "user-123",
            "name": "Alice Example"
        });

        let decoded = decode_claims(&encode_token(&claims)).expect("decode");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn decode_claims_rejects_wrong_segment_count() {
        let err = decode_claims("onlyone.two").expect_err("should fail");
        assert!(err.to_string().contains("three"));
    }

    #[test]
    fn decode_claims_rejects_bad_base64() {
        let err = decode_claims("aaa.!!!.ccc").expect_err("should fail");
        assert!(err.to_string().contains("base64url"));
    }

    #[test]
    fn decode_claims_rejects_non_json_payload() {
        let engine = &base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let token = format!("hdr.{}.sig", engine.encode(b"not json"));
        let err = decode_claims(&token).expect_err("should fail");
        assert!(err.to_string().contains("JSON"));
    }

    #[test]
    fn unverified_decoder_passes_claims_through() {
        let claims = json!({"sub": "user-123"});
        let decoded = UnverifiedDecoder
            .verify(&encode_token(&claims), "https://idp.example", "abc")
            .expect("decode");
        assert_eq!(decoded["sub"], "user-123");
    }
}
