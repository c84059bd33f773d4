use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;

use super::claims::Claims;
use super::errors::TokenError;
use crate::keys::KeyPair;
use crate::keys::PublicKey;

/// Name of the only algorithm accepted in token headers.
pub const PINNED_ALGORITHM: &str = "RS256";

/// Token codec for signing and verifying compact JWS tokens.
///
/// The algorithm is pinned to RS256. The header of an incoming token is
/// checked against the pinned algorithm before any verification, so the
/// token can never choose how it is verified.
///
/// Decoding verifies structure, algorithm and signature only. Time-bound
/// claims (exp, nbf) are left to the caller.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    algorithm: Algorithm,
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

impl TokenCodec {
    pub fn new() -> Self {
        Self {
            algorithm: Algorithm::RS256,
        }
    }

    /// Sign claims into a compact token.
    ///
    /// # Errors
    /// * `SigningFailed` - The signing operation failed
    pub fn encode(&self, key: &KeyPair, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        jsonwebtoken::encode(&header, claims, key.encoding_key())
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    /// * `MalformedToken` - Fewer than three segments, or header/payload are
    ///   not base64url encoded JSON objects
    /// * `UnsupportedAlgorithm` - Header declares anything but RS256
    /// * `SignatureMismatch` - Signature does not verify under `public_key`
    pub fn decode(&self, public_key: &PublicKey, token: &str) -> Result<Claims, TokenError> {
        // Anything after the second dot belongs to the signature
        let mut segments = token.splitn(3, '.');
        let (header, payload, signature) =
            match (segments.next(), segments.next(), segments.next()) {
                (Some(header), Some(payload), Some(signature)) => (header, payload, signature),
                _ => {
                    return Err(TokenError::MalformedToken(
                        "expected three dot-separated segments".to_string(),
                    ))
                }
            };

        let header: RawHeader = serde_json::from_value(decode_segment("header", header)?)
            .map_err(|e| TokenError::MalformedToken(format!("header: {}", e)))?;
        if header.alg != PINNED_ALGORITHM {
            return Err(TokenError::UnsupportedAlgorithm(header.alg));
        }

        decode_segment("payload", payload)?;

        // The signature is opaque bytes: anything that is not a valid
        // signature over header.payload is a mismatch.
        match URL_SAFE_NO_PAD.decode(signature) {
            Ok(bytes) if !bytes.is_empty() => {}
            _ => return Err(TokenError::SignatureMismatch),
        }

        let mut validation = Validation::new(self.algorithm);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        jsonwebtoken::decode::<Claims>(token, public_key.decoding_key(), &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::SignatureMismatch,
                ErrorKind::InvalidAlgorithm => {
                    TokenError::UnsupportedAlgorithm(PINNED_ALGORITHM.to_string())
                }
                _ => TokenError::MalformedToken(e.to_string()),
            })
    }
}

impl Default for TokenCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_segment(name: &str, segment: &str) -> Result<serde_json::Value, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| TokenError::MalformedToken(format!("{} is not base64url: {}", name, e)))?;

    let value: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::MalformedToken(format!("{} is not JSON: {}", name, e)))?;

    if !value.is_object() {
        return Err(TokenError::MalformedToken(format!(
            "{} is not a JSON object",
            name
        )));
    }

    Ok(value)
}
