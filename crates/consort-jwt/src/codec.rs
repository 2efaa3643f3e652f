//! Compact JWT encoding and structural decoding.
//!
//! Tokens are three base64url segments (header, payload, signature) signed
//! with HMAC-SHA256. The header carries the issuing app id as `jti` next to
//! the usual `typ` and `alg`; decoding treats that header copy as
//! authoritative.

use crate::claims::{ClaimSet, Claims};
use crate::error::TokenError;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use consort_core::Secret;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, crypto};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The only signing algorithm issued and accepted.
pub const ALGORITHM: &str = "HS256";

/// JOSE header of a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,

    pub alg: String,

    /// Issuing app id, replicated from the payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

/// A structurally valid token whose signature and claims are not yet checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedToken {
    header: TokenHeader,
    payload: Map<String, Value>,
    signing_input: String,
    signature: String,
}

impl ParsedToken {
    pub fn header(&self) -> &TokenHeader {
        &self.header
    }

    /// The decoded payload, as sent.
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.payload.get(name)
    }

    /// The app id from the header, if present.
    pub fn id(&self) -> Option<&str> {
        self.header.jti.as_deref()
    }

    /// The `header.payload` text the signature covers.
    pub fn signing_input(&self) -> &str {
        &self.signing_input
    }

    /// The base64url signature segment.
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

impl fmt::Display for ParsedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.signing_input, self.signature)
    }
}

/// Serialize and sign a claim set.
pub fn encode(claims: &ClaimSet, secret: &Secret) -> Result<String, TokenError> {
    let header = TokenHeader {
        typ: Some("JWT".to_string()),
        alg: ALGORITHM.to_string(),
        jti: Some(claims.id.clone()),
    };

    let header = encode_segment(&header)?;
    let payload = encode_segment(claims)?;
    let signing_input = format!("{}.{}", header, payload);

    let signature = crypto::sign(
        signing_input.as_bytes(),
        &EncodingKey::from_secret(secret.as_bytes()),
        Algorithm::HS256,
    )
    .map_err(|e| TokenError::Configuration(format!("failed to sign token: {}", e)))?;

    Ok(format!("{}.{}", signing_input, signature))
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let json = serde_json::to_vec(value)
        .map_err(|e| TokenError::Configuration(format!("failed to serialize token: {}", e)))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Split a compact token and decode its header and payload.
///
/// Nothing is verified here.
pub fn decode(token: &str) -> Result<ParsedToken, TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [header_b64, payload_b64, signature] = segments.as_slice() else {
        return Err(TokenError::parse(format!(
            "expected 3 dot-separated segments, found {}",
            segments.len()
        )));
    };

    let header = decode_object(header_b64, "header")?;
    let payload = decode_object(payload_b64, "payload")?;

    if !signature
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err(TokenError::parse("signature is not base64url"));
    }

    let header: TokenHeader = serde_json::from_value(Value::Object(header))
        .map_err(|e| TokenError::parse(format!("invalid header: {}", e)))?;

    Ok(ParsedToken {
        header,
        payload,
        signing_input: format!("{}.{}", header_b64, payload_b64),
        signature: signature.to_string(),
    })
}

fn decode_object(segment: &str, what: &str) -> Result<Map<String, Value>, TokenError> {
    if segment.is_empty() {
        return Err(TokenError::parse(format!("empty {} segment", what)));
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| TokenError::parse(format!("{} is not base64url: {}", what, e)))?;

    match serde_json::from_slice(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(TokenError::parse(format!("{} is not a JSON object", what))),
        Err(e) => Err(TokenError::parse(format!("{} is not JSON: {}", what, e))),
    }
}

/// Read the claims of a parsed token, taking `jti` from the header.
pub fn extract_claims(token: &ParsedToken) -> Result<Claims, TokenError> {
    let jti = token
        .id()
        .ok_or_else(|| TokenError::parse("missing header field `jti`"))?
        .to_string();

    let mut claims: Claims = serde_json::from_value(Value::Object(token.payload.clone()))
        .map_err(|e| TokenError::parse(format!("invalid claims: {}", e)))?;
    claims.jti = jti;

    Ok(claims)
}

/// Check the token's signature against `secret` in constant time.
pub fn verify_signature(token: &ParsedToken, secret: &Secret) -> Result<(), TokenError> {
    if token.header.alg != ALGORITHM {
        return Err(TokenError::InvalidSignature);
    }

    match crypto::verify(
        &token.signature,
        token.signing_input.as_bytes(),
        &DecodingKey::from_secret(secret.as_bytes()),
        Algorithm::HS256,
    ) {
        Ok(true) => Ok(()),
        _ => Err(TokenError::InvalidSignature),
    }
}
