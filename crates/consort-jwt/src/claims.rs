//! Token claims.

use crate::registry::Identity;
use serde::{Deserialize, Serialize};

/// The only audience tokens are issued for and accepted with.
pub const AUDIENCE: &str = "apis";

/// Claims written into the payload of an issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSet {
    #[serde(rename = "iss")]
    pub issuer: String,

    #[serde(rename = "aud")]
    pub audience: String,

    /// Issuing app id. Also replicated into the header.
    #[serde(rename = "jti")]
    pub id: String,

    #[serde(rename = "iat")]
    pub issued_at: i64,

    #[serde(rename = "nbf")]
    pub not_before: i64,

    #[serde(rename = "exp")]
    pub expires_at: i64,

    /// Issuing app id.
    pub uid: String,
}

impl ClaimSet {
    /// Claims for a token issued by `identity` at `now`.
    ///
    /// Expiration uses the issuer's own TTL.
    pub fn issue(identity: &Identity, now: i64) -> Self {
        Self {
            issuer: identity.issuer.clone(),
            audience: AUDIENCE.to_string(),
            id: identity.app_id.clone(),
            issued_at: now,
            not_before: now,
            expires_at: now.saturating_add(seconds(identity.ttl)),
            uid: identity.app_id.clone(),
        }
    }
}

/// Claims read back from a token.
///
/// `jti` is taken from the token header; a payload `jti` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub aud: String,
    #[serde(skip_deserializing)]
    pub jti: String,
    pub uid: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

/// A TTL as signed seconds, saturating on overflow.
pub(crate) fn seconds(ttl: u64) -> i64 {
    i64::try_from(ttl).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use consort_core::Secret;

    fn identity() -> Identity {
        Identity {
            issuer: "application".into(),
            app_id: "my_app".into(),
            secret: Secret::from("S1"),
            ttl: 300,
        }
    }

    #[test]
    fn test_issue_sets_times_from_build_time() {
        let claims = ClaimSet::issue(&identity(), 1_700_000_000);

        assert_eq!(claims.issued_at, 1_700_000_000);
        assert_eq!(claims.not_before, claims.issued_at);
        assert_eq!(claims.expires_at, 1_700_000_300);
        assert_eq!(claims.audience, AUDIENCE);
        assert_eq!(claims.id, "my_app");
        assert_eq!(claims.uid, "my_app");
        assert_eq!(claims.issuer, "application");
    }

    #[test]
    fn test_issue_saturates_huge_ttl() {
        let mut identity = identity();
        identity.ttl = u64::MAX;

        let claims = ClaimSet::issue(&identity, 10);
        assert_eq!(claims.expires_at, i64::MAX);
    }

    #[test]
    fn test_claim_set_wire_names() {
        let value = serde_json::to_value(ClaimSet::issue(&identity(), 1)).unwrap();
        for name in ["iss", "aud", "jti", "iat", "nbf", "exp", "uid"] {
            assert!(value.get(name).is_some(), "missing {}", name);
        }
    }

    #[test]
    fn test_claims_ignore_payload_jti() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "iss": "a", "aud": "apis", "jti": "payload", "uid": "a",
            "iat": 1, "nbf": 1, "exp": 2
        }))
        .unwrap();
        assert!(claims.jti.is_empty());
    }
}
