//! Party records and secret key material.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default token lifetime in seconds.
pub const DEFAULT_TTL: u64 = 300;

/// HMAC key bytes.
///
/// Never printed by `Debug`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Secret(Vec<u8>);

impl Secret {
    /// Create a secret from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The secret as text, for display on explicit request only.
    pub fn expose(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<Secret> for String {
    fn from(value: Secret) -> Self {
        value.expose()
    }
}

/// A trusted application: its id, base URL, signing secret and token lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PartyEntry")]
pub struct PartyRecord {
    /// Application id, also the key of this record in the parties table.
    pub app_id: String,

    /// Base URL of the application.
    pub url: String,

    /// Secret the application signs its tokens with.
    pub secret: Secret,

    /// Token lifetime in seconds, enforced when verifying this party's tokens.
    pub ttl: u64,
}

impl PartyRecord {
    pub fn new(
        app_id: impl Into<String>,
        url: impl Into<String>,
        secret: impl Into<Secret>,
        ttl: u64,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            url: url.into(),
            secret: secret.into(),
            ttl,
        }
    }
}

/// Accepted on-disk shapes of a party record.
///
/// The positional form `[app_id, url, secret, ttl]` is the legacy layout.
#[derive(Deserialize)]
#[serde(untagged)]
enum PartyEntry {
    Positional(String, String, Secret, u64),
    Named {
        app_id: String,
        #[serde(default)]
        url: String,
        secret: Secret,
        #[serde(default = "default_ttl")]
        ttl: u64,
    },
}

impl From<PartyEntry> for PartyRecord {
    fn from(entry: PartyEntry) -> Self {
        match entry {
            PartyEntry::Positional(app_id, url, secret, ttl) => Self {
                app_id,
                url,
                secret,
                ttl,
            },
            PartyEntry::Named {
                app_id,
                url,
                secret,
                ttl,
            } => Self {
                app_id,
                url,
                secret,
                ttl,
            },
        }
    }
}

pub(crate) fn default_ttl() -> u64 {
    DEFAULT_TTL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_party_record() {
        let record: PartyRecord =
            serde_yaml::from_str(r#"[my_app, "http://my-app.local/", s3cr3t, 120]"#).unwrap();

        assert_eq!(record.app_id, "my_app");
        assert_eq!(record.url, "http://my-app.local/");
        assert_eq!(record.secret.as_bytes(), b"s3cr3t");
        assert_eq!(record.ttl, 120);
    }

    #[test]
    fn test_named_party_record_defaults() {
        let record: PartyRecord = serde_yaml::from_str("app_id: log_app\nsecret: abc\n").unwrap();

        assert_eq!(record.app_id, "log_app");
        assert_eq!(record.url, "");
        assert_eq!(record.ttl, DEFAULT_TTL);
    }

    #[test]
    fn test_positional_record_wrong_arity_rejected() {
        let result: Result<PartyRecord, _> = serde_yaml::from_str("[my_app, url, secret]");
        assert!(result.is_err());
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = Secret::from("hunter2");
        let printed = format!("{:?}", secret);
        assert!(!printed.contains("hunter2"));
        assert_eq!(secret.expose(), "hunter2");
    }

    #[test]
    fn test_party_record_serializes_named() {
        let record = PartyRecord::new("a", "http://a/", "k", 60);
        let yaml = serde_yaml::to_string(&record).unwrap();
        assert!(yaml.contains("app_id: a"));
        assert!(yaml.contains("secret: k"));

        let back: PartyRecord = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, record);
    }
}
