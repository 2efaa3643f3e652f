//! The local identity and the table of trusted parties.

use crate::error::TokenError;
use consort_core::{JwtConfig, PartyRecord, Secret};
use deunicode::deunicode;
use std::collections::BTreeMap;
use std::fmt;

/// The local application's issuing identity.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    /// Slugified application name, written to the `iss` claim.
    pub issuer: String,
    pub app_id: String,
    pub secret: Secret,
    /// Lifetime of issued tokens, in seconds.
    pub ttl: u64,
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("issuer", &self.issuer)
            .field("app_id", &self.app_id)
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Read-only lookup of party records by app id.
#[derive(Debug, Clone)]
pub struct PartyRegistry {
    own: Identity,
    parties: BTreeMap<String, PartyRecord>,
}

impl PartyRegistry {
    /// Build a registry from configuration.
    ///
    /// The own identity comes from the root fields of the configuration, not
    /// from the parties table.
    pub fn from_config(config: &JwtConfig) -> Self {
        let own = Identity {
            issuer: slugify(&config.app_name, '_'),
            app_id: config.app_id.clone(),
            secret: config.secret.clone(),
            ttl: config.ttl,
        };

        if !config.parties.contains_key(&config.app_id) {
            tracing::warn!(
                app_id = %config.app_id,
                "Own app id is not listed in parties; self-issued tokens will not verify locally"
            );
        }

        Self {
            own,
            parties: config.parties.clone(),
        }
    }

    pub fn own_identity(&self) -> &Identity {
        &self.own
    }

    /// Look up a party, failing with `PartyNotFound`.
    pub fn lookup(&self, app_id: &str) -> Result<&PartyRecord, TokenError> {
        self.parties
            .get(app_id)
            .ok_or_else(|| TokenError::PartyNotFound {
                app_id: app_id.to_string(),
            })
    }

    pub fn get(&self, app_id: &str) -> Option<&PartyRecord> {
        self.parties.get(app_id)
    }

    pub fn len(&self) -> usize {
        self.parties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PartyRecord> {
        self.parties.values()
    }
}

/// Turn an application name into an issuer slug.
///
/// The name is folded to ASCII and lowercased. Whitespace, `-` and `_` become
/// word breaks, `@` becomes the word `at`, and any other punctuation is
/// dropped. Words are joined with `separator`.
pub fn slugify(name: &str, separator: char) -> String {
    let mut words = String::with_capacity(name.len());

    for c in deunicode(name).chars() {
        if c.is_ascii_alphanumeric() {
            words.push(c.to_ascii_lowercase());
        } else if c == '@' {
            words.push_str(" at ");
        } else if c.is_whitespace() || c == '-' || c == '_' || c == separator {
            words.push(' ');
        }
    }

    words
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(&separator.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig::new("Log App", "log_app", "S2", 300)
            .with_self_party("http://log.local/")
            .with_party(PartyRecord::new("my_app", "http://my-app.local/", "S1", 120))
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Log App", '_'), "log_app");
        assert_eq!(slugify("Application", '_'), "application");
        assert_eq!(slugify("  My--Great   App! ", '_'), "my_great_app");
        assert_eq!(slugify("already_slug", '_'), "already_slug");
        assert_eq!(slugify("", '_'), "");
        assert_eq!(slugify("Über App", '-'), "uber-app");
    }

    #[test]
    fn test_slugify_drops_punctuation() {
        assert_eq!(slugify("Foo.Bar", '_'), "foobar");
        assert_eq!(slugify("O'Brien App", '_'), "obrien_app");
        assert_eq!(slugify("Über App", '_'), "uber_app");
        assert_eq!(slugify("a@b", '_'), "a_at_b");
        assert_eq!(slugify("Log App!", '_'), "log_app");
        assert_eq!(slugify("my-great_app", '_'), "my_great_app");
        assert_eq!(slugify("my-great_app", '-'), "my-great-app");
        assert_eq!(slugify("__Edge__", '_'), "edge");
    }

    #[test]
    fn test_own_identity_from_root_fields() {
        let mut config = config();
        // The parties entry for ourselves must not leak into the identity.
        config.parties.insert(
            "log_app".to_string(),
            PartyRecord::new("log_app", "", "other", 5),
        );

        let registry = PartyRegistry::from_config(&config);
        let own = registry.own_identity();
        assert_eq!(own.issuer, "log_app");
        assert_eq!(own.app_id, "log_app");
        assert_eq!(own.secret.as_bytes(), b"S2");
        assert_eq!(own.ttl, 300);
    }

    #[test]
    fn test_lookup() {
        let registry = PartyRegistry::from_config(&config());

        let party = registry.lookup("my_app").unwrap();
        assert_eq!(party.ttl, 120);
        assert_eq!(registry.len(), 2);

        let err = registry.lookup("unknown_app").unwrap_err();
        assert_eq!(
            err,
            TokenError::PartyNotFound {
                app_id: "unknown_app".into()
            }
        );
        assert!(registry.get("unknown_app").is_none());
    }

    #[test]
    fn test_identity_debug_redacts_secret() {
        let registry = PartyRegistry::from_config(&config());
        let printed = format!("{:?}", registry.own_identity());
        assert!(!printed.contains("S2"));
    }
}
