//! The `JwtService` facade.

use crate::claims::{ClaimSet, Claims};
use crate::clock::{Clock, SystemClock};
use crate::codec::{self, ParsedToken};
use crate::error::TokenError;
use crate::registry::{Identity, PartyRegistry};
use crate::validator::Validator;
use consort_core::{JwtConfig, PartyRecord};

/// A token given either as compact text or already parsed.
#[derive(Debug, Clone, Copy)]
pub enum TokenSource<'a> {
    Raw(&'a str),
    Parsed(&'a ParsedToken),
}

impl<'a> From<&'a str> for TokenSource<'a> {
    fn from(token: &'a str) -> Self {
        Self::Raw(token)
    }
}

impl<'a> From<&'a String> for TokenSource<'a> {
    fn from(token: &'a String) -> Self {
        Self::Raw(token)
    }
}

impl<'a> From<&'a ParsedToken> for TokenSource<'a> {
    fn from(token: &'a ParsedToken) -> Self {
        Self::Parsed(token)
    }
}

/// Issues tokens for the local application and validates tokens from any
/// known party.
///
/// Immutable after construction; share it freely between threads.
#[derive(Debug)]
pub struct JwtService<C: Clock = SystemClock> {
    registry: PartyRegistry,
    clock: C,
}

impl JwtService<SystemClock> {
    /// Create a service reading wall-clock time.
    pub fn new(config: &JwtConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> JwtService<C> {
    pub fn with_clock(config: &JwtConfig, clock: C) -> Self {
        Self {
            registry: PartyRegistry::from_config(config),
            clock,
        }
    }

    /// Build and sign a token for the local application.
    pub fn build_token(&self) -> Result<String, TokenError> {
        let own = self.registry.own_identity();

        if own.app_id.is_empty() {
            return Err(TokenError::Configuration("app_id is not set".to_string()));
        }
        if own.secret.is_empty() {
            return Err(TokenError::Configuration(format!(
                "secret for '{}' is not set",
                own.app_id
            )));
        }

        let claims = ClaimSet::issue(own, self.clock.now());
        let token = codec::encode(&claims, &own.secret)?;

        tracing::debug!(app_id = %own.app_id, exp = claims.expires_at, "Issued token");
        Ok(token)
    }

    /// Validate a token, returning its claims on success.
    ///
    /// The error names the first stage that failed.
    pub fn check_valid(&self, token: &str) -> Result<Claims, TokenError> {
        match self.validate(token) {
            Ok(claims) => {
                tracing::debug!(app_id = %claims.jti, "Token verified");
                Ok(claims)
            }
            Err(e) => {
                tracing::warn!(kind = ?e.kind(), error = %e, "Token validation failed");
                Err(e)
            }
        }
    }

    fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        if token.is_empty() {
            return Err(TokenError::TokenRequired);
        }

        let parsed = codec::decode(token)?;
        let claims = codec::extract_claims(&parsed)?;
        Validator::new(&self.registry, &self.clock).validate(&parsed, &claims)?;

        Ok(claims)
    }

    /// Whether a token passes validation. Any error counts as invalid.
    pub fn is_valid(&self, token: &str) -> bool {
        self.check_valid(token).is_ok()
    }

    /// Decode a token without verifying it.
    pub fn parse(&self, token: &str) -> Result<ParsedToken, TokenError> {
        codec::decode(token)
    }

    /// Read a token's claims without verifying it.
    pub fn get_claims<'t>(&self, token: impl Into<TokenSource<'t>>) -> Result<Claims, TokenError> {
        match token.into() {
            TokenSource::Raw("") => Err(TokenError::TokenRequired),
            TokenSource::Raw(raw) => codec::extract_claims(&codec::decode(raw)?),
            TokenSource::Parsed(parsed) => codec::extract_claims(parsed),
        }
    }

    /// The local issuing identity.
    pub fn info(&self) -> &Identity {
        self.registry.own_identity()
    }

    /// Look up a party without failing.
    pub fn party(&self, app_id: &str) -> Option<&PartyRecord> {
        self.registry.get(app_id)
    }

    pub fn registry(&self) -> &PartyRegistry {
        &self.registry
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
