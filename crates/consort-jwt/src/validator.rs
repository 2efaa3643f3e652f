//! The token validation pipeline.
//!
//! Stages run in a fixed order and the first failure ends validation:
//!
//! 1. resolve the claimed party from the header `jti`
//! 2. verify the HMAC signature with that party's secret
//! 3. temporal checks: TTL, `iat`, `exp`, `nbf`
//! 4. claim checks: `aud`, `jti`
//!
//! The TTL comes from the verifier's record of the claimed party, never from
//! the token, so changing it in the registry affects already issued tokens.

use crate::claims::{AUDIENCE, Claims, seconds};
use crate::clock::Clock;
use crate::codec::{self, ParsedToken};
use crate::error::TokenError;
use crate::registry::PartyRegistry;
use consort_core::PartyRecord;

/// Validates parsed tokens against a registry at the clock's current time.
pub struct Validator<'a, C: Clock> {
    registry: &'a PartyRegistry,
    clock: &'a C,
}

impl<'a, C: Clock> Validator<'a, C> {
    pub fn new(registry: &'a PartyRegistry, clock: &'a C) -> Self {
        Self { registry, clock }
    }

    /// Run every stage and return the party the token was issued by.
    pub fn validate(
        &self,
        token: &ParsedToken,
        claims: &Claims,
    ) -> Result<&'a PartyRecord, TokenError> {
        let party = self.registry.lookup(&claims.jti)?;

        codec::verify_signature(token, &party.secret)?;
        check_times(claims, party.ttl, self.clock.now())?;
        check_claims(claims, party)?;

        Ok(party)
    }
}

/// Temporal checks relative to `now`, in pipeline order.
pub fn check_times(claims: &Claims, ttl: u64, now: i64) -> Result<(), TokenError> {
    if now.saturating_sub(claims.iat) > seconds(ttl) {
        return Err(TokenError::TimeLimitExceeded);
    }

    if claims.iat > now {
        return Err(TokenError::IssuedAtInFuture);
    }

    if claims.exp < now {
        return Err(TokenError::Expired);
    }

    if claims.nbf > now {
        return Err(TokenError::NotYetUsable);
    }

    Ok(())
}

/// Audience and id checks against the resolved party.
pub fn check_claims(claims: &Claims, party: &PartyRecord) -> Result<(), TokenError> {
    if claims.aud != AUDIENCE {
        return Err(TokenError::InvalidAudience);
    }

    if claims.jti != party.app_id {
        return Err(TokenError::InvalidId);
    }

    Ok(())
}
