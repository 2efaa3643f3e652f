//! # consort-jwt
//!
//! HMAC-signed JWTs between independent applications that trust each other.
//!
//! Every application ("party") holds its own app id, secret and token TTL,
//! plus a registry of the parties it accepts tokens from. Issuing signs with
//! the local secret; verifying looks up the claimed issuer by the `jti` header
//! and checks the signature with that party's secret, so no central authority
//! is consulted at verification time.
//!
//! ## Validation order
//!
//! | Stage | Failure |
//! |-------|---------|
//! | Token present | `TokenRequired` |
//! | Structure | `Parse` |
//! | Party lookup | `PartyNotFound` |
//! | Signature | `InvalidSignature` |
//! | `now - iat > ttl` | `TimeLimitExceeded` |
//! | `iat > now` | `IssuedAtInFuture` |
//! | `exp < now` | `Expired` |
//! | `nbf > now` | `NotYetUsable` |
//! | `aud` | `InvalidAudience` |
//! | `jti` | `InvalidId` |
//!
//! ## Example
//!
//! ```
//! use consort_core::{JwtConfig, PartyRecord};
//! use consort_jwt::JwtService;
//!
//! let my_app = JwtConfig::new("Application", "my_app", "S1", 300).with_self_party("");
//! let log_app = JwtConfig::new("Log App", "log_app", "S2", 300)
//!     .with_self_party("")
//!     .with_party(PartyRecord::new("my_app", "", "S1", 300));
//!
//! let token = JwtService::new(&my_app).build_token().unwrap();
//! assert!(JwtService::new(&log_app).check_valid(&token).is_ok());
//! ```

pub mod claims;
pub mod clock;
pub mod codec;
pub mod error;
pub mod registry;
pub mod service;
pub mod validator;

pub use claims::{AUDIENCE, ClaimSet, Claims};
pub use clock::{Clock, FixedClock, SystemClock};
pub use codec::{ParsedToken, TokenHeader};
pub use error::{ErrorKind, TokenError};
pub use registry::{Identity, PartyRegistry, slugify};
pub use service::{JwtService, TokenSource};
pub use validator::Validator;
