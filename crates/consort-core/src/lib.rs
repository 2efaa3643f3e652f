//! # consort-core
//!
//! Configuration types shared across the Consort crates.
//!
//! A Consort deployment is a set of independent applications ("parties") that
//! issue HMAC-signed JWTs to each other. Each application knows its own
//! identity and a table of every party it trusts. This crate models that
//! table and loads it from YAML; the token engine in `consort-jwt` consumes
//! the already-parsed [`JwtConfig`] and performs no file I/O itself.

pub mod config;

pub use config::{ConfigError, ConsortConfig, JwtConfig, PartyRecord, Secret};
