//! Token commands.
//!
//! `consort token build` - Build a token for the local application.
//! `consort token verify` - Verify a token from any trusted party.
//! `consort token inspect` - Show a token's header and claims without verifying.

use super::read_token;
use anyhow::Context;
use chrono::{DateTime, Utc};
use consort_core::JwtConfig;
use consort_jwt::{JwtService, codec};
use std::fs;
use std::path::PathBuf;

fn format_time(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| timestamp.to_string())
}

/// Build a token and print it or write it to `output`.
pub fn build(config: &JwtConfig, output: Option<PathBuf>) -> anyhow::Result<()> {
    let service = JwtService::new(config);
    let token = service.build_token()?;

    if let Some(output_path) = output {
        fs::write(&output_path, &token)
            .with_context(|| format!("Failed to write token to {}", output_path.display()))?;
        println!("✔ Token written to: {}", output_path.display());
        println!("  Issuer: {}", service.info().issuer);
        println!("  App id: {}", service.info().app_id);
        println!("  TTL: {}s", service.info().ttl);
    } else {
        println!("{}", token);
    }

    Ok(())
}

/// Verify a token. Returns whether it is valid.
pub fn verify(config: &JwtConfig, token: String) -> anyhow::Result<bool> {
    let service = JwtService::new(config);
    let token = read_token(token)?;

    match service.check_valid(&token) {
        Ok(claims) => {
            println!("✔ Token is valid");
            println!();
            println!("Token Details:");
            println!("  Issuer: {}", claims.iss);
            println!("  App id: {}", claims.jti);
            println!("  Issued at: {}", format_time(claims.iat));
            println!("  Expires: {}", format_time(claims.exp));
            Ok(true)
        }
        Err(e) => {
            println!("✖ Token verification failed: {}", e);
            Ok(false)
        }
    }
}

/// Print a token's header and claims without verifying it.
pub fn inspect(token: String) -> anyhow::Result<()> {
    let token = read_token(token)?;
    let parsed = codec::decode(&token)?;

    println!("Header:");
    println!("{}", serde_json::to_string_pretty(parsed.header())?);
    println!();
    println!("Payload:");
    println!("{}", serde_json::to_string_pretty(parsed.payload())?);

    if let Ok(claims) = codec::extract_claims(&parsed) {
        println!();
        println!("  Issued at: {}", format_time(claims.iat));
        println!("  Not before: {}", format_time(claims.nbf));
        println!("  Expires: {}", format_time(claims.exp));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use consort_core::PartyRecord;
    use tempfile::tempdir;

    fn my_app() -> JwtConfig {
        JwtConfig::new("Application", "my_app", "S1", 300).with_self_party("http://my-app/")
    }

    fn log_app() -> JwtConfig {
        JwtConfig::new("Log App", "log_app", "S2", 300)
            .with_self_party("http://log/")
            .with_party(PartyRecord::new("my_app", "http://my-app/", "S1", 300))
    }

    #[test]
    fn test_build_and_verify_via_file() {
        let dir = tempdir().unwrap();
        let token_path = dir.path().join("token.jwt");

        build(&my_app(), Some(token_path.clone())).unwrap();
        assert!(token_path.exists());

        let path_arg = token_path.to_string_lossy().to_string();
        assert!(verify(&log_app(), path_arg.clone()).unwrap());
        inspect(path_arg).unwrap();
    }

    #[test]
    fn test_verify_rejects_unknown_issuer() {
        let token = JwtService::new(&log_app()).build_token().unwrap();
        assert!(!verify(&my_app(), token).unwrap());
    }

    #[test]
    fn test_inspect_rejects_garbage() {
        assert!(inspect("not-a-token".to_string()).is_err());
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "1970-01-01T00:00:00+00:00");
    }
}
