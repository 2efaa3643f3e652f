//! Identity commands.
//!
//! `consort info` - Show the local issuing identity.
//! `consort party <APP_ID>` - Show a trusted party.

use consort_core::JwtConfig;
use consort_jwt::JwtService;

/// Print the local identity.
pub fn info(config: &JwtConfig, show_secret: bool) -> anyhow::Result<()> {
    let service = JwtService::new(config);
    let own = service.info();

    println!("Identity:");
    println!("  Issuer: {}", own.issuer);
    println!("  App id: {}", own.app_id);
    println!("  TTL: {}s", own.ttl);
    if show_secret {
        println!("  Secret: {}", own.secret.expose());
    } else {
        println!("  Secret: <hidden, use --show-secret>");
    }
    println!();
    println!("Trusted parties: {}", service.registry().len());
    for party in service.registry().iter() {
        println!("  {} ({}) ttl={}s", party.app_id, party.url, party.ttl);
    }

    Ok(())
}

/// Print a party record. Returns whether the party exists.
pub fn party(config: &JwtConfig, app_id: &str) -> bool {
    let service = JwtService::new(config);

    match service.party(app_id) {
        Some(party) => {
            println!("Party: {}", party.app_id);
            println!("  URL: {}", party.url);
            println!("  TTL: {}s", party.ttl);
            true
        }
        None => {
            println!("✖ Party not found: {}", app_id);
            false
        }
    }
}
