//! Mint an HS256 access token for a user id, signed with `JWT_SECRET`.
//!
//! Ex:
//!   JWT_SECRET=... cargo run --bin token-gen -- --sub 6f1c... --ttl 3600
//!   curl -H "Authorization: Bearer $(cargo run -q --bin token-gen -- --sub ...)" ...

use anyhow::{Result, bail};
use clap::Parser;
use uuid::Uuid;

use hackathon_hub::config::MIN_JWT_SECRET_BYTES;
use hackathon_hub::services::auth::AccessTokenIssuer;

#[derive(Parser, Debug)]
#[command(name = "token-gen", about = "Mint an access token for local testing")]
struct Args {
    /// User id (UUID) to put in `sub`
    #[arg(long)]
    sub: Uuid,

    /// Lifetime in seconds
    #[arg(long, default_value_t = 3600)]
    ttl: u64,

    /// Shared signing secret
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    secret: String,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if args.secret.trim().len() < MIN_JWT_SECRET_BYTES {
        bail!("JWT_SECRET must be at least {MIN_JWT_SECRET_BYTES} bytes");
    }

    let issuer = AccessTokenIssuer::new(args.secret.as_bytes(), args.ttl);
    println!("{}", issuer.issue(args.sub)?);
    Ok(())
}
