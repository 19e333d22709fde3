use clap::Args;
use serde_json::json;

use crate::auth::{generate_jwt, Access, Claims};
use crate::cli::{utils, OutputFormat};
use crate::config;

#[derive(Args)]
pub struct TokenArgs {
    #[arg(long, help = "User id carried in the token")]
    pub user_id: i64,

    #[arg(long, help = "Display name carried in the token")]
    pub username: String,

    #[arg(long, default_value = "user", help = "Access level: user, admin or app")]
    pub access: Access,

    #[arg(long, help = "Lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
    pub expiry_hours: Option<u64>,
}

pub fn handle(args: TokenArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = &config::config().security;
    let expiry_hours = args.expiry_hours.unwrap_or(security.jwt_expiry_hours);

    let claims = Claims::new(args.user_id, &args.username, args.access, expiry_hours);
    let token = generate_jwt(&claims, &security.jwt_secret)?;

    match output_format {
        OutputFormat::Json => utils::output_success(
            &output_format,
            "Token generated",
            Some(json!({
                "token": token,
                "user_id": args.user_id,
                "access": args.access,
                "expires_at": claims.exp,
            })),
        ),
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
    }
}
