use clap::Parser;

use gallery_gate::config::{AppEnv, JwtSecret};
use gallery_gate::services::auth::{IdentityClaim, TokenIssuer, token_issuer::DEFAULT_TTL_SECONDS};

/// Mint a bearer token for the photo-gallery API.
///
/// Signs `{ "userId": ... }` with the same secret selection the server uses:
/// `--env production` needs `--secret` (or `JWT_SECRET`), any other mode signs
/// with the development fallback secret.
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// User id embedded as the `userId` claim
    #[arg(long)]
    user_id: String,

    /// Deployment mode the token is meant for
    #[arg(long, env = "APP_ENV", default_value = "development")]
    env: String,

    /// Production signing secret
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    secret: Option<String>,

    /// Lifetime in seconds
    #[arg(long, default_value_t = DEFAULT_TTL_SECONDS, conflicts_with = "no_exp")]
    ttl: u64,

    /// Issue a token without `exp`
    #[arg(long, default_value_t = false)]
    no_exp: bool,

    /// Print the full `Authorization` header value instead of the bare token
    #[arg(long, default_value_t = false)]
    header: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let app_env = AppEnv::parse(Some(args.env.as_str()));
    let secret = JwtSecret::resolve(app_env, args.secret)?;

    let ttl = if args.no_exp { None } else { Some(args.ttl) };
    let token = TokenIssuer::new(&secret)
        .with_ttl_seconds(ttl)
        .sign(&IdentityClaim::new(args.user_id))?;

    if args.header {
        println!("Authorization: Bearer {}", token);
    } else {
        println!("{}", token);
    }

    Ok(())
}
