use clap::Subcommand;
use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::cli::utils::output_success;
use crate::cli::{parse_roles, OutputFormat};

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Sign a token with the configured secret")]
    Issue {
        #[arg(long, help = "Subject (user id)")]
        sub: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, default_value = "USER", help = "Comma-separated roles")]
        roles: String,
    },
}

pub async fn handle(cmd: TokenCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TokenCommands::Issue { sub, email, roles } => {
            let roles = parse_roles(&roles)?;
            let claims = Claims::new(sub, email, roles.labels());
            let expires_at = claims.exp;
            let token = generate_jwt(&claims)?;

            match output_format {
                OutputFormat::Json => output_success(
                    &output_format,
                    "Token issued",
                    Some(json!({ "token": token, "expires_at": expires_at })),
                ),
                OutputFormat::Text => {
                    println!("{}", token);
                    Ok(())
                }
            }
        }
    }
}
