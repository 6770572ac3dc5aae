pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::access::{Role, RoleSet};

#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "Portal CLI - inspect access policies, preview listing filters and mint dev tokens")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Evaluate collection and field access for a role set")]
    Access {
        #[command(subcommand)]
        cmd: commands::access::AccessCommands,
    },

    #[command(about = "Preview the CMS query built for a listing")]
    Filter {
        #[command(subcommand)]
        cmd: commands::filter::FilterCommands,
    },

    #[command(about = "Development token management")]
    Token {
        #[command(subcommand)]
        cmd: commands::token::TokenCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Parse a comma-separated role list, e.g. `USER,SUPER_ADMIN`
pub fn parse_roles(raw: &str) -> anyhow::Result<RoleSet> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Role>().map_err(anyhow::Error::from))
        .collect()
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Access { cmd } => commands::access::handle(cmd, output_format).await,
        Commands::Filter { cmd } => commands::filter::handle(cmd, output_format).await,
        Commands::Token { cmd } => commands::token::handle(cmd, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roles_splits_and_trims() {
        let roles = parse_roles("USER, super_admin,").unwrap();
        assert_eq!(roles, RoleSet::from([Role::User, Role::SuperAdmin]));
    }

    #[test]
    fn parse_roles_rejects_unknown_labels() {
        assert!(parse_roles("USER,EDITOR").is_err());
    }
}
