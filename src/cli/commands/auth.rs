use clap::Subcommand;
use serde_json::{json, Map};

use crate::auth::{decode_subject, issue_token};
use crate::cli::utils::{output_success, output_value};
use crate::cli::OutputFormat;
use crate::config;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Issue an access token signed with the configured secret")]
    Token {
        #[arg(help = "Username to put in the token subject")]
        username: String,
    },

    #[command(about = "Print a token's subject without verifying it")]
    Decode {
        #[arg(help = "Access token")]
        token: String,
    },
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Token { username } => {
            let issued = issue_token(&username, &config::config().security)?;

            match output_format {
                OutputFormat::Json => {
                    let mut data = Map::new();
                    data.insert("accessToken".into(), json!(issued.access_token));
                    data.insert("expiredAt".into(), json!(issued.expired_at_ms));
                    output_success(output_format, &format!("Issued token for {}", username), Some(data))
                }
                OutputFormat::Text => {
                    println!("{}", issued.access_token);
                    Ok(())
                }
            }
        }
        AuthCommands::Decode { token } => {
            let subject = decode_subject(&token)?;
            output_value(output_format, &json!({ "username": subject }))
        }
    }
}
