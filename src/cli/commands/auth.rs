use chrono::{Duration, Utc};
use clap::Subcommand;
use serde_json::json;
use std::io::{self, BufRead, Write};

use crate::auth::TokenClaims;
use crate::cli::context::Context;
use crate::cli::utils::{output_item, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    #[command(about = "Login to server")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, env = "DRAGOFACTU_PASSWORD", hide_env_values = true, help = "Password (read from stdin if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Logout and forget stored tokens")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Refresh authentication token")]
    Refresh,

    #[command(about = "Show current user information")]
    Whoami,
}

pub async fn handle(cmd: AuthCommands, ctx: &Context) -> anyhow::Result<()> {
    let api = ctx.app.api();
    let output_format = &ctx.format;

    match cmd {
        AuthCommands::Login { username, password } => {
            let password = match password {
                Some(password) => password,
                None => prompt_password()?,
            };
            let session = api.login(&username, &password).await?;
            let display = session
                .user
                .as_ref()
                .map(|u| u.display_name().to_string())
                .unwrap_or_else(|| username.clone());

            output_success(
                output_format,
                &format!("Logged in as {}", display),
                Some(json!({ "username": username, "user": session.user })),
            )
        }
        AuthCommands::Logout => {
            api.logout().await?;
            output_success(output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            let state = api.session().snapshot().await;
            let claims = state.access_token.as_deref().and_then(|token| TokenClaims::peek(token).ok());
            let expires_at = claims.as_ref().and_then(TokenClaims::expires_at);
            let expired = claims
                .as_ref()
                .is_some_and(|c| c.is_expired(Utc::now(), Duration::zero()));

            match output_format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "authenticated": state.is_authenticated(),
                        "user": state.user,
                        "has_refresh_token": state.refresh_token.is_some(),
                        "expires_at": expires_at,
                        "expired": expired,
                    }))?
                ),
                OutputFormat::Text => {
                    if !state.is_authenticated() {
                        println!("Not logged in");
                        return Ok(());
                    }
                    match &state.user {
                        Some(user) => println!("Logged in as {} ({})", user.display_name(), user.username),
                        None => println!("Logged in"),
                    }
                    if let Some(at) = expires_at {
                        let note = if expired { " (expired, will refresh on next request)" } else { "" };
                        println!("Access token expires {}{}", at.format("%Y-%m-%d %H:%M:%S UTC"), note);
                    }
                    if state.refresh_token.is_none() {
                        println!("No refresh token stored");
                    }
                }
            }
            Ok(())
        }
        AuthCommands::Refresh => {
            api.refresh_session().await?;
            output_success(output_format, "Access token refreshed", None)
        }
        AuthCommands::Whoami => {
            let user = api.me().await?;
            output_item(output_format, &user)
        }
    }
}

fn prompt_password() -> anyhow::Result<String> {
    eprint!("Password: ");
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        anyhow::bail!("Password required");
    }
    Ok(password)
}
