pub mod commands;
pub mod context;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::api::SessionEvent;
use crate::config;
use crate::error::ClientError;
use crate::models::ExportEntity;
use context::Context;

#[derive(Parser)]
#[command(name = "dragofactu")]
#[command(about = "DRAGOFACTU - invoicing and business management from the command line")]
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
    #[command(about = "Authentication and token management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Clients")]
    Clients {
        #[command(subcommand)]
        cmd: commands::resource::ResourceCommands,
    },

    #[command(about = "Products and stock")]
    Products {
        #[command(subcommand)]
        cmd: commands::resource::ResourceCommands,
    },

    #[command(about = "Suppliers")]
    Suppliers {
        #[command(subcommand)]
        cmd: commands::resource::ResourceCommands,
    },

    #[command(about = "Quotes, invoices and delivery notes")]
    Documents {
        #[command(subcommand)]
        cmd: commands::documents::DocumentCommands,
    },

    #[command(about = "Workers and training courses")]
    Workers {
        #[command(subcommand)]
        cmd: commands::workers::WorkerCommands,
    },

    #[command(about = "Diary entries")]
    Diary {
        #[command(subcommand)]
        cmd: commands::resource::ResourceCommands,
    },

    #[command(about = "Reminders")]
    Reminders {
        #[command(subcommand)]
        cmd: commands::reminders::ReminderCommands,
    },

    #[command(about = "Audit log (read-only)")]
    Audit {
        #[command(subcommand)]
        cmd: commands::audit::AuditCommands,
    },

    #[command(about = "Monthly, quarterly and annual reports")]
    Reports {
        #[command(subcommand)]
        cmd: commands::reports::ReportCommands,
    },

    #[command(about = "System and backup information")]
    Admin {
        #[command(subcommand)]
        cmd: commands::admin::AdminCommands,
    },

    #[command(about = "Summary counters and pending reminders")]
    Dashboard,

    #[command(about = "Company settings")]
    Settings {
        #[command(subcommand)]
        cmd: commands::settings::SettingsCommands,
    },

    #[command(about = "Export clients, products or suppliers as CSV")]
    Export {
        #[arg(help = "clients, products or suppliers")]
        entity: ExportEntity,
        #[arg(long, short, help = "Output file (stdout if omitted)")]
        output: Option<PathBuf>,
    },

    #[command(about = "Import clients, products or suppliers from CSV")]
    Import {
        #[arg(help = "clients, products or suppliers")]
        entity: ExportEntity,
        #[arg(help = "CSV file")]
        file: PathBuf,
    },

    #[command(about = "Local preferences (theme, language, sidebar)")]
    Prefs {
        #[command(subcommand)]
        cmd: commands::prefs::PrefsCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
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

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let mut ctx = Context::load(config::config(), output_format)?;
    let mut events = ctx.app.api().subscribe();

    let result = dispatch(cli.command, &mut ctx).await;

    while let Ok(event) = events.try_recv() {
        if let SessionEvent::LoginRequired { reason } = event {
            tracing::debug!("Login required: {}", reason);
            eprintln!("Run `dragofactu auth login <username>` to start a new session.");
        }
    }

    // Backend failures become one localized line; the caller prints it
    result.map_err(|err| match err.downcast::<ClientError>() {
        Ok(client_err) => {
            let message = client_err.user_message(ctx.prefs.get().locale);
            if output_format == OutputFormat::Json {
                if let Err(e) = utils::output_client_error(&client_err, &message) {
                    tracing::warn!("Failed to print error: {}", e);
                }
            }
            let text = utils::describe_client_error(&client_err, &message);
            anyhow::Error::new(client_err).context(text)
        }
        Err(other) => other,
    })
}

async fn dispatch(command: Commands, ctx: &mut Context) -> anyhow::Result<()> {
    use commands::*;

    match command {
        Commands::Auth { cmd } => auth::handle(cmd, ctx).await,
        Commands::Clients { cmd } => resource::handle(&ctx.app.clients, cmd, &ctx.format).await,
        Commands::Products { cmd } => resource::handle(&ctx.app.products, cmd, &ctx.format).await,
        Commands::Suppliers { cmd } => resource::handle(&ctx.app.suppliers, cmd, &ctx.format).await,
        Commands::Documents { cmd } => documents::handle(cmd, ctx).await,
        Commands::Workers { cmd } => workers::handle(cmd, ctx).await,
        Commands::Diary { cmd } => resource::handle(&ctx.app.diary, cmd, &ctx.format).await,
        Commands::Reminders { cmd } => reminders::handle(cmd, ctx).await,
        Commands::Audit { cmd } => audit::handle(cmd, ctx).await,
        Commands::Reports { cmd } => reports::handle(cmd, ctx).await,
        Commands::Admin { cmd } => admin::handle(cmd, ctx).await,
        Commands::Dashboard => dashboard::handle(ctx).await,
        Commands::Settings { cmd } => settings::handle(cmd, ctx).await,
        Commands::Export { entity, output } => transfer::export(entity, output, ctx).await,
        Commands::Import { entity, file } => transfer::import(entity, &file, ctx).await,
        Commands::Prefs { cmd } => prefs::handle(cmd, ctx),
    }
}
