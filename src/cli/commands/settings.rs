use clap::Subcommand;
use serde_json::json;

use crate::cli::context::Context;
use crate::cli::utils::{output_item, output_success, read_payload};
use crate::models::CompanySettingsUpdate;

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    #[command(about = "Show company settings")]
    Show,

    #[command(about = "Update company settings from stdin (YAML or JSON)")]
    Update,
}

pub async fn handle(cmd: SettingsCommands, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        SettingsCommands::Show => output_item(&ctx.format, &ctx.app.settings.get().await?),
        SettingsCommands::Update => {
            let changes: CompanySettingsUpdate = read_payload()?;
            let settings = ctx.app.settings.update(&changes).await?;
            output_success(&ctx.format, "Company settings updated", Some(json!({ "settings": settings })))
        }
    }
}
