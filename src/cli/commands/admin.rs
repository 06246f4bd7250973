use clap::Subcommand;

use crate::cli::context::Context;
use crate::cli::utils::output_item;

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    #[command(about = "Backend version and runtime information")]
    SystemInfo,

    #[command(about = "Backup status")]
    BackupInfo,
}

pub async fn handle(cmd: AdminCommands, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        AdminCommands::SystemInfo => output_item(&ctx.format, &ctx.app.admin.system_info().await?),
        AdminCommands::BackupInfo => output_item(&ctx.format, &ctx.app.admin.backup_info().await?),
    }
}
