use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use super::resource::{self, ResourceCommands};
use crate::cli::context::Context;
use crate::cli::utils::output_success;

#[derive(Subcommand, Debug)]
pub enum ReminderCommands {
    #[command(flatten)]
    Crud(ResourceCommands),

    #[command(about = "Mark a reminder as done")]
    Complete {
        #[arg(help = "Reminder ID")]
        id: Uuid,
    },
}

pub async fn handle(cmd: ReminderCommands, ctx: &Context) -> anyhow::Result<()> {
    let reminders = &ctx.app.reminders;

    match cmd {
        ReminderCommands::Crud(cmd) => resource::handle(&**reminders, cmd, &ctx.format).await,
        ReminderCommands::Complete { id } => {
            let reminder = reminders.complete(id).await?;
            output_success(
                &ctx.format,
                &format!("Completed '{}'", reminder.title),
                Some(json!({ "record": reminder })),
            )
        }
    }
}
