use chrono::NaiveDate;
use clap::Subcommand;
use uuid::Uuid;

use super::resource::Listing;
use crate::api::ListParams;
use crate::cli::context::Context;
use crate::cli::utils::{output_item, output_list};
use crate::models::{AuditFilters, AuditLogEntry};
use crate::view::Pager;

#[derive(Subcommand, Debug)]
pub enum AuditCommands {
    #[command(about = "List audit log entries")]
    List {
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long, default_value_t = ListParams::DEFAULT_LIMIT)]
        page_size: u64,
        #[arg(long, help = "Only entries by this user ID")]
        user: Option<Uuid>,
        #[arg(long, help = "Action, e.g. create, update, delete, login")]
        action: Option<String>,
        #[arg(long, help = "Entity type, e.g. client, document")]
        entity_type: Option<String>,
        #[arg(long, help = "From date (YYYY-MM-DD)")]
        from: Option<NaiveDate>,
        #[arg(long, help = "To date (YYYY-MM-DD)")]
        to: Option<NaiveDate>,
    },

    #[command(about = "Show one audit entry")]
    Get {
        #[arg(help = "Entry ID")]
        id: Uuid,
    },
}

pub async fn handle(cmd: AuditCommands, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        AuditCommands::List {
            page,
            page_size,
            user,
            action,
            entity_type,
            from,
            to,
        } => {
            let pager = Pager::from_page_number(page, page_size);
            let filters = AuditFilters {
                user_id: user,
                action,
                entity_type,
                date_from: from,
                date_to: to,
            };
            let entries = ctx.app.audit.list(pager.params(), &filters).await?;
            output_list(&ctx.format, AuditLogEntry::COLLECTION, &AuditLogEntry::table(), &entries, pager)
        }
        AuditCommands::Get { id } => {
            let entry = ctx.app.audit.get(id).await?;
            output_item(&ctx.format, &entry)
        }
    }
}
