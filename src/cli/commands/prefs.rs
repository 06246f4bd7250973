use clap::Subcommand;
use serde_json::json;

use crate::cli::context::Context;
use crate::cli::utils::{output_item, output_success};
use crate::store::{Locale, Theme};

#[derive(Subcommand, Debug)]
pub enum PrefsCommands {
    #[command(about = "Show stored preferences")]
    Show,

    #[command(about = "Set theme: light, dark or system")]
    Theme { theme: Theme },

    #[command(about = "Set language: es or en")]
    Locale { locale: Locale },

    #[command(about = "Collapse or expand the sidebar (toggles when no value is given)")]
    Sidebar { collapsed: Option<bool> },

    #[command(about = "Restore default preferences")]
    Reset,
}

pub fn handle(cmd: PrefsCommands, ctx: &mut Context) -> anyhow::Result<()> {
    match cmd {
        PrefsCommands::Show => return output_item(&ctx.format, ctx.prefs.get()),
        PrefsCommands::Theme { theme } => ctx.prefs.set_theme(theme)?,
        PrefsCommands::Locale { locale } => ctx.prefs.set_locale(locale)?,
        PrefsCommands::Sidebar { collapsed: Some(collapsed) } => ctx.prefs.set_sidebar_collapsed(collapsed)?,
        PrefsCommands::Sidebar { collapsed: None } => {
            ctx.prefs.toggle_sidebar()?;
        }
        PrefsCommands::Reset => ctx.prefs.reset()?,
    }

    let prefs = ctx.prefs.get();
    output_success(
        &ctx.format,
        "Preferences saved",
        Some(json!({ "preferences": prefs })),
    )
}
