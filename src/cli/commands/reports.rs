use clap::Subcommand;

use crate::cli::context::Context;
use crate::cli::utils::output_item;
use crate::cli::OutputFormat;
use crate::documents::format_amount;
use crate::models::ReportPeriod;

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    #[command(about = "Monthly report")]
    Monthly {
        year: i32,
        #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,
    },

    #[command(about = "Quarterly report")]
    Quarterly {
        year: i32,
        #[arg(value_parser = clap::value_parser!(u32).range(1..=4))]
        quarter: u32,
    },

    #[command(about = "Annual report")]
    Annual { year: i32 },
}

impl From<ReportCommands> for ReportPeriod {
    fn from(cmd: ReportCommands) -> Self {
        match cmd {
            ReportCommands::Monthly { year, month } => ReportPeriod::Monthly { year, month },
            ReportCommands::Quarterly { year, quarter } => ReportPeriod::Quarterly { year, quarter },
            ReportCommands::Annual { year } => ReportPeriod::Annual { year },
        }
    }
}

pub async fn handle(cmd: ReportCommands, ctx: &Context) -> anyhow::Result<()> {
    let period = ReportPeriod::from(cmd);
    let report = ctx.app.reports.get(period).await?;

    match ctx.format {
        OutputFormat::Json => output_item(&ctx.format, &report),
        OutputFormat::Text => {
            let currency = &ctx.config.documents.currency;
            println!("Report {}", period);
            println!("  Invoiced:      {}", format_amount(report.total_invoiced, currency));
            println!("  Paid:          {}", format_amount(report.total_paid, currency));
            println!("  Pending:       {}", format_amount(report.total_pending, currency));
            println!("  Tax collected: {}", format_amount(report.tax_collected, currency));
            println!("  Invoices: {}  Quotes: {}", report.invoice_count, report.quote_count);
            if !report.breakdown.is_empty() {
                println!();
                print!("{}", serde_yaml::to_string(&report.breakdown)?);
            }
            Ok(())
        }
    }
}
