use serde_json::json;

use crate::api::ListParams;
use crate::cli::context::Context;
use crate::cli::OutputFormat;
use crate::documents::format_amount;
use crate::models::ReminderFilters;

/// Summary counters plus the next pending reminders
pub async fn handle(ctx: &Context) -> anyhow::Result<()> {
    let pending = ReminderFilters {
        is_completed: Some(false),
        ..Default::default()
    };
    let (stats, reminders) = futures::try_join!(
        ctx.app.dashboard.stats(),
        ctx.app.reminders.list(ListParams::new(0, 5), &pending),
    )?;

    match ctx.format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "stats": stats,
                "pending_reminders": reminders.items,
            }))?
        ),
        OutputFormat::Text => {
            let currency = &ctx.config.documents.currency;
            println!("Clientes: {}  Productos: {}  Proveedores: {}", stats.total_clients, stats.total_products, stats.total_suppliers);
            println!(
                "Documentos: {}  Presupuestos pendientes: {}  Facturas sin cobrar: {}",
                stats.total_documents, stats.pending_quotes, stats.unpaid_invoices
            );
            println!("Productos con stock bajo: {}", stats.low_stock_products);
            println!(
                "Facturado este mes: {}  Este año: {}",
                format_amount(stats.revenue_this_month, currency),
                format_amount(stats.revenue_this_year, currency)
            );

            if !reminders.items.is_empty() {
                println!("\nRecordatorios pendientes ({}):", reminders.total);
                for reminder in &reminders.items {
                    println!("  [{}] {}", reminder.priority, reminder.title);
                }
            }
        }
    }
    Ok(())
}
