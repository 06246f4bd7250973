use clap::Subcommand;
use serde_json::json;
use std::path::PathBuf;
use uuid::Uuid;

use super::resource::{self, ResourceCommands};
use crate::cli::context::Context;
use crate::cli::utils::{output_item, output_success, read_payload, write_bytes};
use crate::cli::OutputFormat;
use crate::documents::{format_amount, transition_buttons, DocumentTotals};
use crate::models::{DocumentLineInput, DocumentStatus, DocumentType};

#[derive(Subcommand, Debug)]
pub enum DocumentCommands {
    #[command(flatten)]
    Crud(ResourceCommands),

    #[command(about = "Move a document to a new status")]
    Status {
        #[arg(help = "Document ID")]
        id: Uuid,
        #[arg(help = "Target status (e.g. sent, paid)")]
        status: DocumentStatus,
    },

    #[command(about = "Show the statuses a document can move to")]
    Transitions {
        #[arg(help = "Document ID")]
        id: Uuid,
    },

    #[command(about = "Create a new document from this one (quote -> invoice, ...)")]
    Convert {
        #[arg(help = "Document ID")]
        id: Uuid,
        #[arg(long = "to", help = "Target type: invoice or delivery_note")]
        target: DocumentType,
    },

    #[command(about = "Download the rendered PDF")]
    Pdf {
        #[arg(help = "Document ID")]
        id: Uuid,
        #[arg(long, short, help = "Output file (stdout if omitted)")]
        output: Option<PathBuf>,
    },

    #[command(about = "Email the document")]
    SendEmail {
        #[arg(help = "Document ID")]
        id: Uuid,
        #[arg(long = "to", help = "Recipient (defaults to the client's email)")]
        recipient: Option<String>,
    },

    #[command(about = "Show whether email delivery is configured")]
    EmailStatus,

    #[command(about = "Preview totals for lines read from stdin")]
    Totals,
}

pub async fn handle(cmd: DocumentCommands, ctx: &Context) -> anyhow::Result<()> {
    let documents = &ctx.app.documents;
    let output_format = &ctx.format;

    match cmd {
        DocumentCommands::Crud(cmd) => resource::handle(&**documents, cmd, output_format).await,
        DocumentCommands::Status { id, status } => {
            let current = documents.get(id).await?;
            if !current.status.can_transition_to(status) {
                anyhow::bail!(
                    "Document {} is {}; it can move to: {}",
                    current.code,
                    current.status,
                    list_or_none(current.status.next_statuses().iter().map(|s| s.as_str()))
                );
            }

            let document = documents.change_status(id, status).await?;
            output_success(
                output_format,
                &format!("Document {} is now {}", document.code, document.status.label()),
                Some(json!({ "id": document.id, "status": document.status })),
            )
        }
        DocumentCommands::Transitions { id } => {
            let document = documents.get(id).await?;
            let buttons = transition_buttons(document.status);
            match output_format {
                OutputFormat::Json => {
                    let targets: Vec<_> = buttons
                        .iter()
                        .map(|b| json!({ "status": b.target, "label": b.label }))
                        .collect();
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({
                            "current": document.status,
                            "transitions": targets,
                            "conversions": document.doc_type.conversion_targets(),
                        }))?
                    );
                }
                OutputFormat::Text => {
                    println!("{} ({}) is {}", document.code, document.doc_type, document.status.label());
                    if buttons.is_empty() {
                        println!("No further status changes");
                    }
                    for button in &buttons {
                        println!("  -> {:<16} {}", button.target.as_str(), button.label);
                    }
                    let conversions = document.doc_type.conversion_targets();
                    if !conversions.is_empty() {
                        println!("Can be converted to: {}", list_or_none(conversions.iter().map(|t| t.as_str())));
                    }
                }
            }
            Ok(())
        }
        DocumentCommands::Convert { id, target } => {
            let source = documents.get(id).await?;
            if !source.doc_type.can_convert_to(target) {
                anyhow::bail!("A {} cannot be converted to {}", source.doc_type, target);
            }

            let created = documents.convert(id, target).await?;
            output_success(
                output_format,
                &format!("Created {} {} from {}", created.doc_type, created.code, source.code),
                Some(json!({ "record": created })),
            )
        }
        DocumentCommands::Pdf { id, output } => {
            let bytes = documents.pdf(id).await?;
            write_bytes(output.as_deref(), &bytes)?;
            if let Some(path) = output {
                output_success(
                    output_format,
                    &format!("Saved PDF to {}", path.display()),
                    Some(json!({ "path": path, "bytes": bytes.len() })),
                )?;
            }
            Ok(())
        }
        DocumentCommands::SendEmail { id, recipient } => {
            let sent = documents.send_email(id, recipient.as_deref()).await?;
            if !sent.success {
                anyhow::bail!("Email not sent: {}", sent.message);
            }
            output_success(output_format, &sent.message, Some(json!({ "id": id })))
        }
        DocumentCommands::EmailStatus => {
            let status = documents.email_status().await?;
            output_item(output_format, &status)
        }
        DocumentCommands::Totals => {
            let lines: Vec<DocumentLineInput> = read_payload()?;
            let settings = &ctx.config.documents;
            let totals = DocumentTotals::for_lines(&lines, settings.tax_rate);

            match output_format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "subtotal": totals.subtotal,
                        "tax": totals.tax,
                        "total": totals.total,
                        "tax_rate": settings.tax_rate,
                    }))?
                ),
                OutputFormat::Text => {
                    println!("Subtotal: {}", format_amount(totals.subtotal, &settings.currency));
                    println!(
                        "Tax ({}%): {}",
                        (settings.tax_rate * rust_decimal::Decimal::ONE_HUNDRED).normalize(),
                        format_amount(totals.tax, &settings.currency)
                    );
                    println!("Total: {}", format_amount(totals.total, &settings.currency));
                }
            }
            Ok(())
        }
    }
}

fn list_or_none<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let items: Vec<&str> = items.collect();
    if items.is_empty() {
        "nothing (final status)".to_string()
    } else {
        items.join(", ")
    }
}
