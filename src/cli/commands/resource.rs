use clap::{Args, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::api::{ListParams, RawFilters};
use crate::cli::utils::{output_item, output_list, output_success, parse_key_value, read_payload};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::documents::format_amount;
use crate::models::{AuditLogEntry, Client, DiaryEntry, Document, Product, Reminder, Supplier, Worker};
use crate::query::{Resource, ResourceModel};
use crate::view::table::opt;
use crate::view::{Pager, Table};

/// Page and filter flags shared by every list command
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1, help = "Page number, starting at 1")]
    pub page: u64,
    #[arg(long, default_value_t = ListParams::DEFAULT_LIMIT, help = "Rows per page")]
    pub page_size: u64,
    #[arg(long, help = "Free-text search")]
    pub search: Option<String>,
    #[arg(long = "filter", value_parser = parse_key_value, help = "Extra filter as key=value (repeatable)")]
    pub filters: Vec<(String, String)>,
}

impl ListArgs {
    pub fn pager(&self) -> Pager {
        Pager::from_page_number(self.page, self.page_size)
    }

    pub fn raw_filters(&self) -> RawFilters {
        let mut pairs = Vec::with_capacity(self.filters.len() + 1);
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search".to_string(), search.to_string()));
        }
        pairs.extend(self.filters.iter().cloned());
        RawFilters(pairs)
    }
}

#[derive(Subcommand, Debug)]
pub enum ResourceCommands {
    #[command(about = "List records, one page at a time")]
    List(ListArgs),

    #[command(about = "Show one record")]
    Get {
        #[arg(help = "Record ID")]
        id: Uuid,
    },

    #[command(about = "Create record from stdin (YAML or JSON)")]
    Create,

    #[command(about = "Update record from stdin (YAML or JSON, only the fields to change)")]
    Update {
        #[arg(help = "Record ID to update")]
        id: Uuid,
    },

    #[command(about = "Delete record")]
    Delete {
        #[arg(help = "Record ID to delete")]
        id: Uuid,
    },
}

/// How a record type shows up in list output
pub trait Listing: ResourceModel + Serialize {
    /// Plural, lowercase; used for messages and JSON keys
    const COLLECTION: &'static str;

    fn table() -> Table<Self>;
}

pub async fn handle<T>(resource: &Resource<T>, cmd: ResourceCommands, output_format: &OutputFormat) -> anyhow::Result<()>
where
    T: Listing,
    T::Create: DeserializeOwned,
    T::Update: DeserializeOwned,
{
    match cmd {
        ResourceCommands::List(args) => {
            let pager = args.pager();
            let page = resource.list(pager.params(), &args.raw_filters()).await?;
            output_list(output_format, T::COLLECTION, &T::table(), &page, pager)
        }
        ResourceCommands::Get { id } => {
            let record = resource.get(id).await?;
            output_item(output_format, &record)
        }
        ResourceCommands::Create => {
            let payload: T::Create = read_payload()?;
            let record = resource.create(&payload).await?;
            output_success(
                output_format,
                &format!("Created {} record {}", T::DOMAIN, record.id()),
                Some(json!({ "record": record })),
            )
        }
        ResourceCommands::Update { id } => {
            let payload: T::Update = read_payload()?;
            let record = resource.update(id, &payload).await?;
            output_success(
                output_format,
                &format!("Updated {} record {}", T::DOMAIN, id),
                Some(json!({ "record": record })),
            )
        }
        ResourceCommands::Delete { id } => {
            let deleted = resource.delete(id).await?;
            output_success(output_format, &deleted.message, Some(json!({ "id": id })))
        }
    }
}

impl Listing for Client {
    const COLLECTION: &'static str = "clients";

    fn table() -> Table<Self> {
        Table::new()
            .column("id", "ID", |c: &Client| c.id.to_string())
            .column("name", "Nombre", |c: &Client| c.name.clone())
            .column("tax_id", "CIF/NIF", |c: &Client| opt(&c.tax_id))
            .column("email", "Email", |c: &Client| opt(&c.email))
            .column("city", "Ciudad", |c: &Client| opt(&c.city))
    }
}

impl Listing for Product {
    const COLLECTION: &'static str = "products";

    fn table() -> Table<Self> {
        Table::new()
            .column("code", "Código", |p: &Product| p.code.clone())
            .column("name", "Nombre", |p: &Product| p.name.clone())
            .column("sale_price", "Precio", |p: &Product| p.sale_price.to_string())
            .column("stock", "Stock", |p: &Product| {
                if p.is_low_stock() {
                    format!("{} (bajo)", p.current_stock)
                } else {
                    p.current_stock.to_string()
                }
            })
            .column("id", "ID", |p: &Product| p.id.to_string())
    }
}

impl Listing for Supplier {
    const COLLECTION: &'static str = "suppliers";

    fn table() -> Table<Self> {
        Table::new()
            .column("id", "ID", |s: &Supplier| s.id.to_string())
            .column("name", "Nombre", |s: &Supplier| s.name.clone())
            .column("contact", "Contacto", |s: &Supplier| opt(&s.contact_person))
            .column("phone", "Teléfono", |s: &Supplier| opt(&s.phone))
    }
}

impl Listing for Document {
    const COLLECTION: &'static str = "documents";

    fn table() -> Table<Self> {
        let currency = config().documents.currency.clone();
        Table::new()
            .column("code", "Código", |d: &Document| d.code.clone())
            .column("type", "Tipo", |d: &Document| d.doc_type.to_string())
            .column("status", "Estado", |d: &Document| d.status.label().to_string())
            .column("client", "Cliente", |d: &Document| opt(&d.client_name))
            .column("issue_date", "Fecha", |d: &Document| d.issue_date.to_string())
            .column("total", "Total", move |d: &Document| format_amount(d.total, &currency))
            .column("id", "ID", |d: &Document| d.id.to_string())
    }
}

impl Listing for Worker {
    const COLLECTION: &'static str = "workers";

    fn table() -> Table<Self> {
        Table::new()
            .column("id", "ID", |w: &Worker| w.id.to_string())
            .column("name", "Nombre", |w: &Worker| w.full_name())
            .column("position", "Puesto", |w: &Worker| opt(&w.position))
            .column("department", "Departamento", |w: &Worker| opt(&w.department))
    }
}

impl Listing for DiaryEntry {
    const COLLECTION: &'static str = "diary";

    fn table() -> Table<Self> {
        Table::new()
            .column("date", "Fecha", |e: &DiaryEntry| e.date.to_string())
            .column("title", "Título", |e: &DiaryEntry| {
                if e.pinned {
                    format!("* {}", e.title)
                } else {
                    e.title.clone()
                }
            })
            .column("tags", "Etiquetas", |e: &DiaryEntry| e.tags.join(", "))
            .column("id", "ID", |e: &DiaryEntry| e.id.to_string())
    }
}

impl Listing for Reminder {
    const COLLECTION: &'static str = "reminders";

    fn table() -> Table<Self> {
        Table::new()
            .column("done", "", |r: &Reminder| if r.is_completed { "x" } else { " " }.to_string())
            .column("title", "Título", |r: &Reminder| r.title.clone())
            .column("priority", "Prioridad", |r: &Reminder| r.priority.to_string())
            .column("due_date", "Vence", |r: &Reminder| {
                r.due_date.map(|d| d.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_default()
            })
            .column("id", "ID", |r: &Reminder| r.id.to_string())
    }
}

impl Listing for AuditLogEntry {
    const COLLECTION: &'static str = "audit";

    fn table() -> Table<Self> {
        Table::new()
            .column("timestamp", "Fecha", |a: &AuditLogEntry| a.timestamp.format("%Y-%m-%d %H:%M:%S").to_string())
            .column("user", "Usuario", |a: &AuditLogEntry| opt(&a.username))
            .column("action", "Acción", |a: &AuditLogEntry| a.action.clone())
            .column("entity", "Entidad", |a: &AuditLogEntry| {
                match a.entity_id {
                    Some(id) => format!("{} {}", a.entity_type, id),
                    None => a.entity_type.clone(),
                }
            })
            .column("ip", "IP", |a: &AuditLogEntry| opt(&a.ip_address))
    }
}
