//! DTOs mirrored from the backend. No client-side invariants beyond field
//! presence; the server validates everything.

pub mod admin;
pub mod audit;
pub mod client;
pub mod dashboard;
pub mod diary;
pub mod document;
pub mod product;
pub mod reminder;
pub mod report;
pub mod settings;
pub mod supplier;
pub mod transfer;
pub mod user;
pub mod worker;

pub use admin::{BackupInfo, SystemInfo};
pub use audit::{AuditFilters, AuditLogEntry};
pub use client::{Client, ClientCreate, ClientFilters, ClientUpdate};
pub use dashboard::DashboardStats;
pub use diary::{DiaryEntry, DiaryEntryCreate, DiaryEntryUpdate, DiaryFilters};
pub use document::{
    Document, DocumentCreate, DocumentFilters, DocumentLine, DocumentLineInput, DocumentStatus, DocumentType,
    DocumentUpdate, EmailSendResult, EmailStatus, StatusChange,
};
pub use product::{Product, ProductCreate, ProductFilters, ProductUpdate};
pub use reminder::{Priority, Reminder, ReminderCreate, ReminderFilters, ReminderUpdate};
pub use report::{Report, ReportPeriod};
pub use settings::{CompanySettings, CompanySettingsUpdate};
pub use supplier::{Supplier, SupplierCreate, SupplierFilters, SupplierUpdate};
pub use transfer::{ExportEntity, ImportResult};
pub use user::User;
pub use worker::{Course, CourseCreate, Worker, WorkerCreate, WorkerFilters, WorkerUpdate};

pub(crate) fn default_true() -> bool {
    true
}
