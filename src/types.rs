/// Shared types used across the codebase

use serde::{Deserialize, Serialize};

/// Backend resource domains. Each one owns a slice of the query cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Clients,
    Products,
    Suppliers,
    Documents,
    Workers,
    Diary,
    Reminders,
    Reports,
    Audit,
    Admin,
    Settings,
    Dashboard,
}

impl Domain {
    pub const ALL: [Domain; 12] = [
        Domain::Clients,
        Domain::Products,
        Domain::Suppliers,
        Domain::Documents,
        Domain::Workers,
        Domain::Diary,
        Domain::Reminders,
        Domain::Reports,
        Domain::Audit,
        Domain::Admin,
        Domain::Settings,
        Domain::Dashboard,
    ];

    /// Path segment under the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Domain::Clients => "clients",
            Domain::Products => "products",
            Domain::Suppliers => "suppliers",
            Domain::Documents => "documents",
            Domain::Workers => "workers",
            Domain::Diary => "diary",
            Domain::Reminders => "reminders",
            Domain::Reports => "reports",
            Domain::Audit => "audit",
            Domain::Admin => "admin",
            Domain::Settings => "settings",
            Domain::Dashboard => "dashboard",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Server-confirmed writes. Used to decide which cached queries go stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    Create,
    Update,
    Delete,
    StatusChange,
    Convert,
    Complete,
    Import,
}
