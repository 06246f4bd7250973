use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::Domain;

/// Entities that support CSV export and import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportEntity {
    Clients,
    Products,
    Suppliers,
}

impl ExportEntity {
    pub fn domain(&self) -> Domain {
        match self {
            Self::Clients => Domain::Clients,
            Self::Products => Domain::Products,
            Self::Suppliers => Domain::Suppliers,
        }
    }

    pub fn path(&self) -> &'static str {
        self.domain().path()
    }
}

impl fmt::Display for ExportEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for ExportEntity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clients" => Ok(Self::Clients),
            "products" => Ok(Self::Products),
            "suppliers" => Ok(Self::Suppliers),
            other => Err(format!("'{}' cannot be exported (clients, products, suppliers)", other)),
        }
    }
}

/// Outcome of a CSV import
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportResult {
    pub imported: u64,
    pub skipped: u64,
    pub errors: Vec<String>,
    pub message: Option<String>,
}

impl ImportResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
