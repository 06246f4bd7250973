use serde::{Deserialize, Serialize};

/// Paginated list envelope shared by every collection endpoint
/// `{ items, total, skip, limit, has_more }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
    #[serde(default)]
    pub has_more: bool,
}

impl<T> ListResponse<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// `DELETE /{resource}/{id}` reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
    pub success: bool,
}

/// Offset pagination sent as `skip` / `limit`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    pub skip: u64,
    pub limit: u64,
}

impl ListParams {
    pub const DEFAULT_LIMIT: u64 = 25;

    pub fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }

    pub fn query_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("skip".to_string(), self.skip.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ]
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}

/// Domain-specific list filters rendered as query parameters
pub trait ListFilters {
    fn query_pairs(&self) -> Vec<(String, String)>;
}

impl ListFilters for () {
    fn query_pairs(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// Untyped `key=value` filters, as typed on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFilters(pub Vec<(String, String)>);

impl ListFilters for RawFilters {
    fn query_pairs(&self) -> Vec<(String, String)> {
        self.0.clone()
    }
}

/// Builder that skips absent values and blank strings
#[derive(Debug, Default)]
pub struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opt<V: ToString>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.trim().is_empty() {
                self.0.push((key.to_string(), value.trim().to_string()));
            }
        }
        self
    }

    pub fn into_vec(self) -> Vec<(String, String)> {
        self.0
    }
}
