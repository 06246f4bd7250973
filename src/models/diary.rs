use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{ListFilters, QueryPairs};
use crate::query::ResourceModel;
use crate::types::Domain;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiaryEntryCreate {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub pinned: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiaryEntryUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct DiaryFilters {
    pub search: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub pinned: Option<bool>,
}

impl ListFilters for DiaryFilters {
    fn query_pairs(&self) -> Vec<(String, String)> {
        QueryPairs::new()
            .opt("search", self.search.as_ref())
            .opt("date_from", self.date_from)
            .opt("date_to", self.date_to)
            .opt("pinned", self.pinned)
            .into_vec()
    }
}

impl ResourceModel for DiaryEntry {
    const DOMAIN: Domain = Domain::Diary;

    type Create = DiaryEntryCreate;
    type Update = DiaryEntryUpdate;
    type Filters = DiaryFilters;

    fn id(&self) -> Uuid {
        self.id
    }
}
