use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use uuid::Uuid;

/// Chapter metadata stored alongside the book record, independent of
/// the raw text file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterMeta {
    pub title: String,

    #[serde(rename = "anchorId", default)]
    pub anchor_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
pub struct Book {
    /// Canonically a UUID, but legacy catalogs carry raw string ids.
    /// Lookup dispatches on the format, see `BookCatalogRepository::find_by_any_id`.
    #[builder(default=Uuid::new_v4().to_string())]
    pub id: String,

    pub title: String,

    pub author: String,

    /// Name of the raw text file in the book file store.
    /// Only its basename is trusted when resolving the file on disk.
    #[serde(rename = "fileName")]
    pub file_name: String,

    #[serde(rename = "priceCents", default)]
    #[builder(default)]
    pub price_cents: Option<i64>,

    #[serde(default)]
    #[builder(default)]
    pub paid: bool,

    #[serde(default)]
    #[builder(default)]
    pub chapters: Option<Vec<ChapterMeta>>,

    #[serde(rename = "addedAt", default = "Utc::now")]
    #[builder(default=Utc::now())]
    pub added_at: DateTime<Utc>,
}
