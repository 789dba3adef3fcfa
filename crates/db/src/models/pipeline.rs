//! Pipeline entity model and DTOs.
//!
//! A pipeline is an opaque named configuration record. The four JSON documents
//! are stored and returned verbatim; nothing in this crate interprets them.

use ekono_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// Full row from the `pipelines` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Pipeline {
    pub id: DbId,
    pub name: String,
    pub configuration: Json<serde_json::Value>,
    pub permissions: Json<serde_json::Value>,
    pub limitations: Json<serde_json::Value>,
    pub billing_info: Json<serde_json::Value>,
    pub created_at: Timestamp,
    #[serde(skip_serializing)]
    pub owner_id: DbId,
}

/// List-view projection: documents are withheld to keep list payloads small.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PipelineSummary {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a pipeline. The owner is passed separately and always
/// comes from the authenticated caller.
#[derive(Debug, Clone)]
pub struct CreatePipeline {
    pub name: String,
    pub configuration: serde_json::Value,
    pub permissions: serde_json::Value,
    pub limitations: serde_json::Value,
    pub billing_info: serde_json::Value,
}

impl CreatePipeline {
    /// Build a DTO with every document set to an empty object.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            configuration: empty_document(),
            permissions: empty_document(),
            limitations: empty_document(),
            billing_info: empty_document(),
        }
    }
}

/// The default value for an omitted pipeline document.
pub fn empty_document() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}
