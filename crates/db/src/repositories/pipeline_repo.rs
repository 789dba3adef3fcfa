//! Repository for the `pipelines` table.
//!
//! Every public read is scoped by owner. The unscoped id lookup is private to
//! this module and only backs [`PipelineRepo::find_by_id_for_owner`].

use chrono::Utc;
use ekono_core::types::DbId;
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::models::pipeline::{CreatePipeline, Pipeline, PipelineSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, configuration, permissions, limitations, billing_info, \
                       created_at, owner_id";

/// Owner-scoped pipeline storage.
pub struct PipelineRepo;

impl PipelineRepo {
    /// Insert a pipeline owned by `owner_id`, returning the created row.
    pub async fn create(
        pool: &SqlitePool,
        owner_id: DbId,
        input: &CreatePipeline,
    ) -> Result<Pipeline, sqlx::Error> {
        let query = format!(
            "INSERT INTO pipelines
                (name, configuration, permissions, limitations, billing_info, created_at, owner_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Pipeline>(&query)
            .bind(&input.name)
            .bind(Json(&input.configuration))
            .bind(Json(&input.permissions))
            .bind(Json(&input.limitations))
            .bind(Json(&input.billing_info))
            .bind(Utc::now())
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }

    /// List the summaries of all pipelines owned by `owner_id`, oldest first.
    pub async fn list_by_owner(
        pool: &SqlitePool,
        owner_id: DbId,
    ) -> Result<Vec<PipelineSummary>, sqlx::Error> {
        sqlx::query_as::<_, PipelineSummary>(
            "SELECT id, name, created_at FROM pipelines WHERE owner_id = $1 ORDER BY id ASC",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
    }

    async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Pipeline>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pipelines WHERE id = $1");
        sqlx::query_as::<_, Pipeline>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a pipeline by ID, returning `None` both when it does not exist and
    /// when it belongs to someone else.
    ///
    /// Ownership is never reassigned, so the read-then-compare needs no
    /// transaction.
    pub async fn find_by_id_for_owner(
        pool: &SqlitePool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Pipeline>, sqlx::Error> {
        let pipeline = Self::find_by_id(pool, id).await?;
        Ok(pipeline.filter(|p| p.owner_id == owner_id))
    }
}
