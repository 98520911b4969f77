//! Repository for the `designs` table.
//!
//! Designs are written once and never updated or deleted.

use chrono::Utc;
use greenthreads_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::design::{CareLookup, CreateDesign, Design, DesignSampleRow, DesignSummary};

/// Column list for full `designs` rows.
///
/// Legacy files may hold the score as TEXT, hence the cast.
const COLUMNS: &str = "\
    id, user_id, style, materials, clothing_type, production_method, \
    packaging, production_location, shipping_method, base_color, custom_design, \
    CAST(sustainability_score AS INTEGER) AS sustainability_score, \
    design_image, qr_code_id, care_instructions, timestamp AS created_at";

/// Column list for summaries (no image blob).
const SUMMARY_COLUMNS: &str = "\
    id, user_id, style, materials, clothing_type, production_method, \
    packaging, production_location, shipping_method, base_color, custom_design, \
    CAST(sustainability_score AS INTEGER) AS sustainability_score, \
    (design_image IS NOT NULL) AS has_image, qr_code_id, timestamp AS created_at";

pub struct DesignRepo;

impl DesignRepo {
    /// Insert a design, stamping the creation time, and return the stored row.
    pub async fn create(pool: &SqlitePool, input: &CreateDesign) -> Result<Design, sqlx::Error> {
        let query = format!(
            "INSERT INTO designs (user_id, style, materials, clothing_type, production_method, \
                 packaging, production_location, shipping_method, base_color, custom_design, \
                 sustainability_score, design_image, qr_code_id, care_instructions, timestamp) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Design>(&query)
            .bind(&input.user_id)
            .bind(&input.style)
            .bind(&input.materials)
            .bind(&input.clothing_type)
            .bind(&input.production_method)
            .bind(&input.packaging)
            .bind(&input.production_location)
            .bind(&input.shipping_method)
            .bind(&input.base_color)
            .bind(&input.custom_design)
            .bind(input.sustainability_score)
            .bind(&input.design_image)
            .bind(&input.qr_code_id)
            .bind(&input.care_instructions)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Design>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM designs WHERE id = $1");
        sqlx::query_as::<_, Design>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_summary_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<DesignSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM designs WHERE id = $1");
        sqlx::query_as::<_, DesignSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The most recently inserted design.
    pub async fn find_latest(pool: &SqlitePool) -> Result<Option<Design>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM designs ORDER BY id DESC LIMIT 1");
        sqlx::query_as::<_, Design>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Every design, oldest first.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Design>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM designs ORDER BY id ASC");
        sqlx::query_as::<_, Design>(&query).fetch_all(pool).await
    }

    /// Every design without image data, newest first.
    /// Number of stored designs.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM designs")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    pub async fn list_summaries(pool: &SqlitePool) -> Result<Vec<DesignSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM designs ORDER BY id DESC");
        sqlx::query_as::<_, DesignSummary>(&query)
            .fetch_all(pool)
            .await
    }

    /// Dashboard columns for every design with a known creation time.
    pub async fn list_samples(pool: &SqlitePool) -> Result<Vec<DesignSampleRow>, sqlx::Error> {
        sqlx::query_as::<_, DesignSampleRow>(
            "SELECT materials, production_method, clothing_type, \
                 CAST(sustainability_score AS INTEGER) AS sustainability_score, \
                 timestamp AS created_at \
             FROM designs WHERE timestamp IS NOT NULL ORDER BY id ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Care details for the design carrying `qr_code_id`.
    pub async fn find_care_by_qr_code(
        pool: &SqlitePool,
        qr_code_id: &str,
    ) -> Result<Option<CareLookup>, sqlx::Error> {
        sqlx::query_as::<_, CareLookup>(
            "SELECT care_instructions, materials, clothing_type, style \
             FROM designs WHERE qr_code_id = $1 ORDER BY id DESC LIMIT 1",
        )
        .bind(qr_code_id)
        .fetch_optional(pool)
        .await
    }
}
