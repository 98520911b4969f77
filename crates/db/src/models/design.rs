//! Design record models and DTOs.

use greenthreads_core::dashboard::DesignSample;
use greenthreads_core::design::{join_materials, DesignRequest};
use greenthreads_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A full row from the `designs` table, image included.
///
/// Attribute columns are nullable because legacy files gained them through
/// `ALTER TABLE ... ADD COLUMN`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Design {
    pub id: DbId,
    pub user_id: Option<String>,
    pub style: Option<String>,
    pub materials: Option<String>,
    pub clothing_type: Option<String>,
    pub production_method: Option<String>,
    pub packaging: Option<String>,
    pub production_location: Option<String>,
    pub shipping_method: Option<String>,
    pub base_color: Option<String>,
    pub custom_design: Option<String>,
    pub sustainability_score: Option<i64>,
    #[serde(skip)]
    pub design_image: Option<Vec<u8>>,
    pub qr_code_id: Option<String>,
    pub care_instructions: Option<String>,
    pub created_at: Option<Timestamp>,
}

/// A row from `designs` without the image blob.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DesignSummary {
    pub id: DbId,
    pub user_id: Option<String>,
    pub style: Option<String>,
    pub materials: Option<String>,
    pub clothing_type: Option<String>,
    pub production_method: Option<String>,
    pub packaging: Option<String>,
    pub production_location: Option<String>,
    pub shipping_method: Option<String>,
    pub base_color: Option<String>,
    pub custom_design: Option<String>,
    pub sustainability_score: Option<i64>,
    pub has_image: bool,
    pub qr_code_id: Option<String>,
    pub created_at: Option<Timestamp>,
}

/// DTO for inserting a design. Materials are stored `", "`-joined.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDesign {
    pub user_id: String,
    pub style: String,
    pub materials: String,
    pub clothing_type: String,
    pub production_method: String,
    pub packaging: String,
    pub production_location: String,
    pub shipping_method: String,
    pub base_color: String,
    pub custom_design: Option<String>,
    pub sustainability_score: i64,
    pub design_image: Option<Vec<u8>>,
    pub qr_code_id: Option<String>,
    pub care_instructions: Option<String>,
}

impl CreateDesign {
    pub fn from_request(user_id: &str, request: &DesignRequest, sustainability_score: i64) -> Self {
        Self {
            user_id: user_id.to_string(),
            style: request.style.clone(),
            materials: join_materials(&request.materials),
            clothing_type: request.clothing_type.clone(),
            production_method: request.production_method.clone(),
            packaging: request.packaging.clone(),
            production_location: request.production_location.clone(),
            shipping_method: request.shipping_method.clone(),
            base_color: request.base_color.clone(),
            custom_design: request.custom_design.clone(),
            sustainability_score,
            design_image: None,
            qr_code_id: None,
            care_instructions: None,
        }
    }
}

/// Public care lookup payload for a QR code id.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareLookup {
    pub care_instructions: Option<String>,
    pub materials: Option<String>,
    pub clothing_type: Option<String>,
    pub style: Option<String>,
}

/// The columns the dashboard reads.
#[derive(Debug, Clone, FromRow)]
pub struct DesignSampleRow {
    pub materials: Option<String>,
    pub production_method: Option<String>,
    pub clothing_type: Option<String>,
    pub sustainability_score: Option<i64>,
    pub created_at: Timestamp,
}

impl From<DesignSampleRow> for DesignSample {
    fn from(row: DesignSampleRow) -> Self {
        Self {
            materials: row.materials,
            production_method: row.production_method,
            clothing_type: row.clothing_type,
            sustainability_score: row.sustainability_score,
            created_at: row.created_at,
        }
    }
}
