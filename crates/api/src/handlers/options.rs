use axum::Json;
use greenthreads_core::catalog::{design_options, DesignOptions};
use greenthreads_core::production::{production_options, ProductionOptions};
use greenthreads_core::textile::{textile_options, TextileOptions};
use serde::Serialize;

use crate::response::DataResponse;

#[derive(Debug, Serialize)]
pub struct FormOptions {
    pub design: DesignOptions,
    pub textile: TextileOptions,
    pub production: ProductionOptions,
}

/// GET /options
pub async fn list_options() -> Json<DataResponse<FormOptions>> {
    Json(DataResponse {
        data: FormOptions {
            design: design_options(),
            textile: textile_options(),
            production: production_options(),
        },
    })
}
