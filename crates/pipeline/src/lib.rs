//! Request orchestration over the generative adapters and the record store.

pub mod design;
pub mod fabric;
pub mod production;
pub mod textile;

use greenthreads_core::error::CoreError;
use greenthreads_core::generation::GenerationError;

pub use design::{DesignOutcome, DesignService, DesignSettings, LoggingProgress};
pub use fabric::{FabricAdvisor, FabricAnalysis};
pub use production::{ProductionOptimizer, ProductionOutcome};
pub use textile::{TextileGenerator, TextileOutcome};

/// Errors surfaced by the fabric advisor. The text-only features absorb
/// generation failures into warnings instead.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}
