use std::sync::Arc;

use greenthreads_core::generation::{FabricClassifier, ImageGenerator, TextGenerator};
use greenthreads_pipeline::{
    DesignService, DesignSettings, FabricAdvisor, ProductionOptimizer, TextileGenerator,
};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    pub pool: greenthreads_db::DbPool,
    pub config: Arc<ServerConfig>,
    pub designs: Arc<DesignService>,
    pub fabric: Arc<FabricAdvisor>,
    pub textiles: Arc<TextileGenerator>,
    pub production: Arc<ProductionOptimizer>,
}

/// The generative adapters the services run on.
pub struct Generators {
    pub images: Arc<dyn ImageGenerator>,
    /// Design advisories, textiles and production recommendations.
    pub text: Arc<dyn TextGenerator>,
    /// Fabric analysis and Q&A.
    pub fabric_text: Arc<dyn TextGenerator>,
    pub classifier: Arc<dyn FabricClassifier>,
}

impl AppState {
    pub fn new(pool: greenthreads_db::DbPool, config: ServerConfig, generators: Generators) -> Self {
        let settings = DesignSettings {
            user_id: config.default_user_id.clone(),
            qr_codes_enabled: config.qr_codes_enabled,
            ..Default::default()
        };

        Self {
            designs: Arc::new(DesignService::new(
                pool.clone(),
                generators.images,
                Arc::clone(&generators.text),
                settings,
            )),
            fabric: Arc::new(FabricAdvisor::new(generators.classifier, generators.fabric_text)),
            textiles: Arc::new(TextileGenerator::new(Arc::clone(&generators.text))),
            production: Arc::new(ProductionOptimizer::new(generators.text)),
            pool,
            config: Arc::new(config),
        }
    }
}
