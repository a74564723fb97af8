//! Shared application state

use crate::config::Config;
use crate::Result;
use ayush_terminology::{Catalog, TerminologyEngine};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: Arc<TerminologyEngine>,
}

impl AppState {
    /// Load the configured catalog (or the built-in one) and build the engine
    pub fn new(config: Config) -> Result<Self> {
        let catalog = match &config.catalog.path {
            Some(path) => {
                let catalog = Catalog::from_path(path)?;
                tracing::info!(path = %path.display(), groups = catalog.len(), "Catalog loaded");
                catalog
            }
            None => {
                let catalog = Catalog::builtin();
                tracing::info!(groups = catalog.len(), "Using built-in catalog");
                catalog
            }
        };

        let engine = TerminologyEngine::with_options(catalog, config.engine_options());
        Ok(Self::with_engine(config, engine))
    }

    pub fn with_engine(config: Config, engine: TerminologyEngine) -> Self {
        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
        }
    }
}
