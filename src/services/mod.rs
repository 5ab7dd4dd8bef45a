//! Business logic services

pub mod holdings;

use std::sync::Arc;

use crate::{
    config::AppConfig,
    engine::{EngineSettings, HoldingsEngine},
    repository::RecordFetcher,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub holdings: holdings::HoldingsService,
}

impl Services {
    /// Create all services on top of the given record fetcher
    pub fn new(fetcher: Arc<dyn RecordFetcher>, config: &AppConfig) -> Self {
        let settings = EngineSettings::new(config.holdings.clone(), &config.translations);
        let engine = HoldingsEngine::new(Arc::new(settings));
        Self {
            holdings: holdings::HoldingsService::new(fetcher, engine),
        }
    }
}
