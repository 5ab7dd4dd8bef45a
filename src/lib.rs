//! Holdings aggregator
//!
//! Merges item availability, holding-only records, serial subscriptions and
//! electronic links of a library title into one ranked holdings view.

use std::sync::Arc;

pub mod config;
pub mod engine;
pub mod error;
pub mod marc;
pub mod models;
pub mod repository;
pub mod services;

pub use crate::config::AppConfig;
pub use crate::error::{HoldingsError, HoldingsResult};

/// Application state shared by every lookup
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig, fetcher: Arc<dyn repository::RecordFetcher>) -> Self {
        let services = services::Services::new(fetcher, &config);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
