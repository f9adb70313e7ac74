//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::CategoryService;
use crate::config::Settings;
use crate::infrastructure::json_file::JsonFileStore;
use crate::infrastructure::traits::CategoryStore;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Category store shared by all services
    pub store: Arc<dyn CategoryStore>,

    pub categories: CategoryService,
}

impl ServiceContainer {
    /// Create a new service container backed by the JSON file in `settings.data_file`.
    pub fn new(settings: Settings) -> Self {
        let store = JsonFileStore::new(settings.data_file.clone())
            .with_timeout(settings.store_timeout());
        Self::with_deps(settings, Arc::new(store))
    }

    /// Create a service container with a custom store (for testing).
    pub fn with_deps(settings: Settings, store: Arc<dyn CategoryStore>) -> Self {
        let settings = Arc::new(settings);
        let categories = CategoryService::new(store.clone(), settings.clone());

        Self {
            settings,
            store,
            categories,
        }
    }
}
