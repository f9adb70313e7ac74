//! Shared test setup: logging and in-memory service fixtures.

use std::env;
use std::sync::{Arc, Once};

use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::application::services::CategoryService;
use crate::config::Settings;
use crate::domain::{Category, CategoryId, CategoryStatus};
use crate::infrastructure::MemoryStore;

static TEST_SETUP: Once = Once::new();

/// Install the global tracing subscriber once per test binary.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "cathier=debug");
        }
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_target(true)
            .with_thread_names(false)
            .with_test_writer()
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Service over a fresh in-memory store; the store handle is returned for
/// direct inspection.
pub fn memory_service(settings: Settings) -> (Arc<MemoryStore>, CategoryService) {
    memory_service_with(settings, Vec::new())
}

/// Same as [`memory_service`] with pre-seeded records.
pub fn memory_service_with(
    settings: Settings,
    records: Vec<Category>,
) -> (Arc<MemoryStore>, CategoryService) {
    let store = Arc::new(MemoryStore::with_records(records));
    let service = CategoryService::new(store.clone(), Arc::new(settings));
    (store, service)
}

/// Active record with a fixed id, for seeding stores.
pub fn category(id: &str, name: &str, parent: Option<&str>) -> Category {
    Category {
        id: CategoryId::from(id),
        name: name.to_string(),
        parent: parent.map(CategoryId::from),
        status: CategoryStatus::Active,
    }
}
