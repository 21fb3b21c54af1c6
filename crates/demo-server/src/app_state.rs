//! Shared application state.
//!
//! Built once at startup and handed to the router; the metrics registry lives
//! here instead of in process globals.

use std::sync::Arc;

use crate::obs::metrics::DemoMetrics;
use crate::store::KvStore;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn KvStore>,
    metrics: DemoMetrics,
}

impl AppState {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store, metrics: DemoMetrics::default() }),
        }
    }

    pub fn store(&self) -> &dyn KvStore {
        self.inner.store.as_ref()
    }

    pub fn metrics(&self) -> &DemoMetrics {
        &self.inner.metrics
    }
}
