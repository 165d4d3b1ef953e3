use crate::config::Config;
use crate::report::ReportService;
use crate::store::ProductStore;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Shared application state accessible to all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,

    pub reports: Arc<ReportService>,

    /// Limits concurrent report exports
    pub export_semaphore: Arc<Semaphore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>, config: &Config) -> Self {
        let export_semaphore = Arc::new(Semaphore::new(config.export.max_concurrent.max(1)));

        Self {
            reports: Arc::new(ReportService::new(store.clone())),
            store,
            export_semaphore,
        }
    }
}
