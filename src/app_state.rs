use crate::config::GatewayConfig;
use crate::credentials::TokenProvider;
use std::sync::Arc;

/// Shared dependencies, read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    /// Lowercased category allow-list, built once from configuration.
    pub allowed_categories: Arc<Vec<String>>,
    pub http: reqwest::Client,
    pub credential: Arc<dyn TokenProvider>,
}

impl AppState {
    pub fn new(
        config: GatewayConfig,
        http: reqwest::Client,
        credential: Arc<dyn TokenProvider>,
    ) -> Self {
        let allowed_categories = Arc::new(config.upstream.allowed_categories());
        Self {
            config: Arc::new(config),
            allowed_categories,
            http,
            credential,
        }
    }
}
