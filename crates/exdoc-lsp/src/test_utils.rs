//! Test utilities for creating mock LSP clients and configs.

#[cfg(test)]
pub(crate) mod test_helpers {
    use crate::config::ExdocConfig;
    use crate::server::Backend;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use tower_lsp_server::Client;

    /// Creates a test client and config for handler tests.
    ///
    /// The client is not connected to anything. Tests that pre-populate
    /// documents in state never reach it.
    pub fn create_test_client_and_config() -> (Client, Arc<RwLock<ExdocConfig>>) {
        let (service, _socket) = tower_lsp_server::LspService::build(Backend::new).finish();
        let client = service.inner().client.clone();
        let config = Arc::new(RwLock::new(ExdocConfig::default()));
        (client, config)
    }
}
