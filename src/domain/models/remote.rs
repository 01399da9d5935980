use std::sync::Arc;

use async_trait::async_trait;

use super::BridgeError;

/// The narrow seam between the core and the HTTP transport. Implementations
/// own path prefix/version composition and header injection; callers supply
/// only the bare path suffix and query parameters.
///
/// A single attempt with a bounded timeout, no internal retry. Recovering
/// from a failed request is the caller's business, which for the status
/// poll means waiting for the next timer tick.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<String, BridgeError>;
}

pub type RemoteBox = Arc<dyn RemoteClient>;
