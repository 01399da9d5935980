#[cfg(test)]
#[path = "mosart_test.rs"]
mod tests;

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::models::BridgeError;
use crate::domain::models::RemoteClient;

const REST_PREFIX: &str = "/api/v1";
const WEB_PREFIX: &str = "/mosart/api/v1";
const API_KEY_HEADER: &str = "X-Api-Key";

fn transport_err(path: &str, err: reqwest::Error) -> BridgeError {
    return BridgeError::Transport {
        path: path.to_string(),
        message: err.to_string(),
    };
}

/// HTTP access to the Mosart REST API. The server exposes the same API on
/// two roots, bare on the REST port and under `/mosart` on the web port;
/// which one applies is fixed at construction. Every request is a single
/// attempt with a hard timeout, recovery is left to the next poll tick.
pub struct MosartClient {
    base_url: String,
    api_key: String,
    use_web_prefix: bool,
    timeout: Duration,
}

impl MosartClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        use_web_prefix: bool,
        timeout: Duration,
    ) -> MosartClient {
        return MosartClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            use_web_prefix,
            timeout,
        };
    }
}

#[async_trait]
impl RemoteClient for MosartClient {
    #[allow(clippy::implicit_return)]
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<String, BridgeError> {
        let prefix = if self.use_web_prefix {
            WEB_PREFIX
        } else {
            REST_PREFIX
        };
        let url = format!("{base}{prefix}/{path}", base = self.base_url);

        let res = reqwest::Client::new()
            .get(&url)
            .timeout(self.timeout)
            .header("Content-Type", "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|err| return transport_err(path, err))?;

        let status = res.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), path, "Mosart request failed");
            return Err(BridgeError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = res
            .text()
            .await
            .map_err(|err| return transport_err(path, err))?;
        tracing::debug!(path, "Mosart request succeeded");

        return Ok(body);
    }
}
