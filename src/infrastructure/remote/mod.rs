pub mod mosart;

use std::sync::Arc;
use std::time::Duration;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BridgeError;
use crate::domain::models::RemoteBox;

pub struct RemoteManager {}

impl RemoteManager {
    pub fn get() -> Result<RemoteBox, BridgeError> {
        let host = Config::get(ConfigKey::Host);
        if host.is_empty() {
            return Err(BridgeError::Config(
                "Target host is not specified".to_string(),
            ));
        }

        let port = Config::get(ConfigKey::Port);
        let timeout = Config::get(ConfigKey::RequestTimeout)
            .parse::<u64>()
            .unwrap_or(1000);

        return Ok(Arc::new(mosart::MosartClient::new(
            &format!("http://{host}:{port}"),
            &Config::get(ConfigKey::ApiKey),
            Config::get(ConfigKey::UseWebApi) == "true",
            Duration::from_millis(timeout),
        )));
    }
}
