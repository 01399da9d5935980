use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    /// The request never produced a usable response, network error or
    /// timeout.
    #[error("Request to {path} failed: {message}")]
    Transport { path: String, message: String },

    /// The server answered with a non-2xx status.
    #[error("Server returned {status} for {path}")]
    Status { path: String, status: u16 },

    /// A response body could not be parsed.
    #[error("Failed to parse response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An operation was invoked without the parameters it needs.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Take-last-out was requested before any overlay was taken in.
    #[error("No overlay has been taken in yet")]
    NoPriorTake,
}
