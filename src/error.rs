use thiserror::Error;

/// Process-level failures. Per-request errors (bad path, missing file,
/// mid-stream read faults) never surface here; they are handled inside the
/// filter engine and the handlers.
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Failed to load configuration: {0}")]
    Config(String),

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}
