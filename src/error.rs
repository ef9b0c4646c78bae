use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{endpoint} responded with HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("{endpoint} reported failure: {message}")]
    Rejected { endpoint: String, message: String },

    #[error("{endpoint} did not respond within {timeout_ms}ms")]
    Timeout { endpoint: String, timeout_ms: u64 },
}

impl CatalogError {
    /// Short label for metrics and structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::Http(_) => "transport",
            CatalogError::Json(_) => "malformed_payload",
            CatalogError::Toml(_) | CatalogError::Config(_) => "config",
            CatalogError::Io(_) => "io",
            CatalogError::Status { .. } => "http_status",
            CatalogError::Rejected { .. } => "rejected",
            CatalogError::Timeout { .. } => "timeout",
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
