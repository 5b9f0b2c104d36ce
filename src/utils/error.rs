use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Upstream {service} request failed: {source}")]
    Upstream {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

pub type Result<T> = std::result::Result<T, ServiceError>;
