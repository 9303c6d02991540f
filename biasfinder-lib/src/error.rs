use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while talking to the catalog backend or loading configuration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The backend answered with a non-success status. `message` is the raw response body.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Invalid API url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Config I/O error: {0}")]
    ConfigIo(#[from] std::io::Error),
    #[error("Malformed config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}
