use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Proxy returned status {status} for {url}")]
    Proxy { url: String, status: u16 },

    #[error("Could not find JSON data in the page")]
    PayloadNotFound,

    #[error("Could not extract page data: {0}")]
    PageDataNotFound(String),

    #[error("Invalid topic id: {0:?}")]
    InvalidTopic(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for failures that happened before any HTML was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Status { .. } | Error::Proxy { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
