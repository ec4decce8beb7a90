use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Feed error ({source_name}): {message}")]
    Feed { source_name: String, message: String },

    #[error("LLM API error: {0}")]
    LLMApi(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn feed(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Feed {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}
