use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkscanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid pattern `{pattern}` in category `{category}`: {reason}")]
    InvalidPattern {
        category: String,
        pattern: String,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl LinkscanError {
    pub fn config(msg: impl Into<String>) -> Self {
        LinkscanError::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, LinkscanError>;
