use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChangelogError {
    /// Transport failure talking to the listing host
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to parse URL: {0}")]
    UrlParse(String),

    /// A release block with a body lacks one of its header fields
    #[error("Release block is missing its {0}")]
    MissingField(&'static str),

    #[error("Failed to write changelog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode release: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChangelogError>;
