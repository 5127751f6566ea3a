use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Teams API reports bad request [HTTP:{status}] {status_message}: {body}")]
    Rejected {
        status: u16,
        status_message: String,
        body: String,
    },

    #[error("Teams API error [HTTP:{status}]: {body}")]
    Upstream { status: u16, body: String },

    #[error("Decryption failed: {0}")]
    Decrypt(String),

    #[error("Secret is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Invalid webhook URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid ARN: {0}")]
    InvalidArn(String),

    #[error("Invalid event time '{value}': {source}")]
    InvalidEventTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "No webhook URL found. Set TEAMS_HOOK_URL env var or add hook_url to ~/.config/teams-notify/config.toml"
    )]
    MissingHookUrl,

    #[error("Failed to read attachment from {path}: {source}")]
    AttachmentRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl NotifyError {
    /// Whether another delivery attempt may succeed. Only a 4xx rejection is final.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, NotifyError::Rejected { .. })
    }
}

pub type Result<T> = std::result::Result<T, NotifyError>;
