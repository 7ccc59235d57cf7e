use thiserror::Error;

/// Application-wide result type
pub type Result<T> = anyhow::Result<T>;

/// API-specific errors with typed variants for matching
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid Overseerr URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("API key contains characters that cannot be sent in a header")]
    InvalidApiKey,

    #[error("unexpected response: {status}{}", format_body(.body))]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

fn format_body(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!(" ({})", body)
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("OVERSEERR_URL not set. Use 'overseerr config set-url <url>' or set OVERSEERR_URL")]
    MissingUrl,

    #[error("OVERSEERR_API_KEY not set. Use 'overseerr config set-key <key>' or set OVERSEERR_API_KEY")]
    MissingApiKey,

    #[error("Could not determine the home directory for the config file")]
    NoConfigDir,

    #[error("Invalid config file: {0}")]
    Invalid(String),

    #[error("Failed to save config: {0}")]
    SaveFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
