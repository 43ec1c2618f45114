use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    /// Network failure or a non-2xx HTTP status
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The API answered with `stat: "fail"`
    #[error("{message}")]
    Api { code: Option<i64>, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("No photos were returned")]
    EmptyResult,

    /// A single image failed to load; recovered in place by the lightbox
    #[error("Image failed to load: {0}")]
    ImageLoad(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

impl GalleryError {
    /// Every kind except an image load failure ends the current load attempt
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GalleryError::ImageLoad(_))
    }

    /// Short label used for metrics and structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            GalleryError::Transport(_) => "transport",
            GalleryError::Api { .. } => "api",
            GalleryError::MalformedResponse(_) => "malformed_response",
            GalleryError::EmptyResult => "empty_result",
            GalleryError::ImageLoad(_) => "image_load",
            GalleryError::Timeout(_) => "timeout",
            GalleryError::Config(_) | GalleryError::Toml(_) | GalleryError::Env(_) => "config",
            GalleryError::Io(_) => "io",
        }
    }
}

impl From<serde_json::Error> for GalleryError {
    fn from(err: serde_json::Error) -> Self {
        GalleryError::MalformedResponse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;
