use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::common::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_LOAD_TIMEOUT_SECS, ENV_API_KEY, ENV_API_URL,
    ENV_LOAD_TIMEOUT_SECS, ENV_PER_PAGE, FLICKR_API_URL, PHOTO_UNAVAILABLE_URL,
};
use crate::common::error::{GalleryError, Result};

/// Fixed runtime configuration; built once at startup and never mutated
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    pub api_key: String,
    pub api_url: String,
    pub load_timeout_secs: u64,
    pub per_page: Option<u32>,
    pub placeholder_image_url: String,
}

/// On-disk shape; every field optional so env vars can fill the gaps
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    flickr: Option<FlickrSection>,
    gallery: Option<GallerySection>,
}

#[derive(Debug, Default, Deserialize)]
struct FlickrSection {
    api_key: Option<String>,
    api_url: Option<String>,
    per_page: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct GallerySection {
    load_timeout_secs: Option<u64>,
    placeholder_image_url: Option<String>,
}

impl GalleryConfig {
    /// Load `path` (or `gallery.toml` if present), then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv::dotenv().ok();

        let file = match path {
            Some(path) => Some(Self::read_file(path)?),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Some(Self::read_file(Path::new(DEFAULT_CONFIG_FILE))?)
            }
            None => None,
        };

        Self::from_parts(file.unwrap_or_default(), |key| env::var(key).ok())
    }

    fn read_file(path: &Path) -> Result<FileConfig> {
        let content = fs::read_to_string(path).map_err(|e| {
            GalleryError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(toml::from_str(&content)?)
    }

    fn from_parts(file: FileConfig, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let flickr = file.flickr.unwrap_or_default();
        let gallery = file.gallery.unwrap_or_default();

        let api_key = lookup(ENV_API_KEY)
            .or(flickr.api_key)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                GalleryError::Config(format!(
                    "missing Flickr API key: set {} or [flickr].api_key",
                    ENV_API_KEY
                ))
            })?;

        let api_url = lookup(ENV_API_URL)
            .or(flickr.api_url)
            .unwrap_or_else(|| FLICKR_API_URL.to_string());

        let load_timeout_secs = match lookup(ENV_LOAD_TIMEOUT_SECS) {
            Some(raw) => parse_number(ENV_LOAD_TIMEOUT_SECS, &raw)?,
            None => gallery.load_timeout_secs.unwrap_or(DEFAULT_LOAD_TIMEOUT_SECS),
        };
        if load_timeout_secs == 0 {
            return Err(GalleryError::Config(
                "load timeout must be at least one second".to_string(),
            ));
        }

        let per_page = match lookup(ENV_PER_PAGE) {
            Some(raw) => Some(parse_number(ENV_PER_PAGE, &raw)?),
            None => flickr.per_page,
        };

        Ok(Self {
            api_key,
            api_url,
            load_timeout_secs,
            per_page,
            placeholder_image_url: gallery
                .placeholder_image_url
                .unwrap_or_else(|| PHOTO_UNAVAILABLE_URL.to_string()),
        })
    }

    /// Config for a known key with every other setting at its default
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: FLICKR_API_URL.to_string(),
            load_timeout_secs: DEFAULT_LOAD_TIMEOUT_SECS,
            per_page: None,
            placeholder_image_url: PHOTO_UNAVAILABLE_URL.to_string(),
        }
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_secs)
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| GalleryError::Config(format!("{} is not a valid number: '{}'", name, raw)))
}
