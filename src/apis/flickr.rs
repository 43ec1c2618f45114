use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::app::http::{request, HttpFailure};
use crate::app::ports::{HttpClientPort, HttpMethod};
use crate::common::constants::{api_error_message, INTERESTING_PHOTOS_METHOD, RESPONSE_FORMAT};
use crate::common::error::{GalleryError, Result};
use crate::common::QueryParams;
use crate::config::GalleryConfig;
use crate::domain::{PhotoPage, PhotoRecord};
use crate::observability::metrics;

/// Parsed Flickr response envelope, discriminated by its `stat` field
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "stat", rename_all = "lowercase")]
pub enum ApiEnvelope {
    Ok {
        photos: PhotoPage,
    },
    Fail {
        #[serde(default)]
        code: Option<i64>,
        #[serde(default)]
        message: Option<String>,
    },
}

impl ApiEnvelope {
    /// Extract the photo list, or turn a failure envelope into an API error.
    ///
    /// An explicit `message` wins over the code table.
    pub fn into_photos(self) -> Result<Vec<PhotoRecord>> {
        match self {
            ApiEnvelope::Ok { photos } => Ok(photos.photo),
            ApiEnvelope::Fail { code, message } => {
                let message = message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| match code {
                        Some(code) => api_error_message(code).to_string(),
                        None => crate::common::constants::UNKNOWN_API_ERROR.to_string(),
                    });
                Err(GalleryError::Api { code, message })
            }
        }
    }
}

/// Client for the single remote operation the gallery needs
pub struct FlickrService {
    api_key: String,
    api_url: String,
    per_page: Option<u32>,
    http: Arc<dyn HttpClientPort>,
}

impl FlickrService {
    pub fn new(config: &GalleryConfig, http: Arc<dyn HttpClientPort>) -> Self {
        Self {
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
            per_page: config.per_page,
            http,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Standard parameters for a REST method call
    pub fn params_for_method(&self, method: &str) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("method", method)
            .push("nojsoncallback", 1)
            .push("format", RESPONSE_FORMAT)
            .push("api_key", &self.api_key);
        if let Some(per_page) = self.per_page {
            params.push("per_page", per_page);
        }
        params
    }

    /// Request the interesting-photos feed and parse the envelope.
    ///
    /// A failure envelope is still `Ok` here; classification is left to
    /// [`ApiEnvelope::into_photos`].
    #[instrument(skip(self))]
    pub async fn fetch_interesting_photos(&self) -> Result<ApiEnvelope> {
        let params = self.params_for_method(INTERESTING_PHOTOS_METHOD);
        let started = Instant::now();
        let outcome = request(self.http.as_ref(), HttpMethod::Post, &self.api_url, Some(&params)).await;
        metrics::sources::request_duration(started.elapsed().as_secs_f64());

        match outcome {
            Ok(body) => {
                metrics::sources::request_success();
                debug!(bytes = body.len(), "received photo list response");
                serde_json::from_str::<ApiEnvelope>(&body).map_err(|e| {
                    warn!(error = %e, "photo list response is not a valid envelope");
                    GalleryError::MalformedResponse(e.to_string())
                })
            }
            Err(failure) => {
                metrics::sources::request_error();
                Err(Self::classify_rejection(failure))
            }
        }
    }

    /// Fetch and classify in one step
    pub async fn interesting_photos(&self) -> Result<Vec<PhotoRecord>> {
        let photos = self.fetch_interesting_photos().await?.into_photos()?;
        info!("Successfully fetched {} photos from Flickr", photos.len());
        metrics::sources::photos_fetched(photos.len());
        Ok(photos)
    }

    /// A rejected request may still carry a JSON failure envelope in its body;
    /// anything else becomes a transport error with the status text.
    fn classify_rejection(failure: HttpFailure) -> GalleryError {
        let envelope = failure
            .body
            .as_deref()
            .and_then(|body| serde_json::from_str::<ApiEnvelope>(body).ok());
        match envelope {
            Some(env @ ApiEnvelope::Fail { .. }) => match env.into_photos() {
                Err(err) => err,
                Ok(_) => GalleryError::Transport(failure.to_string()),
            },
            _ => {
                warn!(%failure, "photo list request failed");
                GalleryError::Transport(failure.to_string())
            }
        }
    }
}
