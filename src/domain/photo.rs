use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::app::http::get_binary;
use crate::app::ports::HttpClientPort;
use crate::common::error::{GalleryError, Result};

/// One photo from the interesting-photos feed.
///
/// The identifiers are opaque values issued by Flickr; together they address
/// the image on the static farm hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub title: String,
    pub owner: String,
    pub id: String,
    pub server: String,
    pub farm: u32,
    pub secret: String,
}

impl PhotoRecord {
    /// `https://farm{farm}.staticflickr.com/{server}/{id}_{secret}.jpg`
    pub fn display_url(&self) -> String {
        self.image_url(None)
    }

    /// Same as [`display_url`](Self::display_url) with the `_h` size suffix
    pub fn large_url(&self) -> String {
        self.image_url(Some("h"))
    }

    fn image_url(&self, size: Option<&str>) -> String {
        let suffix = size.map(|s| format!("_{s}")).unwrap_or_default();
        format!(
            "https://farm{}.staticflickr.com/{}/{}_{}{}.jpg",
            self.farm, self.server, self.id, self.secret, suffix
        )
    }

    /// Fetch the display image to confirm it loads before it is shown
    #[instrument(skip(self, http), fields(photo_id = %self.id))]
    pub async fn fetch_image_bytes(&self, http: &dyn HttpClientPort) -> Result<Vec<u8>> {
        let url = self.display_url();
        match get_binary(http, &url).await {
            Ok(bytes) => {
                debug!(size = bytes.len(), "image loaded");
                Ok(bytes)
            }
            Err(failure) => {
                warn!(%failure, "image failed to load");
                let message = match failure.status {
                    Some(_) => format!("Failed to load image; error code:{}", failure.status_text),
                    None => failure.status_text,
                };
                Err(GalleryError::ImageLoad(message))
            }
        }
    }
}

/// The `photos` object of a successful envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhotoPage {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub perpage: Option<u32>,
    #[serde(default)]
    pub total: Option<serde_json::Value>,
    pub photo: Vec<PhotoRecord>,
}
