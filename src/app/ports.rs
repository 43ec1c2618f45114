use async_trait::async_trait;
use std::fmt;

use crate::domain::PhotoRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// Raw outcome of one HTTP exchange, before any status classification
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub content_length: u64,
}

impl HttpResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Transport seam. `Err` means no response was received at all.
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn send(&self, method: HttpMethod, url: &str) -> Result<HttpResponse, String>;
}

/// Render target for the gallery cover, the lightbox and the error surface
#[async_trait]
pub trait GalleryViewPort: Send + Sync {
    async fn show_cover(&self, photo: &PhotoRecord);
    async fn show_cover_failed(&self, message: &str);
    async fn show_photo(&self, photo: &PhotoRecord);
    async fn show_unavailable(&self, image_url: &str, title: &str);
    async fn set_lightbox_visible(&self, visible: bool);
    async fn show_error(&self, message: &str);
}
