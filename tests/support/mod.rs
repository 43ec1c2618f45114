#![allow(dead_code)]

use async_trait::async_trait;
use flickr_gallery::app::ports::{GalleryViewPort, HttpClientPort, HttpMethod, HttpResponse};
use flickr_gallery::PhotoRecord;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub const API_URL: &str = "https://api.test/services/rest/";

/// Serves the photo-list endpoint and image URLs from memory
pub struct FakeFlickr {
    pub api_status: u16,
    pub api_body: String,
    pub api_delay: Duration,
    pub api_unreachable: bool,
    pub broken_images: HashSet<String>,
    pub requests: Arc<Mutex<Vec<(HttpMethod, String)>>>,
}

impl FakeFlickr {
    pub fn answering(body: Value) -> Self {
        Self {
            api_status: 200,
            api_body: body.to_string(),
            api_delay: Duration::ZERO,
            api_unreachable: false,
            broken_images: HashSet::new(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_raw_body(mut self, status: u16, body: &str) -> Self {
        self.api_status = status;
        self.api_body = body.to_string();
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.api_delay = delay;
        self
    }

    pub fn unreachable(mut self) -> Self {
        self.api_unreachable = true;
        self
    }

    pub fn breaking(mut self, url: String) -> Self {
        self.broken_images.insert(url);
        self
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "",
    }
}

#[async_trait]
impl HttpClientPort for FakeFlickr {
    async fn send(&self, method: HttpMethod, url: &str) -> Result<HttpResponse, String> {
        self.requests.lock().await.push((method, url.to_string()));

        let (status, bytes) = if url.starts_with(API_URL) {
            if !self.api_delay.is_zero() {
                tokio::time::sleep(self.api_delay).await;
            }
            if self.api_unreachable {
                return Err("connection refused".to_string());
            }
            (self.api_status, self.api_body.as_bytes().to_vec())
        } else if self.broken_images.contains(url) {
            (404, Vec::new())
        } else {
            (200, vec![0xff, 0xd8, 0xff])
        };

        Ok(HttpResponse {
            status,
            status_text: reason(status).to_string(),
            content_length: bytes.len() as u64,
            bytes,
            content_type: "application/octet-stream".to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Cover(String),
    CoverFailed(String),
    Photo(String),
    Unavailable { image_url: String, title: String },
    Visible(bool),
    Error(String),
}

/// Records every view update in order
#[derive(Default)]
pub struct RecordingView {
    pub events: Arc<Mutex<Vec<ViewEvent>>>,
}

impl RecordingView {
    pub async fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().await.clone()
    }

    pub async fn errors(&self) -> Vec<String> {
        self.events()
            .await
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Error(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    pub async fn last(&self) -> Option<ViewEvent> {
        self.events.lock().await.last().cloned()
    }
}

#[async_trait]
impl GalleryViewPort for RecordingView {
    async fn show_cover(&self, photo: &PhotoRecord) {
        self.events.lock().await.push(ViewEvent::Cover(photo.id.clone()));
    }

    async fn show_cover_failed(&self, message: &str) {
        self.events.lock().await.push(ViewEvent::CoverFailed(message.to_string()));
    }

    async fn show_photo(&self, photo: &PhotoRecord) {
        self.events.lock().await.push(ViewEvent::Photo(photo.id.clone()));
    }

    async fn show_unavailable(&self, image_url: &str, title: &str) {
        self.events.lock().await.push(ViewEvent::Unavailable {
            image_url: image_url.to_string(),
            title: title.to_string(),
        });
    }

    async fn set_lightbox_visible(&self, visible: bool) {
        self.events.lock().await.push(ViewEvent::Visible(visible));
    }

    async fn show_error(&self, message: &str) {
        self.events.lock().await.push(ViewEvent::Error(message.to_string()));
    }
}

pub fn photo_json(id: &str) -> Value {
    json!({
        "id": id, "owner": "owner", "secret": "sec", "server": "7", "farm": 1,
        "title": format!("Photo {id}"), "ispublic": 1, "isfriend": 0, "isfamily": 0
    })
}

pub fn ok_envelope(ids: &[&str]) -> Value {
    let photos: Vec<Value> = ids.iter().map(|id| photo_json(id)).collect();
    json!({
        "photos": { "page": 1, "pages": 1, "perpage": 100, "total": ids.len(), "photo": photos },
        "stat": "ok"
    })
}

pub fn photo_url(id: &str) -> String {
    format!("https://farm1.staticflickr.com/7/{id}_sec.jpg")
}
