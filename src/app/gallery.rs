use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

use crate::apis::FlickrService;
use crate::app::lightbox::{LightboxController, RenderOutcome};
use crate::app::ports::{GalleryViewPort, HttpClientPort};
use crate::common::constants::{COVER_LOAD_FAILED, EMPTY_RESULT, LOAD_TIMED_OUT};
use crate::common::error::{GalleryError, Result};
use crate::config::GalleryConfig;
use crate::observability::metrics;

/// Keys the lightbox reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Left,
    Right,
    Other,
}

impl Key {
    /// Map a typed key name (`esc`, `left`, `n`, ...) to a key
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "esc" | "escape" => Key::Escape,
            "left" | "p" | "prev" => Key::Left,
            "right" | "n" | "next" => Key::Right,
            _ => Key::Other,
        }
    }
}

/// Gallery page: cover thumbnail, lightbox and error surface.
///
/// Drives a single load attempt raced against a deadline, then routes user
/// input to the lightbox controller.
pub struct Gallery {
    service: FlickrService,
    lightbox: LightboxController,
    http: Arc<dyn HttpClientPort>,
    view: Arc<dyn GalleryViewPort>,
    load_timeout: Duration,
    lightbox_visible: bool,
}

impl Gallery {
    pub fn new(
        config: &GalleryConfig,
        http: Arc<dyn HttpClientPort>,
        view: Arc<dyn GalleryViewPort>,
    ) -> Self {
        Self {
            service: FlickrService::new(config, http.clone()),
            lightbox: LightboxController::new(
                http.clone(),
                view.clone(),
                config.placeholder_image_url.clone(),
            ),
            http,
            view,
            load_timeout: config.load_timeout(),
            lightbox_visible: false,
        }
    }

    pub fn lightbox(&self) -> &LightboxController {
        &self.lightbox
    }

    pub fn is_lightbox_visible(&self) -> bool {
        self.lightbox_visible
    }

    /// Fetch the photo list and render the cover and first lightbox photo.
    ///
    /// The request races the load deadline. Whichever finishes first decides
    /// the outcome; the loser is dropped, so a response arriving after the
    /// deadline is never rendered and the deadline never fires after a
    /// response. Every terminal error is reported to the view exactly once.
    #[instrument(skip(self), fields(timeout = ?self.load_timeout))]
    pub async fn load(&mut self) -> Result<usize> {
        let fetched = tokio::time::timeout(self.load_timeout, self.service.interesting_photos()).await;

        let photos = match fetched {
            Ok(Ok(photos)) => photos,
            Ok(Err(e)) => return Err(self.report(e).await),
            Err(_) => {
                metrics::bootstrap::timed_out();
                return Err(self.report(GalleryError::Timeout(self.load_timeout)).await);
            }
        };

        if let Err(e) = self.lightbox.on_photos_fetched(photos) {
            return Err(self.report(e).await);
        }

        self.render_cover().await;
        self.lightbox.render().await;
        info!("gallery ready with {} photos", self.lightbox.len());
        Ok(self.lightbox.len())
    }

    async fn report(&self, err: GalleryError) -> GalleryError {
        error!(kind = err.kind(), error = %err, "gallery load failed");
        metrics::bootstrap::load_error(err.kind());
        let message = match &err {
            GalleryError::Timeout(_) => LOAD_TIMED_OUT.to_string(),
            GalleryError::EmptyResult => EMPTY_RESULT.to_string(),
            other => other.to_string(),
        };
        self.view.show_error(&message).await;
        err
    }

    /// Show the first photo as the clickable cover
    pub async fn render_cover(&self) {
        let Some(cover) = self.lightbox.photos().first() else {
            return;
        };
        match cover.fetch_image_bytes(self.http.as_ref()).await {
            Ok(_) => self.view.show_cover(cover).await,
            Err(e) => {
                warn!(error = %e, "cover image failed to load");
                self.view.show_cover_failed(COVER_LOAD_FAILED).await;
            }
        }
    }

    /// Cover click. Only opens once photos are loaded.
    pub async fn open_lightbox(&mut self) -> bool {
        if !self.lightbox.is_loaded() {
            return false;
        }
        if !self.lightbox_visible {
            self.lightbox_visible = true;
            self.view.set_lightbox_visible(true).await;
        }
        true
    }

    pub async fn close_lightbox(&mut self) {
        if self.lightbox_visible {
            self.lightbox_visible = false;
            self.view.set_lightbox_visible(false).await;
        }
    }

    /// Next button
    pub async fn next(&mut self) -> Option<RenderOutcome> {
        self.lightbox.next().await
    }

    /// Previous button
    pub async fn prev(&mut self) -> Option<RenderOutcome> {
        self.lightbox.prev().await
    }

    /// Keyboard handler; keys are ignored while the lightbox is hidden
    pub async fn handle_key(&mut self, key: Key) -> Option<RenderOutcome> {
        if !self.lightbox_visible {
            return None;
        }
        match key {
            Key::Escape => {
                self.close_lightbox().await;
                None
            }
            Key::Left => self.prev().await,
            Key::Right => self.next().await,
            Key::Other => None,
        }
    }
}
