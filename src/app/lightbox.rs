use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::app::ports::{GalleryViewPort, HttpClientPort};
use crate::common::constants::PHOTO_UNAVAILABLE_TITLE;
use crate::common::error::{GalleryError, Result};
use crate::domain::PhotoRecord;
use crate::observability::metrics;

/// Photos plus a cursor. `cursor < photos.len()` holds whenever `Loaded`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightboxState {
    Empty,
    Loaded { photos: Vec<PhotoRecord>, cursor: usize },
}

/// What a render ended up putting in the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Shown,
    /// The image failed to load and the placeholder was shown instead
    Unavailable,
}

/// Owns the photo list and cursor; the only writer of either
pub struct LightboxController {
    state: LightboxState,
    http: Arc<dyn HttpClientPort>,
    view: Arc<dyn GalleryViewPort>,
    placeholder_url: String,
}

impl LightboxController {
    pub fn new(
        http: Arc<dyn HttpClientPort>,
        view: Arc<dyn GalleryViewPort>,
        placeholder_url: impl Into<String>,
    ) -> Self {
        Self {
            state: LightboxState::Empty,
            http,
            view,
            placeholder_url: placeholder_url.into(),
        }
    }

    pub fn state(&self) -> &LightboxState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, LightboxState::Loaded { .. })
    }

    pub fn cursor(&self) -> Option<usize> {
        match &self.state {
            LightboxState::Empty => None,
            LightboxState::Loaded { cursor, .. } => Some(*cursor),
        }
    }

    pub fn photos(&self) -> &[PhotoRecord] {
        match &self.state {
            LightboxState::Empty => &[],
            LightboxState::Loaded { photos, .. } => photos,
        }
    }

    pub fn len(&self) -> usize {
        self.photos().len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos().is_empty()
    }

    pub fn current(&self) -> Option<&PhotoRecord> {
        match &self.state {
            LightboxState::Empty => None,
            LightboxState::Loaded { photos, cursor } => photos.get(*cursor),
        }
    }

    /// `Empty -> Loaded(photos, 0)`.
    ///
    /// An empty list is refused with [`GalleryError::EmptyResult`] and the
    /// controller stays `Empty`. The list is populated once; a second call
    /// while loaded leaves the existing list untouched.
    pub fn on_photos_fetched(&mut self, photos: Vec<PhotoRecord>) -> Result<()> {
        if photos.is_empty() {
            warn!("photo list is empty, nothing to show");
            return Err(GalleryError::EmptyResult);
        }
        if self.is_loaded() {
            warn!("photo list already loaded, ignoring {} new photos", photos.len());
            return Ok(());
        }
        info!("lightbox loaded with {} photos", photos.len());
        self.state = LightboxState::Loaded { photos, cursor: 0 };
        Ok(())
    }

    /// Advance one photo, saturating at the last. `None` while `Empty`.
    pub async fn next(&mut self) -> Option<RenderOutcome> {
        self.step(Direction::Next)?;
        self.render().await
    }

    /// Go back one photo, saturating at the first. `None` while `Empty`.
    pub async fn prev(&mut self) -> Option<RenderOutcome> {
        self.step(Direction::Prev)?;
        self.render().await
    }

    fn step(&mut self, direction: Direction) -> Option<usize> {
        let LightboxState::Loaded { photos, cursor } = &mut self.state else {
            debug!("navigation ignored, no photos loaded");
            return None;
        };
        *cursor = direction.apply(*cursor, photos.len());
        metrics::lightbox::navigated(direction.label());
        Some(*cursor)
    }

    /// Load the current photo and swap it into the view.
    ///
    /// A failed load shows the placeholder; the cursor and list are left as
    /// they were so navigation keeps working.
    pub async fn render(&self) -> Option<RenderOutcome> {
        let photo = self.current()?;
        match photo.fetch_image_bytes(self.http.as_ref()).await {
            Ok(_) => {
                metrics::images::load_success();
                self.view.show_photo(photo).await;
                Some(RenderOutcome::Shown)
            }
            Err(e) => {
                metrics::images::load_error();
                warn!(photo_id = %photo.id, error = %e, "showing placeholder");
                self.view
                    .show_unavailable(&self.placeholder_url, PHOTO_UNAVAILABLE_TITLE)
                    .await;
                Some(RenderOutcome::Unavailable)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Next,
    Prev,
}

impl Direction {
    /// Clamp `cursor ± 1` into `0..len`; never wraps
    fn apply(self, cursor: usize, len: usize) -> usize {
        let last = len.saturating_sub(1);
        match self {
            Direction::Next => cursor.saturating_add(1).min(last),
            Direction::Prev => cursor.saturating_sub(1).min(last),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Direction::Next => "next",
            Direction::Prev => "prev",
        }
    }
}
