//! Metrics for the gallery.
//!
//! Recording goes through the `metrics` facade; when no recorder is
//! installed the calls are no-ops, so library users and tests pay nothing.

use std::fmt;
use std::sync::OnceLock;
use tracing::info;

/// Enum representing all metric names used in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Photo-list requests
    SourcesRequestsSuccess,
    SourcesRequestsError,
    SourcesRequestDuration,
    SourcesPhotosFetched,

    // Image loads
    ImagesLoadSuccess,
    ImagesLoadError,

    // Lightbox
    LightboxNavigations,

    // Bootstrap
    LoadTimeouts,
    LoadErrors,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::SourcesRequestsSuccess => "gallery_sources_requests_success_total",
            MetricName::SourcesRequestsError => "gallery_sources_requests_error_total",
            MetricName::SourcesRequestDuration => "gallery_sources_request_duration_seconds",
            MetricName::SourcesPhotosFetched => "gallery_sources_photos_fetched",
            MetricName::ImagesLoadSuccess => "gallery_images_load_success_total",
            MetricName::ImagesLoadError => "gallery_images_load_error_total",
            MetricName::LightboxNavigations => "gallery_lightbox_navigations_total",
            MetricName::LoadTimeouts => "gallery_load_timeouts_total",
            MetricName::LoadErrors => "gallery_load_errors_total",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static METRICS_HANDLE: OnceLock<metrics_exporter_prometheus::PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Safe to call once per process.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {}", e))?;
    METRICS_HANDLE.set(handle).ok();
    info!("Metrics system initialized");
    Ok(())
}

/// Prometheus exposition text, if a recorder was installed
pub fn render() -> Option<String> {
    METRICS_HANDLE.get().map(|handle| handle.render())
}

pub mod sources {
    use super::MetricName;

    pub fn request_success() {
        ::metrics::counter!(MetricName::SourcesRequestsSuccess.as_str()).increment(1);
    }

    pub fn request_error() {
        ::metrics::counter!(MetricName::SourcesRequestsError.as_str()).increment(1);
    }

    pub fn request_duration(secs: f64) {
        ::metrics::histogram!(MetricName::SourcesRequestDuration.as_str()).record(secs);
    }

    pub fn photos_fetched(count: usize) {
        ::metrics::histogram!(MetricName::SourcesPhotosFetched.as_str()).record(count as f64);
    }
}

pub mod images {
    use super::MetricName;

    pub fn load_success() {
        ::metrics::counter!(MetricName::ImagesLoadSuccess.as_str()).increment(1);
    }

    pub fn load_error() {
        ::metrics::counter!(MetricName::ImagesLoadError.as_str()).increment(1);
    }
}

pub mod lightbox {
    use super::MetricName;

    /// `direction` is "next" or "prev"
    pub fn navigated(direction: &'static str) {
        ::metrics::counter!(MetricName::LightboxNavigations.as_str(), "direction" => direction)
            .increment(1);
    }
}

pub mod bootstrap {
    use super::MetricName;

    pub fn timed_out() {
        ::metrics::counter!(MetricName::LoadTimeouts.as_str()).increment(1);
    }

    pub fn load_error(kind: &'static str) {
        ::metrics::counter!(MetricName::LoadErrors.as_str(), "kind" => kind).increment(1);
    }
}
