pub mod apis;
pub mod app;
pub mod common;
pub mod config;
pub mod domain;
pub mod infra;
pub mod observability;

pub use common::error::{GalleryError, Result};
pub use config::GalleryConfig;
pub use domain::PhotoRecord;
