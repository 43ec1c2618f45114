// Common utilities and shared types used across the application

pub mod constants;
pub mod error;
pub mod query;

// Re-export commonly used items at module root for convenience
pub use error::{GalleryError, Result};
pub use query::{stringify, QueryParams};
