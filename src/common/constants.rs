use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Flickr REST endpoint; every call goes through this single URL
pub const FLICKR_API_URL: &str = "https://api.flickr.com/services/rest/";

/// Remote method for the "interesting photos" feed
pub const INTERESTING_PHOTOS_METHOD: &str = "flickr.interestingness.getList";

/// Response format requested from the API
pub const RESPONSE_FORMAT: &str = "json";

/// Shown in place of a photo whose image failed to load
pub const PHOTO_UNAVAILABLE_URL: &str = "https://s.yimg.com/pw/images/en-us/photo_unavailable_h.png";

/// Title shown alongside the placeholder image
pub const PHOTO_UNAVAILABLE_TITLE: &str = "Image unavailable";

/// Cover region text when the first photo cannot be loaded
pub const COVER_LOAD_FAILED: &str = "Failed to load image.";

/// Reported when the fallback timer wins the race against the API
pub const LOAD_TIMED_OUT: &str = "Failed to load images from Flickr.";

/// Fallback used when a failure envelope carries an unrecognised code
pub const UNKNOWN_API_ERROR: &str = "Unknown error: Please try again later.";

/// Reported when the API answers with an empty photo list
pub const EMPTY_RESULT: &str = "No photos were returned.";

pub const DEFAULT_LOAD_TIMEOUT_SECS: u64 = 5;

// Environment variables read by the configuration layer
pub const ENV_API_KEY: &str = "FLICKR_API_KEY";
pub const ENV_API_URL: &str = "FLICKR_API_URL";
pub const ENV_LOAD_TIMEOUT_SECS: &str = "GALLERY_LOAD_TIMEOUT_SECS";
pub const ENV_PER_PAGE: &str = "GALLERY_PER_PAGE";

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "gallery.toml";

/// Flickr API error codes mapped to user-facing messages.
///
/// Built once on first access and never mutated afterwards.
pub static API_ERROR_MESSAGES: Lazy<HashMap<i64, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (
            1,
            "Not a valid date string. The date string passed did not validate. \
             All dates must be formatted : YYYY-MM-DD.",
        ),
        (
            100,
            "Invalid API Key. The API key passed was not valid or has expired.",
        ),
        (
            105,
            "Service currently unavailable. The requested service is temporarily unavailable.",
        ),
        (
            106,
            "Write operation failed. The requested operation failed due to a temporary issue.",
        ),
        (
            116,
            "Bad URL found. One or more arguments contained a URL that has been used for abuse on Flickr.",
        ),
    ])
});

/// Resolve an API error code to its message, falling back to the generic text
pub fn api_error_message(code: i64) -> &'static str {
    API_ERROR_MESSAGES
        .get(&code)
        .copied()
        .unwrap_or(UNKNOWN_API_ERROR)
}
