pub mod flickr;

pub use flickr::{ApiEnvelope, FlickrService};
