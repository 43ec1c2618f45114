pub mod gallery;
pub mod http;
pub mod lightbox;
pub mod ports;

pub use gallery::{Gallery, Key};
pub use lightbox::{LightboxController, LightboxState, RenderOutcome};
