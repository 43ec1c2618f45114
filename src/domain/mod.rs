// Domain data shapes shared across layers

pub mod photo;

pub use photo::{PhotoPage, PhotoRecord};
